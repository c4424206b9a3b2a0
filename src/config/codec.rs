//! Line-oriented key-value encoding of the settings record
//!
//! The wire format is a small INI-like text block:
//!
//! ```text
//! [Settings]
//! GridSize=50
//! WindowWidth=320
//! WindowHeight=240
//! BackgroundColor=0,0,255
//! GridLineColor=255,0,0
//! ```
//!
//! Encoding renders every key exactly once in that order. Decoding is
//! tolerant and order-independent: lines that do not start with a known key
//! followed by `=`, and values that do not parse per the key's shape, are
//! skipped without touching the record. All four storage backends share this
//! module, which is what keeps them byte-compatible with each other.

use crate::config::settings::Settings;
use crate::domain::color::Rgb;

const KEY_GRID_SIZE: &str = "GridSize";
const KEY_WINDOW_WIDTH: &str = "WindowWidth";
const KEY_WINDOW_HEIGHT: &str = "WindowHeight";
const KEY_BACKGROUND_COLOR: &str = "BackgroundColor";
const KEY_GRID_LINE_COLOR: &str = "GridLineColor";

/// Encodes a record into the canonical text form, one trailing newline per line
pub fn encode(settings: &Settings) -> String {
    format!(
        "[Settings]\n\
         {KEY_GRID_SIZE}={}\n\
         {KEY_WINDOW_WIDTH}={}\n\
         {KEY_WINDOW_HEIGHT}={}\n\
         {KEY_BACKGROUND_COLOR}={},{},{}\n\
         {KEY_GRID_LINE_COLOR}={},{},{}\n",
        settings.grid_size,
        settings.window_width,
        settings.window_height,
        settings.background_color.r,
        settings.background_color.g,
        settings.background_color.b,
        settings.grid_line_color.r,
        settings.grid_line_color.g,
        settings.grid_line_color.b,
    )
}

/// Decodes text into an existing record, line by line
///
/// Fields absent from the text keep their current values.
pub fn decode_into(text: &str, settings: &mut Settings) {
    for line in text.lines() {
        apply_line(line, settings);
    }
}

/// Applies a single line to the record, ignoring anything unrecognized
///
/// Exposed separately so backends that read line-by-line can feed lines
/// through without assembling the whole file in memory first.
pub fn apply_line(line: &str, settings: &mut Settings) {
    // Tolerate CRLF input regardless of which backend produced the line.
    let line = line.trim_end();
    let Some((key, value)) = line.split_once('=') else {
        return;
    };

    match key {
        KEY_GRID_SIZE => {
            if let Some(size) = parse_dimension(value) {
                settings.grid_size = size;
            }
        }
        KEY_WINDOW_WIDTH => {
            if let Some(width) = parse_dimension(value) {
                settings.window_width = width;
            }
        }
        KEY_WINDOW_HEIGHT => {
            if let Some(height) = parse_dimension(value) {
                settings.window_height = height;
            }
        }
        KEY_BACKGROUND_COLOR => {
            if let Some(color) = parse_color(value) {
                settings.background_color = color;
            }
        }
        KEY_GRID_LINE_COLOR => {
            if let Some(color) = parse_color(value) {
                settings.grid_line_color = color;
            }
        }
        // Unknown keys and the section header fall through untouched.
        _ => {}
    }
}

fn parse_dimension(value: &str) -> Option<i32> {
    value.trim().parse::<i32>().ok().filter(|v| *v > 0)
}

fn parse_color(value: &str) -> Option<Rgb> {
    let mut parts = value.trim().split(',');
    let r = parts.next()?.trim().parse::<u8>().ok()?;
    let g = parts.next()?.trim().parse::<u8>().ok()?;
    let b = parts.next()?.trim().parse::<u8>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Rgb::new(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Settings {
        Settings {
            grid_size: 40,
            window_width: 800,
            window_height: 600,
            background_color: Rgb::new(10, 20, 30),
            grid_line_color: Rgb::new(200, 100, 0),
        }
    }

    #[test]
    fn encode_produces_canonical_text() {
        let text = encode(&sample());
        assert_eq!(
            text,
            "[Settings]\n\
             GridSize=40\n\
             WindowWidth=800\n\
             WindowHeight=600\n\
             BackgroundColor=10,20,30\n\
             GridLineColor=200,100,0\n"
        );
    }

    #[test]
    fn decode_round_trips_any_record() {
        let original = sample();
        let mut decoded = Settings::default();
        decode_into(&encode(&original), &mut decoded);
        assert_eq!(decoded, original);
    }

    #[test]
    fn decode_is_order_independent() {
        let text = "GridLineColor=1,2,3\n\
                    BackgroundColor=4,5,6\n\
                    WindowHeight=600\n\
                    WindowWidth=800\n\
                    GridSize=40\n\
                    [Settings]\n";
        let mut reversed = Settings::default();
        decode_into(text, &mut reversed);

        let expected = Settings {
            grid_size: 40,
            window_width: 800,
            window_height: 600,
            background_color: Rgb::new(4, 5, 6),
            grid_line_color: Rgb::new(1, 2, 3),
        };
        assert_eq!(reversed, expected);
    }

    #[test]
    fn malformed_lines_keep_prior_values() {
        let mut settings = Settings::default();
        decode_into("GridSize=40\nJUNKLINE\nWindowWidth=abc\n", &mut settings);
        assert_eq!(settings.grid_size, 40);
        assert_eq!(settings.window_width, 320);
    }

    #[test]
    fn out_of_range_values_are_skipped() {
        let mut settings = Settings::default();
        decode_into(
            "GridSize=-5\nWindowWidth=0\nBackgroundColor=300,0,0\nGridLineColor=1,2\n",
            &mut settings,
        );
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn extra_color_components_are_malformed() {
        let mut settings = Settings::default();
        decode_into("BackgroundColor=1,2,3,4\n", &mut settings);
        assert_eq!(settings.background_color, Rgb::new(0, 0, 255));
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let mut settings = Settings::default();
        decode_into("GridSize=60\r\nBackgroundColor=7,8,9\r\n", &mut settings);
        assert_eq!(settings.grid_size, 60);
        assert_eq!(settings.background_color, Rgb::new(7, 8, 9));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut settings = Settings::default();
        decode_into("CellPadding=10\nGridSize =40\n", &mut settings);
        // " GridSize " with stray whitespace before '=' is not a recognized key.
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn truncated_color_line_leaves_stale_value() {
        // Deliberate tolerance: a cut-off value keeps whatever was loaded
        // before it, rather than failing the whole decode.
        let mut settings = Settings::default();
        decode_into("BackgroundColor=\n", &mut settings);
        assert_eq!(settings.background_color, Rgb::new(0, 0, 255));
    }
}
