//! The persisted settings record
//!
//! One instance lives for the process lifetime, owned by the application
//! shell: loaded once at startup, mutated field-by-field during the run,
//! written back once at shutdown.

use crate::domain::color::Rgb;

/// Default cell edge length in pixels
pub const DEFAULT_GRID_SIZE: i32 = 50;

/// Settings persisted across runs
///
/// Callers pre-seed a record with [`Settings::default`] before loading;
/// fields missing or malformed in the backing file keep their pre-call
/// values, so the record is always fully formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Pixel edge length of one grid cell, always positive
    pub grid_size: i32,
    /// Client-area width in pixels
    pub window_width: i32,
    /// Client-area height in pixels
    pub window_height: i32,
    pub background_color: Rgb,
    pub grid_line_color: Rgb,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            window_width: 320,
            window_height: 240,
            background_color: Rgb::new(0, 0, 255),
            grid_line_color: Rgb::new(255, 0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_matches_first_run_values() {
        let settings = Settings::default();
        assert_eq!(settings.grid_size, 50);
        assert_eq!(settings.window_width, 320);
        assert_eq!(settings.window_height, 240);
        assert_eq!(settings.background_color, Rgb::new(0, 0, 255));
        assert_eq!(settings.grid_line_color, Rgb::new(255, 0, 0));
    }
}
