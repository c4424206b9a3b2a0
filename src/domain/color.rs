//! RGB color values and the small color operations the canvas needs
//!
//! Colors are plain 8-bit-per-channel triples with no alpha; the renderer
//! adds opacity when it builds paint.

use rand::Rng;

/// An opaque RGB color with channels in [0, 255]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Shifts all three channels by `delta`, clamping each to [0, 255]
    ///
    /// Used for the mouse-wheel grid color adjustment: one notch moves
    /// every channel by the same signed step.
    pub fn shifted(self, delta: i32) -> Self {
        fn shift(channel: u8, delta: i32) -> u8 {
            (channel as i32 + delta).clamp(0, 255) as u8
        }

        Self {
            r: shift(self.r, delta),
            g: shift(self.g, delta),
            b: shift(self.b, delta),
        }
    }

    /// Returns a uniformly random color
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            r: rng.random(),
            g: rng.random(),
            b: rng.random(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_moves_all_channels() {
        let color = Rgb::new(100, 150, 200);
        assert_eq!(color.shifted(5), Rgb::new(105, 155, 205));
        assert_eq!(color.shifted(-5), Rgb::new(95, 145, 195));
    }

    #[test]
    fn shift_clamps_at_channel_bounds() {
        assert_eq!(Rgb::new(253, 0, 128).shifted(5), Rgb::new(255, 5, 133));
        assert_eq!(Rgb::new(2, 255, 128).shifted(-5), Rgb::new(0, 250, 123));
    }

    #[test]
    fn zero_shift_is_identity() {
        let color = Rgb::new(10, 20, 30);
        assert_eq!(color.shifted(0), color);
    }
}
