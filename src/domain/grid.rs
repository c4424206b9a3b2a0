//! Grid geometry in client-area pixel coordinates
//!
//! Pure arithmetic shared by input handling (mapping a click to the cell it
//! landed in) and rendering (enumerating grid line offsets). No knowledge of
//! Win32 or any drawing API.

/// A point in client-area pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Uniform square-cell grid anchored at the client area origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    cell_size: i32,
}

impl GridGeometry {
    /// Creates a grid with the given cell edge length, clamped to at least 1
    pub fn new(cell_size: i32) -> Self {
        Self {
            cell_size: cell_size.max(1),
        }
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Maps a pixel position to the center of the cell containing it
    pub fn cell_center(&self, px: i32, py: i32) -> Point {
        let cell = self.cell_size;
        Point::new(px / cell * cell + cell / 2, py / cell * cell + cell / 2)
    }

    /// Offsets of the vertical grid lines across a canvas of the given width
    pub fn vertical_lines(&self, width: i32) -> impl Iterator<Item = i32> {
        (0..width.max(0)).step_by(self.cell_size as usize)
    }

    /// Offsets of the horizontal grid lines across a canvas of the given height
    pub fn horizontal_lines(&self, height: i32) -> impl Iterator<Item = i32> {
        (0..height.max(0)).step_by(self.cell_size as usize)
    }
}
