//! Marker placement rules
//!
//! The board records which cell centers carry circle and cross markers.
//! A cell occupied by one kind refuses the other kind; repeated markers of
//! the same kind in one cell are tolerated and render on top of each other.

use crate::domain::grid::Point;

/// The two marker kinds a user can place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Cross,
}

/// All markers placed during the current run
///
/// Markers live for the process lifetime only; they are not part of the
/// persisted settings record.
#[derive(Debug, Default, Clone)]
pub struct MarkerBoard {
    circles: Vec<Point>,
    crosses: Vec<Point>,
}

impl MarkerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a marker at the given cell center
    ///
    /// Returns true if the board changed. Placement is refused when the cell
    /// already holds a marker of the opposite kind.
    pub fn place(&mut self, marker: Marker, center: Point) -> bool {
        match marker {
            Marker::Circle => {
                if self.crosses.contains(&center) {
                    return false;
                }
                self.circles.push(center);
            }
            Marker::Cross => {
                if self.circles.contains(&center) {
                    return false;
                }
                self.crosses.push(center);
            }
        }
        true
    }

    pub fn circles(&self) -> &[Point] {
        &self.circles
    }

    pub fn crosses(&self) -> &[Point] {
        &self.crosses
    }
}
