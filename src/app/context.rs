//! Application state and event handling
//!
//! `AppContext` owns all mutable state for the run: grid geometry, the
//! marker board, live colors, and the client-area extent. The platform
//! layer translates raw window messages into [`InputEvent`]s and acts on
//! the returned [`EventOutcome`], which keeps this logic free of Win32
//! types and testable anywhere.

use crate::config::Settings;
use crate::domain::board::{Marker, MarkerBoard};
use crate::domain::color::Rgb;
use crate::domain::grid::GridGeometry;

/// Per-notch channel step for the wheel-driven grid color adjustment
pub const WHEEL_COLOR_STEP: i32 = 5;

/// Semantic input events produced by the window shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Left mouse button pressed at a client-area position
    LeftClick { x: i32, y: i32 },
    /// Right mouse button pressed at a client-area position
    RightClick { x: i32, y: i32 },
    /// Mouse wheel turned; only the sign of the delta matters
    WheelScroll { delta: i32 },
    /// Enter pressed: pick a new random background color
    EnterPressed,
    /// Esc or Ctrl+Q pressed
    QuitRequested,
    /// Shift+C pressed: open the system text editor
    EditorRequested,
    /// Client area resized
    WindowResized { width: i32, height: i32 },
}

/// What the shell should do after an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Nothing visible changed
    Ignored,
    /// Repaint the window
    Redraw,
    /// Leave the message loop
    Quit,
    /// Spawn the external text editor
    LaunchEditor,
}

/// All mutable state for one run of the canvas
#[derive(Debug, Clone)]
pub struct AppContext {
    grid: GridGeometry,
    board: MarkerBoard,
    background_color: Rgb,
    grid_line_color: Rgb,
    window_width: i32,
    window_height: i32,
}

impl AppContext {
    /// Seeds the context from a loaded settings record
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            grid: GridGeometry::new(settings.grid_size),
            board: MarkerBoard::new(),
            background_color: settings.background_color,
            grid_line_color: settings.grid_line_color,
            window_width: settings.window_width,
            window_height: settings.window_height,
        }
    }

    /// Copies the live state back into a record for the shutdown save
    ///
    /// Markers are intentionally not persisted; only grid size, window
    /// extent, and colors survive across runs.
    pub fn snapshot_settings(&self) -> Settings {
        Settings {
            grid_size: self.grid.cell_size(),
            window_width: self.window_width,
            window_height: self.window_height,
            background_color: self.background_color,
            grid_line_color: self.grid_line_color,
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) -> EventOutcome {
        match event {
            InputEvent::LeftClick { x, y } => {
                let center = self.grid.cell_center(x, y);
                if self.board.place(Marker::Circle, center) {
                    EventOutcome::Redraw
                } else {
                    EventOutcome::Ignored
                }
            }
            InputEvent::RightClick { x, y } => {
                let center = self.grid.cell_center(x, y);
                if self.board.place(Marker::Cross, center) {
                    EventOutcome::Redraw
                } else {
                    EventOutcome::Ignored
                }
            }
            InputEvent::WheelScroll { delta } => {
                let step = if delta > 0 {
                    WHEEL_COLOR_STEP
                } else {
                    -WHEEL_COLOR_STEP
                };
                self.grid_line_color = self.grid_line_color.shifted(step);
                EventOutcome::Redraw
            }
            InputEvent::EnterPressed => {
                self.background_color = Rgb::random();
                EventOutcome::Redraw
            }
            InputEvent::QuitRequested => EventOutcome::Quit,
            InputEvent::EditorRequested => EventOutcome::LaunchEditor,
            InputEvent::WindowResized { width, height } => {
                self.window_width = width;
                self.window_height = height;
                EventOutcome::Redraw
            }
        }
    }

    pub fn grid(&self) -> GridGeometry {
        self.grid
    }

    pub fn board(&self) -> &MarkerBoard {
        &self.board
    }

    pub fn background_color(&self) -> Rgb {
        self.background_color
    }

    pub fn grid_line_color(&self) -> Rgb {
        self.grid_line_color
    }

    pub fn window_width(&self) -> i32 {
        self.window_width
    }

    pub fn window_height(&self) -> i32 {
        self.window_height
    }
}
