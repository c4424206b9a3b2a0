//! Canvas rendering with tiny-skia
//!
//! Separates layout calculation (pure geometry from the application state)
//! from rasterization, so both halves stay testable without a window. The
//! platform layer blits the finished pixmap.

use tiny_skia::{Color, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::app::AppContext;
use crate::domain::color::Rgb;
use crate::domain::grid::Point;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("failed to create {width}x{height} pixmap")]
    PixmapCreationFailed { width: i32, height: i32 },
}

/// A single straight grid line in canvas coordinates
#[derive(Debug, Clone, Copy)]
pub struct Line {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Everything needed to rasterize one frame
#[derive(Debug, Clone)]
pub struct SceneLayout {
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub background: Rgb,
    pub grid_color: Rgb,
    pub lines: Vec<Line>,
    /// Circle marker centers, radius half a cell
    pub circles: Vec<Point>,
    /// Cross marker centers, arms a quarter cell long
    pub crosses: Vec<Point>,
    pub cell_size: i32,
}

impl SceneLayout {
    /// Computes the frame layout from the current application state
    pub fn from_context(ctx: &AppContext) -> Self {
        let width = ctx.window_width().max(1);
        let height = ctx.window_height().max(1);
        let grid = ctx.grid();

        let mut lines = Vec::new();
        for x in grid.vertical_lines(width) {
            lines.push(Line {
                x1: x as f32 + 0.5,
                y1: 0.0,
                x2: x as f32 + 0.5,
                y2: height as f32,
            });
        }
        for y in grid.horizontal_lines(height) {
            lines.push(Line {
                x1: 0.0,
                y1: y as f32 + 0.5,
                x2: width as f32,
                y2: y as f32 + 0.5,
            });
        }

        Self {
            canvas_width: width,
            canvas_height: height,
            background: ctx.background_color(),
            grid_color: ctx.grid_line_color(),
            lines,
            circles: ctx.board().circles().to_vec(),
            crosses: ctx.board().crosses().to_vec(),
            cell_size: grid.cell_size(),
        }
    }
}

const CIRCLE_COLOR: Rgb = Rgb::new(0, 255, 0);
const CROSS_COLOR: Rgb = Rgb::new(255, 255, 0);
const MARKER_STROKE_WIDTH: f32 = 2.0;

/// Rasterizes scene layouts into pixmaps
#[derive(Debug, Default)]
pub struct SceneRenderer;

impl SceneRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders one frame
    pub fn render(&self, layout: &SceneLayout) -> Result<Pixmap, RendererError> {
        let mut pixmap = Pixmap::new(layout.canvas_width as u32, layout.canvas_height as u32)
            .ok_or(RendererError::PixmapCreationFailed {
                width: layout.canvas_width,
                height: layout.canvas_height,
            })?;

        pixmap.fill(to_skia(layout.background));
        self.render_grid(&mut pixmap, layout);
        self.render_circles(&mut pixmap, layout);
        self.render_crosses(&mut pixmap, layout);

        Ok(pixmap)
    }

    fn render_grid(&self, pixmap: &mut Pixmap, layout: &SceneLayout) {
        let mut paint = Paint::default();
        paint.set_color(to_skia(layout.grid_color));
        // Aliased 1px strokes give the crisp integer-aligned lines the
        // canvas is drawn with.
        paint.anti_alias = false;

        let stroke = Stroke {
            width: 1.0,
            ..Stroke::default()
        };

        for line in &layout.lines {
            let mut path = PathBuilder::new();
            path.move_to(line.x1, line.y1);
            path.line_to(line.x2, line.y2);
            if let Some(path) = path.finish() {
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
    }

    fn render_circles(&self, pixmap: &mut Pixmap, layout: &SceneLayout) {
        let radius = (layout.cell_size / 2) as f32;
        let mut paint = Paint::default();
        paint.set_color(to_skia(CIRCLE_COLOR));
        paint.anti_alias = true;

        let stroke = Stroke {
            width: MARKER_STROKE_WIDTH,
            ..Stroke::default()
        };

        for center in &layout.circles {
            let mut path = PathBuilder::new();
            path.push_circle(center.x as f32, center.y as f32, radius);
            if let Some(path) = path.finish() {
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
    }

    fn render_crosses(&self, pixmap: &mut Pixmap, layout: &SceneLayout) {
        let arm = (layout.cell_size / 4) as f32;
        let mut paint = Paint::default();
        paint.set_color(to_skia(CROSS_COLOR));
        paint.anti_alias = true;

        let stroke = Stroke {
            width: MARKER_STROKE_WIDTH,
            ..Stroke::default()
        };

        for center in &layout.crosses {
            let (cx, cy) = (center.x as f32, center.y as f32);
            let mut path = PathBuilder::new();
            path.move_to(cx - arm, cy - arm);
            path.line_to(cx + arm, cy + arm);
            path.move_to(cx + arm, cy - arm);
            path.line_to(cx - arm, cy + arm);
            if let Some(path) = path.finish() {
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
    }
}

/// Converts the pixmap's RGBA bytes into the BGRA order Win32 DIBs expect
pub fn pixmap_to_bgra(pixmap: &Pixmap) -> Vec<u8> {
    let mut data = pixmap.data().to_vec();
    for px in data.chunks_exact_mut(4) {
        px.swap(0, 2);
    }
    data
}

fn to_skia(color: Rgb) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, 255)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::InputEvent;
    use crate::config::Settings;

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8) {
        let px = pixmap.pixel(x, y).unwrap();
        (px.red(), px.green(), px.blue())
    }

    fn test_context() -> AppContext {
        AppContext::from_settings(&Settings::default())
    }

    #[test]
    fn layout_matches_window_extent() {
        let layout = SceneLayout::from_context(&test_context());
        assert_eq!(layout.canvas_width, 320);
        assert_eq!(layout.canvas_height, 240);
        // 320/50 -> 7 vertical offsets, 240/50 -> 5 horizontal offsets
        assert_eq!(layout.lines.len(), 12);
    }

    #[test]
    fn background_and_grid_pixels_carry_their_colors() {
        let ctx = test_context();
        let pixmap = SceneRenderer::new()
            .render(&SceneLayout::from_context(&ctx))
            .unwrap();

        // First vertical grid line occupies column 0; default grid color is red.
        assert_eq!(pixel(&pixmap, 0, 5), (255, 0, 0));
        // Mid-cell pixel shows the default blue background.
        assert_eq!(pixel(&pixmap, 30, 30), (0, 0, 255));
    }

    #[test]
    fn markers_change_the_rendered_frame() {
        let mut ctx = test_context();
        let renderer = SceneRenderer::new();
        let empty = renderer.render(&SceneLayout::from_context(&ctx)).unwrap();

        ctx.handle_event(InputEvent::LeftClick { x: 60, y: 60 });
        ctx.handle_event(InputEvent::RightClick { x: 110, y: 60 });
        let marked = renderer.render(&SceneLayout::from_context(&ctx)).unwrap();

        assert_ne!(empty.data(), marked.data());
    }

    #[test]
    fn degenerate_extent_still_renders() {
        let mut ctx = test_context();
        ctx.handle_event(InputEvent::WindowResized {
            width: 0,
            height: 0,
        });
        let pixmap = SceneRenderer::new()
            .render(&SceneLayout::from_context(&ctx))
            .unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (1, 1));
    }

    #[test]
    fn bgra_conversion_swaps_red_and_blue() {
        let ctx = test_context();
        let pixmap = SceneRenderer::new()
            .render(&SceneLayout::from_context(&ctx))
            .unwrap();
        let bgra = pixmap_to_bgra(&pixmap);

        let offset = ((30 * pixmap.width() + 30) * 4) as usize;
        // Background blue lands in the leading (B) byte.
        assert_eq!(&bgra[offset..offset + 4], &[255, 0, 0, 255]);
    }
}
