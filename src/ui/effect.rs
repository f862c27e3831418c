use super::theme;
use crate::types::{Shape, ShapeInstance};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use std::time::Duration;

/// Cells reserved per shape, leaving room around the box for scale and bounce.
pub const SLOT_WIDTH: u16 = 12;
pub const SLOT_HEIGHT: u16 = 6;

/// The shape's nominal box. Cells are roughly twice as tall as wide, and each
/// row holds two half-block pixels, so 8x4 cells is an 8x8 pixel square.
const BOX_WIDTH: f64 = 8.0;
const BOX_HEIGHT: f64 = 4.0;

/// Star outline, in percent of its 36px box.
const STAR_POLYGON: [(f64, f64); 10] = [
    (50.0, 0.0),
    (61.0, 35.0),
    (98.0, 35.0),
    (68.0, 57.0),
    (79.0, 91.0),
    (50.0, 70.0),
    (21.0, 91.0),
    (32.0, 57.0),
    (2.0, 35.0),
    (39.0, 35.0),
];
/// The star box is 36px inside the 40px wrapper.
const STAR_EXTENT: f64 = 36.0 / 40.0;
/// Border-trick triangle: 35px tall inside the 40px wrapper.
const TRIANGLE_HALF_HEIGHT: f64 = 35.0 / 40.0;

impl Shape {
    /// Whether the box-normalised point `(u, v)` is inside the outline.
    /// Both axes run from -1 to 1; `v` grows downwards.
    pub fn contains(self, u: f64, v: f64) -> bool {
        match self {
            Shape::Circle => u * u + v * v <= 1.0,
            Shape::Square => u.abs() <= 1.0 && v.abs() <= 1.0,
            Shape::Triangle => {
                let h = TRIANGLE_HALF_HEIGHT;
                if v < -h || v > h {
                    return false;
                }
                u.abs() <= (v + h) / (2.0 * h)
            }
            Shape::Star => {
                let to_box = |p: f64| (p / 100.0 * 2.0 - 1.0) * STAR_EXTENT;
                let mut inside = false;
                let n = STAR_POLYGON.len();
                for i in 0..n {
                    let (xi, yi) = STAR_POLYGON[i];
                    let (xj, yj) = STAR_POLYGON[(i + n - 1) % n];
                    let (xi, yi, xj, yj) = (to_box(xi), to_box(yi), to_box(xj), to_box(yj));
                    if (yi > v) != (yj > v) && u < (xj - xi) * (v - yi) / (yj - yi) + xi {
                        inside = !inside;
                    }
                }
                inside
            }
        }
    }
}

/// One animated shape. Pure function of the instance and its animation clock.
pub struct ClickEffect<'a> {
    instance: &'a ShapeInstance,
    elapsed: Duration,
}

impl<'a> ClickEffect<'a> {
    pub fn new(instance: &'a ShapeInstance, elapsed: Duration) -> Self {
        Self { instance, elapsed }
    }
}

impl Widget for ClickEffect<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let transform = self.instance.animation.at(self.elapsed);
        let shape = self.instance.shape;
        let rgb = (self.instance.color.r, self.instance.color.g, self.instance.color.b);
        let (sin, cos) = (-transform.rotation).sin_cos();
        let scale = transform.scale.max(f64::EPSILON);

        // Box centre in cell units, shifted by the bounce offset.
        let cx = area.width as f64 / 2.0;
        let cy = area.height as f64 / 2.0 + transform.translate_y * BOX_HEIGHT;

        let covered = |col: u16, sub_row: f64| {
            let u = ((col as f64 + 0.5) - cx) / (BOX_WIDTH / 2.0);
            let v = (sub_row - cy) / (BOX_HEIGHT / 2.0);
            // Undo rotation, then scale.
            let (u, v) = (u * cos - v * sin, u * sin + v * cos);
            shape.contains(u / scale, v / scale)
        };

        for row in 0..area.height {
            for col in 0..area.width {
                let top = covered(col, row as f64 + 0.25);
                let bottom = covered(col, row as f64 + 0.75);
                let symbol = match (top, bottom) {
                    (true, true) => "█",
                    (true, false) => "▀",
                    (false, true) => "▄",
                    (false, false) => continue,
                };
                let cell = &mut buf[(area.x + col, area.y + row)];
                let fg = theme::blend(rgb, cell.bg, transform.opacity);
                cell.set_symbol(symbol);
                cell.set_fg(fg);
            }
        }
    }
}
