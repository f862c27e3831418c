use crate::types::HexColor;
use ratatui::style::{Color, Modifier, Style};

// ── Backdrop ────────────────────────────────────────────────────
/// Radial gradient, bright end at the bottom centre.
pub const BACKDROP_INNER: (u8, u8, u8) = (0x0d, 0x0d, 0x1a);
pub const BACKDROP_OUTER: (u8, u8, u8) = (0x00, 0x00, 0x00);

// ── Panel palette ───────────────────────────────────────────────
pub const PANEL: Color = Color::Rgb(26, 26, 36);
pub const PANEL_COMPACT: Color = Color::Rgb(8, 8, 10);
pub const FIELD: Color = Color::Rgb(10, 10, 14);
pub const BORDER: Color = Color::Rgb(70, 70, 84);
pub const BORDER_FOCUS: Color = Color::Rgb(204, 204, 204);

pub const TEXT: Color = Color::Rgb(255, 255, 255);
pub const TEXT_DIM: Color = Color::Rgb(150, 150, 165);
pub const ACCENT: Color = Color::Rgb(235, 235, 235);
pub const ERROR: Color = Color::Rgb(255, 90, 90);

// ── Composite styles ────────────────────────────────────────────
pub fn panel_title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn label_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn field_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(PANEL)
            .bg(TEXT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT).bg(FIELD)
    }
}

pub fn key_hint_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn footer_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUS)
    } else {
        Style::default().fg(BORDER)
    }
}

pub fn swatch(color: HexColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Alpha-composite `top` over `under` (both RGB). Non-RGB `under` is treated as black.
pub fn blend(top: (u8, u8, u8), under: Color, alpha: f64) -> Color {
    let (ur, ug, ub) = match under {
        Color::Rgb(r, g, b) => (r, g, b),
        _ => (0, 0, 0),
    };
    let a = alpha.clamp(0.0, 1.0);
    let mix = |t: u8, u: u8| (t as f64 * a + u as f64 * (1.0 - a)).round() as u8;
    Color::Rgb(mix(top.0, ur), mix(top.1, ug), mix(top.2, ub))
}

/// `mix-blend-mode: difference` of white over `under`.
pub fn difference_white(under: Color) -> Color {
    match under {
        Color::Rgb(r, g, b) => Color::Rgb(255 - r, 255 - g, 255 - b),
        _ => Color::Rgb(255, 255, 255),
    }
}
