pub mod controls;
pub mod cursor;
pub mod dialogs;
pub mod effect;
pub mod layout;
pub mod starfield;
pub mod theme;

use crate::app::App;
use effect::ClickEffect;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::Frame;

/// Master render function, back to front: backdrop, stars, shapes, panel, dialog, cursor.
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let screen = layout::screen_layout(area);

    // Layer 0: gradient + starfield
    draw_backdrop(f.buffer_mut(), area);
    f.render_widget(app.starfield.widget(app.elapsed()), area);

    // Layer 1: spawned shapes, in creation order
    let slots = layout::shape_slots(screen.shapes, app.shapes.len(), screen.compact);
    for (instance, slot) in app.shapes.iter().zip(slots) {
        f.render_widget(ClickEffect::new(instance, app.animation_clock(instance.id)), slot);
    }

    // Layer 2: control panel
    controls::draw_controls(f, &screen, app);

    // Layer 3: modal dialog overlay (if any)
    if app.dialog.is_some() {
        dialogs::draw_dialog(f, area, app);
    }

    // Layer 4: the trail ring sits above everything
    if let Some(position) = app.cursor_indicator() {
        f.render_widget(cursor::CursorIndicator { position }, area);
    }
}

/// Radial gradient from the bottom centre outwards.
fn draw_backdrop(buf: &mut Buffer, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let (ir, ig, ib) = theme::BACKDROP_INNER;
    let (or, og, ob) = theme::BACKDROP_OUTER;
    let cx = area.width as f64 / 2.0;
    let bottom = area.height as f64;

    for row in 0..area.height {
        for col in 0..area.width {
            // Ellipse: normalise each axis by its own extent.
            let dx = (col as f64 + 0.5 - cx) / cx.max(1.0);
            let dy = (bottom - row as f64 - 0.5) / bottom.max(1.0);
            let t = (dx * dx + dy * dy).sqrt().min(1.0);
            let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
            let cell = &mut buf[(area.x + col, area.y + row)];
            cell.reset();
            cell.set_bg(Color::Rgb(mix(ir, or), mix(ig, og), mix(ib, ob)));
        }
    }
}
