use super::theme;
use crate::app::App;
use crate::types::{DialogKind, HexColor};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

/// Draw the currently active modal dialog overlay.
pub fn draw_dialog(f: &mut Frame, area: Rect, app: &App) {
    match &app.dialog {
        Some(DialogKind::ColorInput { value, error }) => {
            draw_color_input(f, area, app, value, error.as_deref());
        }
        Some(DialogKind::Help) => draw_help(f, area),
        None => {}
    }
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}

fn dialog_block(title: &str) -> Block<'static> {
    Block::default()
        .title(Line::from(Span::styled(
            format!(" {} ", title),
            theme::panel_title_style(),
        )))
        .borders(Borders::ALL)
        .border_style(theme::border_style(true))
        .style(Style::default().bg(theme::PANEL))
}

fn draw_color_input(f: &mut Frame, area: Rect, app: &App, value: &str, error: Option<&str>) {
    let popup = centered_rect(50, 8, area);
    f.render_widget(Clear, popup);

    let block = dialog_block("Choose Color (#rrggbb)");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    // Blink at ~2 Hz off the app tick.
    let cursor_char = if (app.elapsed().as_millis() / 500) % 2 == 0 {
        "█"
    } else {
        " "
    };

    let preview = value
        .parse::<HexColor>()
        .map(theme::swatch)
        .unwrap_or_else(|_| theme::swatch(app.selection.color));

    let status = match error {
        Some(e) => Span::styled(format!("  {}", e), Style::default().fg(theme::ERROR)),
        None => Span::raw(""),
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled("   ", Style::default().bg(preview)),
            Span::styled("  > ", Style::default().fg(theme::ACCENT)),
            Span::styled(value.to_string(), Style::default().fg(theme::TEXT)),
            Span::styled(cursor_char, Style::default().fg(theme::ACCENT)),
        ]),
        Line::from(status),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [Enter]", theme::key_hint_style()),
            Span::styled(" Apply  ", theme::footer_style()),
            Span::styled("[Esc]", theme::key_hint_style()),
            Span::styled(" Cancel", theme::footer_style()),
        ]),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 20, area);
    f.render_widget(Clear, popup);

    let block = dialog_block("Help - starshapes");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let hl = theme::key_hint_style();
    let nl = Style::default().fg(theme::TEXT);
    let dim = Style::default().fg(theme::TEXT_DIM);
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let lines = vec![
        Line::from(""),
        heading("  CONTROLS"),
        Line::from(vec![
            Span::styled("  Tab / ↑↓ / jk", hl),
            Span::styled("   Move between controls", nl),
        ]),
        Line::from(vec![
            Span::styled("  ←→ / hl", hl),
            Span::styled("         Change the focused value", nl),
        ]),
        Line::from(vec![
            Span::styled("  Enter / Space", hl),
            Span::styled("    Activate the focused control", nl),
        ]),
        Line::from(vec![
            Span::styled("  0-9 / Bksp", hl),
            Span::styled("       Edit the count (1-20)", nl),
        ]),
        Line::from(""),
        heading("  SHORTCUTS"),
        Line::from(vec![
            Span::styled("  a", hl),
            Span::styled("  Add shapes  ", nl),
            Span::styled("t", hl),
            Span::styled("  Toggle trail  ", nl),
            Span::styled("c", hl),
            Span::styled("  Hex colour", nl),
        ]),
        Line::from(vec![
            Span::styled("  q / Esc", hl),
            Span::styled("  Quit  ", nl),
            Span::styled("Ctrl+C", hl),
            Span::styled("  Force quit", nl),
        ]),
        Line::from(""),
        heading("  MOUSE"),
        Line::from(vec![
            Span::styled("  Move", hl),
            Span::styled("     The ring follows the pointer", nl),
        ]),
        Line::from(vec![
            Span::styled("  Hover", hl),
            Span::styled("    Pauses the shape underneath", nl),
        ]),
        Line::from(vec![
            Span::styled("  Click", hl),
            Span::styled("    Use a control in the panel", nl),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Press any key to close", dim)),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}
