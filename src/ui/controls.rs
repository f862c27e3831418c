use super::layout::{control_rows, ScreenLayout};
use super::theme;
use crate::app::App;
use crate::types::FocusItem;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

const LABEL_WIDTH: usize = 18;
const NARROW_LABEL_WIDTH: usize = 11;

pub fn draw_controls(f: &mut Frame, screen: &ScreenLayout, app: &App) {
    let area = screen.controls;
    if area.width < 3 || area.height < 3 {
        return;
    }
    f.render_widget(Clear, area);

    let background = if screen.compact {
        theme::PANEL_COMPACT
    } else {
        theme::PANEL
    };
    let block = Block::default()
        .title(Line::from(Span::styled(" CONTROLS ", theme::panel_title_style())))
        .title_bottom(footer_line(app))
        .borders(Borders::ALL)
        .border_style(theme::border_style(app.dialog.is_none()))
        .style(Style::default().bg(background));
    f.render_widget(block, area);

    for (item, row) in control_rows(area, app.focus) {
        let line = control_line(app, item, screen.narrow, row);
        f.render_widget(Paragraph::new(line), row);
    }
}

fn control_line(app: &App, item: FocusItem, narrow: bool, row: Rect) -> Line<'static> {
    let focused = app.focus == item && app.dialog.is_none();
    let style = theme::field_style(focused);
    let marker = if focused { ">" } else { " " };
    let label_width = if narrow {
        NARROW_LABEL_WIDTH
    } else {
        LABEL_WIDTH
    };
    let selection = &app.selection;

    let (label, value): (&str, Vec<Span<'static>>) = match item {
        FocusItem::Shape => (
            if narrow { "Shape" } else { "Select Shape:" },
            vec![Span::styled(format!(" ‹ {} › ", selection.shape.label()), style)],
        ),
        FocusItem::Animation => (
            if narrow { "Animation" } else { "Select Animation:" },
            vec![Span::styled(
                format!(" ‹ {} › ", selection.animation.label()),
                style,
            )],
        ),
        FocusItem::Color => (
            if narrow { "Color" } else { "Choose Color:" },
            vec![
                Span::styled("   ", Style::default().bg(theme::swatch(selection.color))),
                Span::styled(format!(" {} ", selection.color), style),
            ],
        ),
        FocusItem::Count => (
            if narrow { "Count" } else { "Trail Length:" },
            vec![Span::styled(format!(" {:>2} ", selection.spawn_count.get()), style)],
        ),
        FocusItem::Trail => {
            let check = if selection.trail_enabled { "[x]" } else { "[ ]" };
            return Line::from(vec![
                Span::styled(marker, theme::key_hint_style()),
                Span::styled(format!("{} Enable Mouse Trail", check), style),
            ]);
        }
        FocusItem::Add => {
            let text = "Add";
            let pad = (row.width as usize).saturating_sub(text.width() + 2) / 2;
            return Line::from(vec![
                Span::styled(marker, theme::key_hint_style()),
                Span::styled(
                    format!("{:pad$}{}{:pad$}", "", text, "", pad = pad),
                    style,
                ),
            ]);
        }
    };

    let mut spans = vec![
        Span::styled(marker, theme::key_hint_style()),
        Span::styled(pad_to(label, label_width), theme::label_style()),
    ];
    spans.extend(value);
    Line::from(spans)
}

fn pad_to(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn footer_line(app: &App) -> Line<'static> {
    if let Some(msg) = app.active_flash() {
        return Line::from(Span::styled(
            format!(" {} ", msg),
            theme::key_hint_style(),
        ));
    }
    Line::from(vec![
        Span::styled(" [a]", theme::key_hint_style()),
        Span::styled(" add ", theme::footer_style()),
        Span::styled("[?]", theme::key_hint_style()),
        Span::styled(" help ", theme::footer_style()),
        Span::styled("[q]", theme::key_hint_style()),
        Span::styled(" quit ", theme::footer_style()),
    ])
}
