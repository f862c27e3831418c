use super::theme;
use crate::types::CursorPosition;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::widgets::Widget;

const RING: &str = "◯";

/// Ring drawn at the pointer, coloured as the difference of white over what lies beneath.
pub struct CursorIndicator {
    pub position: CursorPosition,
}

impl Widget for CursorIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let pos = Position::new(self.position.x, self.position.y);
        if !area.contains(pos) {
            return;
        }
        let cell = &mut buf[pos];
        let under = if cell.symbol().trim().is_empty() {
            cell.bg
        } else {
            cell.fg
        };
        cell.set_symbol(RING);
        cell.set_fg(theme::difference_white(under));
    }
}
