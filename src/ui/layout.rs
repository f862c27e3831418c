use super::effect::{SLOT_HEIGHT, SLOT_WIDTH};
use crate::types::FocusItem;
use ratatui::layout::{Position, Rect};

/// Below this width the control panel spans the full bottom edge.
pub const COMPACT_WIDTH: u16 = 100;
/// Below this width the compact panel drops its side padding too.
pub const NARROW_WIDTH: u16 = 60;

const PANEL_MIN_WIDTH: u16 = 28;
const PANEL_MAX_WIDTH: u16 = 44;
/// Six control rows plus the block border.
const PANEL_HEIGHT: u16 = FocusItem::ALL.len() as u16 + 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub compact: bool,
    pub narrow: bool,
    /// Region the shape row flows through.
    pub shapes: Rect,
    pub controls: Rect,
}

/// Split the screen the way the stylesheet's breakpoints do.
pub fn screen_layout(area: Rect) -> ScreenLayout {
    let compact = area.width < COMPACT_WIDTH;
    let narrow = area.width < NARROW_WIDTH;

    let controls = if compact {
        let height = PANEL_HEIGHT.min((area.height / 2).max(1)).min(area.height);
        Rect::new(area.x, area.bottom() - height, area.width, height)
    } else {
        let width = (area.width as u32 * 3 / 10)
            .clamp(PANEL_MIN_WIDTH as u32, PANEL_MAX_WIDTH as u32) as u16;
        let height = PANEL_HEIGHT.min(area.height.saturating_sub(1));
        let y = area.bottom().saturating_sub(height + 1).max(area.y);
        Rect::new(area.x + 2, y, width.min(area.width.saturating_sub(2)), height)
    };

    let top = if compact { 4 } else { 6 };
    let shapes_y = area.y + top.min(area.height);
    let shapes = Rect::new(
        area.x,
        shapes_y,
        area.width,
        area.bottom().saturating_sub(shapes_y),
    );

    ScreenLayout {
        compact,
        narrow,
        shapes,
        controls,
    }
}

/// Slot for each of the first `count` shapes, wrapped into centred lines.
/// Shapes that would fall below `area` get no slot.
pub fn shape_slots(area: Rect, count: usize, compact: bool) -> Vec<Rect> {
    let gap = if compact { 2 } else { 3 };
    let row_gap = 1;
    if area.width < SLOT_WIDTH || area.height < SLOT_HEIGHT || count == 0 {
        return Vec::new();
    }

    let per_line = ((area.width + gap) / (SLOT_WIDTH + gap)).max(1) as usize;
    let max_lines = ((area.height + row_gap) / (SLOT_HEIGHT + row_gap)) as usize;
    let visible = count.min(per_line * max_lines);

    let mut slots = Vec::with_capacity(visible);
    for index in 0..visible {
        let line = index / per_line;
        let in_line = (count - line * per_line).min(per_line) as u16;
        let line_width = in_line * SLOT_WIDTH + (in_line - 1) * gap;
        let left = area.x + (area.width - line_width) / 2;
        let col = (index % per_line) as u16;
        slots.push(Rect::new(
            left + col * (SLOT_WIDTH + gap),
            area.y + line as u16 * (SLOT_HEIGHT + row_gap),
            SLOT_WIDTH,
            SLOT_HEIGHT,
        ));
    }
    slots
}

/// Visible inner rows of the control panel, in order.
///
/// When the panel is too short for every row, the rows scroll so `focus` stays on screen.
pub fn control_rows(panel: Rect, focus: FocusItem) -> Vec<(FocusItem, Rect)> {
    let inner = Rect::new(
        panel.x + 1,
        panel.y + 1,
        panel.width.saturating_sub(2),
        panel.height.saturating_sub(2),
    );
    let visible = inner.height as usize;
    let focused = FocusItem::ALL.iter().position(|i| *i == focus).unwrap_or(0);
    let offset = (focused + 1).saturating_sub(visible);

    FocusItem::ALL
        .iter()
        .skip(offset)
        .take(visible)
        .enumerate()
        .map(|(i, item)| (*item, Rect::new(inner.x, inner.y + i as u16, inner.width, 1)))
        .collect()
}

pub fn control_at(panel: Rect, focus: FocusItem, x: u16, y: u16) -> Option<FocusItem> {
    control_rows(panel, focus)
        .into_iter()
        .find(|(_, rect)| rect.contains(Position::new(x, y)))
        .map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints() {
        let wide = screen_layout(Rect::new(0, 0, 160, 50));
        assert!(!wide.compact);
        assert_eq!(wide.controls.x, 2);
        assert_eq!(wide.controls.width, 44);
        assert_eq!(wide.controls.bottom(), 49);
        assert_eq!(wide.shapes.y, 6);

        let compact = screen_layout(Rect::new(0, 0, 80, 30));
        assert!(compact.compact);
        assert!(!compact.narrow);
        assert_eq!(compact.controls.width, 80);
        assert_eq!(compact.controls.bottom(), 30);
        assert_eq!(compact.shapes.y, 4);

        let narrow = screen_layout(Rect::new(0, 0, 40, 10));
        assert!(narrow.narrow);
        assert!(narrow.controls.height <= 5);
    }

    #[test]
    fn test_panel_width_clamped() {
        assert_eq!(screen_layout(Rect::new(0, 0, 100, 40)).controls.width, 30);
        assert_eq!(screen_layout(Rect::new(0, 0, 120, 40)).controls.width, 36);
        assert_eq!(screen_layout(Rect::new(0, 0, 300, 40)).controls.width, 44);
    }

    #[test]
    fn test_single_line_is_centred() {
        let area = Rect::new(0, 6, 120, 30);
        let slots = shape_slots(area, 3, false);
        assert_eq!(slots.len(), 3);
        let left_margin = slots[0].x - area.x;
        let right_margin = area.right() - slots[2].right();
        assert!(left_margin.abs_diff(right_margin) <= 1);
        assert_eq!(slots[1].x - slots[0].right(), 3);
    }

    #[test]
    fn test_slots_wrap_and_never_overlap() {
        let area = Rect::new(0, 0, 60, 40);
        let slots = shape_slots(area, 10, false);
        // (60 + 3) / 15 = 4 per line.
        assert_eq!(slots.len(), 10);
        assert_eq!(slots[3].y, slots[0].y);
        assert_eq!(slots[4].y, SLOT_HEIGHT + 1);
        for (i, a) in slots.iter().enumerate() {
            assert!(area.contains(Position::new(a.x, a.y)));
            for b in &slots[i + 1..] {
                assert!(!a.intersects(*b));
            }
        }
        // Last line (2 slots) is centred on its own.
        let last = &slots[8..];
        let left = last[0].x - area.x;
        let right = area.right() - last[1].right();
        assert!(left.abs_diff(right) <= 1);
    }

    #[test]
    fn test_overflow_is_hidden() {
        let area = Rect::new(0, 0, 30, 13);
        // 2 per line, 2 lines fit.
        assert_eq!(shape_slots(area, 50, false).len(), 4);
        assert!(shape_slots(Rect::new(0, 0, 5, 5), 3, false).is_empty());
    }

    #[test]
    fn test_control_hit_testing() {
        let panel = Rect::new(2, 10, 30, 8);
        let focus = FocusItem::Shape;
        assert_eq!(control_at(panel, focus, 5, 11), Some(FocusItem::Shape));
        assert_eq!(control_at(panel, focus, 5, 16), Some(FocusItem::Add));
        assert_eq!(control_at(panel, focus, 5, 10), None);
        assert_eq!(control_at(panel, focus, 40, 12), None);
    }

    #[test]
    fn test_short_panel_scrolls_to_focus() {
        // Four inner rows for six controls.
        let panel = Rect::new(0, 20, 50, 6);
        let items = |focus| -> Vec<FocusItem> {
            control_rows(panel, focus).into_iter().map(|(item, _)| item).collect()
        };
        assert_eq!(
            items(FocusItem::Shape),
            [FocusItem::Shape, FocusItem::Animation, FocusItem::Color, FocusItem::Count]
        );
        assert_eq!(
            items(FocusItem::Add),
            [FocusItem::Color, FocusItem::Count, FocusItem::Trail, FocusItem::Add]
        );
        let rows = control_rows(panel, FocusItem::Add);
        assert_eq!(rows[3].1.y, 24);
        assert_eq!(control_at(panel, FocusItem::Add, 5, 21), Some(FocusItem::Color));
    }
}
