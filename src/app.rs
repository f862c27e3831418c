use crate::config::Config;
use crate::spawn::{spawn_batch, IdGenerator};
use crate::types::*;
use crate::ui::layout;
use crate::ui::starfield::StarField;
use ratatui::layout::{Position, Rect};
use std::collections::HashMap;
use std::time::Duration;

/// How long a flash message stays in the panel footer, in ticks.
const FLASH_TICKS: u64 = 60;

/// Top-level application state.
pub struct App {
    pub selection: Selection,
    pub cursor: CursorPosition,
    /// Spawned shapes in creation order. Only ever appended to (or trimmed from the front
    /// when `max_shapes` is set).
    pub shapes: Vec<ShapeInstance>,
    pub starfield: StarField,
    pub focus: FocusItem,
    pub dialog: Option<DialogKind>,
    pub viewport: Rect,
    pub should_quit: bool,
    pub tick: u64,
    flash_message: Option<String>,
    flash_until: u64,
    tick_rate: Duration,
    clock: Duration,
    max_shapes: Option<usize>,
    ids: IdGenerator,
    /// Time each shape has spent hovered, subtracted from its animation clock.
    paused: HashMap<ShapeId, Duration>,
}

impl App {
    pub fn new(config: &Config, starfield: StarField) -> Self {
        Self {
            selection: config.selection(),
            cursor: CursorPosition::default(),
            shapes: Vec::new(),
            starfield,
            focus: FocusItem::Shape,
            dialog: None,
            viewport: Rect::default(),
            should_quit: false,
            tick: 0,
            flash_message: None,
            flash_until: 0,
            tick_rate: Duration::from_secs(1) / config.fps.max(1),
            clock: Duration::ZERO,
            max_shapes: config.max_shapes,
            ids: IdGenerator::new(),
            paused: HashMap::new(),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Session time driving every animation.
    pub fn elapsed(&self) -> Duration {
        self.clock
    }

    /// Animation time for one shape: the session clock minus time spent hovered.
    pub fn animation_clock(&self, id: ShapeId) -> Duration {
        let paused = self.paused.get(&id).copied().unwrap_or_default();
        self.clock.saturating_sub(paused)
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.clock += self.tick_rate;
        if let Some(id) = self.hovered_shape() {
            *self.paused.entry(id).or_default() += self.tick_rate;
        }
        if self.flash_message.is_some() && self.tick >= self.flash_until {
            self.flash_message = None;
        }
    }

    pub fn on_pointer_move(&mut self, x: u16, y: u16) {
        self.cursor = CursorPosition { x, y };
    }

    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.viewport = Rect::new(0, 0, width, height);
    }

    /// Where to draw the trail ring, if it is enabled.
    pub fn cursor_indicator(&self) -> Option<CursorPosition> {
        self.selection.trail_enabled.then_some(self.cursor)
    }

    /// The shape whose slot is under the pointer.
    pub fn hovered_shape(&self) -> Option<ShapeId> {
        let screen = layout::screen_layout(self.viewport);
        let pointer = Position::new(self.cursor.x, self.cursor.y);
        if screen.controls.contains(pointer) {
            return None;
        }
        layout::shape_slots(screen.shapes, self.shapes.len(), screen.compact)
            .iter()
            .position(|slot| slot.contains(pointer))
            .map(|index| self.shapes[index].id)
    }

    pub fn active_flash(&self) -> Option<&str> {
        self.flash_message.as_deref()
    }

    fn flash(&mut self, message: String) {
        self.flash_message = Some(message);
        self.flash_until = self.tick + FLASH_TICKS;
    }

    // ── Selection ───────────────────────────────────────────────

    pub fn set_shape(&mut self, shape: Shape) {
        tracing::debug!(shape = shape.label(), "shape selected");
        self.selection.shape = shape;
    }

    pub fn set_animation(&mut self, animation: Animation) {
        tracing::debug!(animation = animation.name(), "animation selected");
        self.selection.animation = animation;
    }

    pub fn set_color(&mut self, color: HexColor) {
        tracing::debug!(%color, "colour selected");
        self.selection.color = color;
    }

    pub fn set_spawn_count(&mut self, value: i64) {
        self.selection.spawn_count = SpawnCount::new(value);
    }

    pub fn set_spawn_count_text(&mut self, text: &str) {
        self.selection.spawn_count = SpawnCount::parse(text);
    }

    /// Type a digit into the count field, as a controlled numeric input would.
    pub fn push_count_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            return;
        }
        let mut text = self.selection.spawn_count.get().to_string();
        text.push(digit);
        self.set_spawn_count_text(&text);
    }

    pub fn pop_count_digit(&mut self) {
        let mut text = self.selection.spawn_count.get().to_string();
        text.pop();
        self.set_spawn_count_text(&text);
    }

    pub fn set_trail(&mut self, enabled: bool) {
        self.selection.trail_enabled = enabled;
    }

    pub fn toggle_trail(&mut self) {
        self.set_trail(!self.selection.trail_enabled);
    }

    // ── Shapes ──────────────────────────────────────────────────

    /// Append `spawn_count` shapes built from the current selection. Returns how many were added.
    pub fn add_shapes(&mut self) -> usize {
        let batch = spawn_batch(&self.selection, &mut self.ids);
        let added = batch.len();
        self.shapes.extend(batch);
        tracing::info!(
            added,
            total = self.shapes.len(),
            shape = self.selection.shape.label(),
            animation = self.selection.animation.name(),
            color = %self.selection.color,
            "shapes added"
        );

        if let Some(max) = self.max_shapes {
            if self.shapes.len() > max {
                let excess = self.shapes.len() - max;
                for evicted in self.shapes.drain(..excess) {
                    self.paused.remove(&evicted.id);
                }
                tracing::debug!(evicted = excess, "oldest shapes evicted");
            }
        }

        self.flash(format!(
            "Added {} x {}",
            added,
            self.selection.shape.label()
        ));
        added
    }

    // ── Focus & controls ────────────────────────────────────────

    pub fn focus_next(&mut self) {
        self.focus = self.focus.cycle(1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.cycle(-1);
    }

    /// Left/right on the focused control.
    pub fn adjust_focused(&mut self, step: isize) {
        match self.focus {
            FocusItem::Shape => self.set_shape(self.selection.shape.cycle(step)),
            FocusItem::Animation => self.set_animation(self.selection.animation.cycle(step)),
            FocusItem::Color => self.set_color(self.selection.color.cycle_preset(step)),
            FocusItem::Count => {
                self.set_spawn_count(self.selection.spawn_count.get() as i64 + step as i64)
            }
            FocusItem::Trail => self.toggle_trail(),
            FocusItem::Add => {}
        }
    }

    /// Enter/Space/click on the focused control.
    pub fn activate_focused(&mut self) {
        match self.focus {
            FocusItem::Shape | FocusItem::Animation | FocusItem::Count => self.adjust_focused(1),
            FocusItem::Color => self.open_color_dialog(),
            FocusItem::Trail => self.toggle_trail(),
            FocusItem::Add => {
                self.add_shapes();
            }
        }
    }

    /// Focus and activate the panel row under a click, if any.
    pub fn click(&mut self, x: u16, y: u16) {
        let screen = layout::screen_layout(self.viewport);
        if let Some(item) = layout::control_at(screen.controls, self.focus, x, y) {
            self.focus = item;
            self.activate_focused();
        }
    }

    // ── Dialogs ─────────────────────────────────────────────────

    pub fn open_color_dialog(&mut self) {
        self.dialog = Some(DialogKind::ColorInput {
            value: self.selection.color.to_string(),
            error: None,
        });
    }

    pub fn open_help(&mut self) {
        self.dialog = Some(DialogKind::Help);
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn confirm_dialog(&mut self) {
        let dialog = match self.dialog.take() {
            Some(d) => d,
            None => return,
        };
        match dialog {
            DialogKind::ColorInput { value, .. } => match value.parse::<HexColor>() {
                Ok(color) => self.set_color(color),
                Err(e) => {
                    self.dialog = Some(DialogKind::ColorInput {
                        value,
                        error: Some(e.to_string()),
                    });
                }
            },
            DialogKind::Help => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn app() -> App {
        let mut app = App::new(&Config::default(), StarField::seeded(10, 1));
        app.on_resize(120, 40);
        app
    }

    #[test]
    fn test_defaults_from_config() {
        let config = Config {
            shape: Shape::Star,
            trail: false,
            fps: 50,
            ..Config::default()
        };
        let app = App::new(&config, StarField::seeded(0, 0));
        assert_eq!(app.selection.shape, Shape::Star);
        assert!(!app.selection.trail_enabled);
        assert_eq!(app.tick_rate(), Duration::from_millis(20));
        assert_eq!(app.cursor_indicator(), None);
    }

    #[test]
    fn test_add_appends_exactly_n_preserving_order() {
        let mut app = app();
        app.set_spawn_count(3);
        assert_eq!(app.add_shapes(), 3);
        let first_batch = app.shapes.clone();

        app.set_shape(Shape::Square);
        app.set_animation(Animation::Bounce);
        app.set_spawn_count(7);
        assert_eq!(app.add_shapes(), 7);

        assert_eq!(app.shapes.len(), 10);
        assert_eq!(&app.shapes[..3], first_batch.as_slice());
        assert!(app.shapes[3..]
            .iter()
            .all(|s| s.shape == Shape::Square && s.animation == Animation::Bounce));
    }

    #[test]
    fn test_ids_unique_across_batches() {
        let mut app = app();
        app.set_spawn_count(20);
        for _ in 0..10 {
            app.add_shapes();
        }
        let ids: HashSet<_> = app.shapes.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_spawn_count_clamped_on_every_change() {
        let mut app = app();
        app.set_spawn_count(0);
        assert_eq!(app.selection.spawn_count.get(), 1);
        app.set_spawn_count(25);
        assert_eq!(app.selection.spawn_count.get(), 20);
        app.set_spawn_count(7);
        assert_eq!(app.selection.spawn_count.get(), 7);
        app.set_spawn_count_text("nope");
        assert_eq!(app.selection.spawn_count.get(), 1);
    }

    #[test]
    fn test_typing_into_count_field() {
        let mut app = app();
        app.set_spawn_count(2);
        app.push_count_digit('5');
        assert_eq!(app.selection.spawn_count.get(), 20);
        app.set_spawn_count(1);
        app.push_count_digit('2');
        assert_eq!(app.selection.spawn_count.get(), 12);
        app.pop_count_digit();
        assert_eq!(app.selection.spawn_count.get(), 1);
        app.pop_count_digit();
        assert_eq!(app.selection.spawn_count.get(), 1);
        app.push_count_digit('x');
        assert_eq!(app.selection.spawn_count.get(), 1);
    }

    #[test]
    fn test_trail_toggle_keeps_tracking_cursor() {
        let mut app = app();
        app.on_pointer_move(10, 5);
        assert_eq!(app.cursor_indicator(), Some(CursorPosition { x: 10, y: 5 }));
        app.toggle_trail();
        assert_eq!(app.cursor_indicator(), None);
        app.on_pointer_move(30, 8);
        app.toggle_trail();
        assert_eq!(app.cursor_indicator(), Some(CursorPosition { x: 30, y: 8 }));
    }

    #[test]
    fn test_hover_pauses_only_the_hovered_shape() {
        let mut app = app();
        app.set_spawn_count(2);
        app.add_shapes();
        let screen = layout::screen_layout(app.viewport);
        let slots = layout::shape_slots(screen.shapes, 2, screen.compact);
        let (a, b) = (app.shapes[0].id, app.shapes[1].id);

        app.on_pointer_move(slots[0].x + 1, slots[0].y + 1);
        assert_eq!(app.hovered_shape(), Some(a));
        for _ in 0..10 {
            app.on_tick();
        }
        assert_eq!(app.animation_clock(a), Duration::ZERO);
        assert_eq!(app.animation_clock(b), app.elapsed());

        app.on_pointer_move(0, 0);
        assert_eq!(app.hovered_shape(), None);
        app.on_tick();
        assert_eq!(app.animation_clock(a), app.tick_rate());
    }

    #[test]
    fn test_max_shapes_evicts_oldest() {
        let config = Config {
            max_shapes: Some(5),
            ..Config::default()
        };
        let mut app = App::new(&config, StarField::seeded(0, 0));
        app.set_spawn_count(3);
        app.add_shapes();
        let survivor = app.shapes[1].id;
        app.add_shapes();
        assert_eq!(app.shapes.len(), 5);
        assert_eq!(app.shapes[0].id, survivor);
    }

    #[test]
    fn test_color_dialog_validates() {
        let mut app = app();
        app.focus = FocusItem::Color;
        app.activate_focused();
        assert!(matches!(app.dialog, Some(DialogKind::ColorInput { .. })));

        app.dialog = Some(DialogKind::ColorInput {
            value: "#zzz".into(),
            error: None,
        });
        app.confirm_dialog();
        assert!(matches!(
            app.dialog,
            Some(DialogKind::ColorInput { error: Some(_), .. })
        ));
        assert_eq!(app.selection.color, HexColor::WHITE);

        app.dialog = Some(DialogKind::ColorInput {
            value: "#ff8800".into(),
            error: None,
        });
        app.confirm_dialog();
        assert_eq!(app.dialog, None);
        assert_eq!(app.selection.color, HexColor::new(0xff, 0x88, 0x00));
    }

    #[test]
    fn test_flash_expires() {
        let mut app = app();
        app.add_shapes();
        assert!(app.active_flash().is_some());
        for _ in 0..FLASH_TICKS {
            app.on_tick();
        }
        assert!(app.active_flash().is_none());
    }

    #[test]
    fn test_click_on_add_row() {
        let mut app = app();
        let screen = layout::screen_layout(app.viewport);
        let (_, add_row) = layout::control_rows(screen.controls, app.focus)
            .into_iter()
            .find(|(item, _)| *item == FocusItem::Add)
            .unwrap();
        app.click(add_row.x + 2, add_row.y);
        assert_eq!(app.focus, FocusItem::Add);
        assert_eq!(app.shapes.len(), 5);
    }
}
