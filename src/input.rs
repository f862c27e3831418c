use crate::app::App;
use crate::types::*;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Route one terminal event into the app.
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        // Only handle key press events, ignore release/repeat
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Resize(width, height) => app.on_resize(width, height),
        _ => {}
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            app.on_pointer_move(mouse.column, mouse.row);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            app.on_pointer_move(mouse.column, mouse.row);
            if app.dialog.is_none() {
                app.click(mouse.column, mouse.row);
            }
        }
        _ => {}
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // If a dialog is open, route input there
    if app.dialog.is_some() {
        handle_dialog_key(app, key);
        return;
    }

    // Shift+Tab
    if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
        app.focus_prev();
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('?') => app.open_help(),
        KeyCode::Char('a') => {
            app.add_shapes();
        }
        KeyCode::Char('t') => app.toggle_trail(),
        KeyCode::Char('c') => app.open_color_dialog(),
        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => app.focus_prev(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => app.adjust_focused(1),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => app.adjust_focused(-1),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_focused(),
        KeyCode::Char(d) if d.is_ascii_digit() && app.focus == FocusItem::Count => {
            app.push_count_digit(d);
        }
        KeyCode::Backspace | KeyCode::Delete if app.focus == FocusItem::Count => {
            app.pop_count_digit();
        }
        _ => {}
    }
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match &app.dialog {
        Some(DialogKind::ColorInput { .. }) => handle_color_input_key(app, key),
        Some(DialogKind::Help) => app.close_dialog(),
        None => {}
    }
}

fn handle_color_input_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Enter => app.confirm_dialog(),
        KeyCode::Backspace => {
            if let Some(DialogKind::ColorInput { value, error }) = &mut app.dialog {
                value.pop();
                *error = None;
            }
        }
        KeyCode::Char(c) if c == '#' || c.is_ascii_hexdigit() => {
            if let Some(DialogKind::ColorInput { value, error }) = &mut app.dialog {
                if value.len() < 7 {
                    value.push(c);
                }
                *error = None;
            }
        }
        _ => {}
    }
}
