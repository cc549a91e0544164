//! Raw terminal events → game commands.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::display::Viewport;
use crate::entities::Command;

pub fn map_key(key: &KeyEvent) -> Option<Command> {
    // Held keys auto-repeat; one flap per physical press.
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Command::Flap)
        }
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Enter => Some(Command::Confirm),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        _ => None,
    }
}

/// Left-button presses become clicks at the matching world coordinate.
pub fn map_mouse(mouse: &MouseEvent, view: &Viewport) -> Option<Command> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let (x, y) = view.to_world(mouse.column, mouse.row);
            Some(Command::Click { x, y })
        }
        _ => None,
    }
}

pub fn map_event(event: &Event, view: &Viewport) -> Option<Command> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse, view),
        _ => None,
    }
}
