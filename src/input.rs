//! Terminal key events to game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::{Action, InputEvent, Screen};

/// Map a key to a game input. Space means "fire" while playing and
/// "confirm" on the menu screens.
pub fn translate(key: &KeyEvent, screen: Screen) -> Option<InputEvent> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputEvent::press(Action::Quit));
    }

    let action = match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Action::MoveRight,
        KeyCode::Char(' ') if screen == Screen::Playing => Action::Fire,
        KeyCode::Char(' ') | KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
        _ => return None,
    };

    let movement = matches!(action, Action::MoveLeft | Action::MoveRight);
    match key.kind {
        KeyEventKind::Press => Some(InputEvent::press(action)),
        // auto-repeat only matters for held movement keys
        KeyEventKind::Repeat if movement => Some(InputEvent::press(action)),
        KeyEventKind::Repeat => None,
        KeyEventKind::Release => Some(InputEvent::release(action)),
    }
}

/// Synthesises releases for terminals that never report them.
///
/// Without release events a held arrow key shows up as a stream of
/// presses. Each press re-arms a countdown; when it runs out the movement
/// is released.
#[derive(Debug, Clone)]
pub struct HoldTimer {
    hold_frames: u32,
    left: u32,
    right: u32,
}

impl HoldTimer {
    pub fn new(hold_frames: u32) -> Self {
        Self {
            hold_frames,
            left: 0,
            right: 0,
        }
    }

    pub fn observe(&mut self, event: &InputEvent) {
        if !event.pressed {
            return;
        }
        match event.action {
            Action::MoveLeft => {
                self.left = self.hold_frames;
                self.right = 0;
            }
            Action::MoveRight => {
                self.right = self.hold_frames;
                self.left = 0;
            }
            _ => {}
        }
    }

    /// Count one frame down; returns the releases that fell due.
    pub fn tick(&mut self) -> Vec<InputEvent> {
        let mut due = Vec::new();
        for (counter, action) in [
            (&mut self.left, Action::MoveLeft),
            (&mut self.right, Action::MoveRight),
        ] {
            if *counter > 0 {
                *counter -= 1;
                if *counter == 0 {
                    due.push(InputEvent::release(action));
                }
            }
        }
        due
    }
}
