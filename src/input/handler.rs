//! Input handler: key and pointer events to game intents.
//!
//! All gesture disambiguation lives here, outside the core. Activating a
//! pool slot arms it; activating the armed slot again rotates it (the
//! tap-twice interaction). Placement is a separate intent so front-ends
//! can wire tap-to-place, tap-to-rotate, or drag-to-place without core
//! changes. The handler never touches the session; the runner applies the
//! produced intents and then syncs the armed slot back.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::term::Layout;
use crate::types::{GameIntent, BOARD_SIZE, POOL_SIZE};

/// What an input event asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Forward an intent to the session.
    Intent(GameIntent),
    /// The preview cursor moved; redraw.
    CursorMoved,
}

/// Quit keys work regardless of handler state.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
}

/// Tracks the preview cursor and the armed pool slot.
#[derive(Debug, Clone)]
pub struct InputHandler {
    cursor: (i8, i8),
    armed: Option<usize>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            cursor: (4, 4),
            armed: None,
        }
    }

    pub fn cursor(&self) -> (i8, i8) {
        self.cursor
    }

    /// Re-sync the armed slot with the session's selection.
    /// The session clears its selection after placements, undo, and reset;
    /// the runner calls this after every applied intent.
    pub fn sync_selection(&mut self, selected: Option<usize>) {
        self.armed = selected;
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Option<InputEvent> {
        match code {
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),

            KeyCode::Char(ch @ '1'..='3') => {
                let slot = (ch as usize) - ('1' as usize);
                Some(InputEvent::Intent(self.tap_slot(slot)))
            }
            KeyCode::Tab => {
                // Cycling always arms, never rotates.
                let slot = match self.armed {
                    Some(slot) => (slot + 1) % POOL_SIZE,
                    None => 0,
                };
                self.armed = Some(slot);
                Some(InputEvent::Intent(GameIntent::Select(slot)))
            }
            KeyCode::Char('r') => self
                .armed
                .map(|slot| InputEvent::Intent(GameIntent::Rotate(slot))),

            KeyCode::Enter | KeyCode::Char(' ') => self.armed.map(|slot| {
                InputEvent::Intent(GameIntent::Place {
                    slot,
                    x: self.cursor.0,
                    y: self.cursor.1,
                })
            }),

            KeyCode::Char('u') => Some(InputEvent::Intent(GameIntent::Undo)),
            KeyCode::Char('n') => Some(InputEvent::Intent(GameIntent::Reset)),
            _ => None,
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent, layout: &Layout) -> Option<InputEvent> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(slot) = layout.pool_slot_at(event.column, event.row) {
                    return Some(InputEvent::Intent(self.tap_slot(slot)));
                }
                if let Some((x, y)) = layout.board_cell_at(event.column, event.row) {
                    self.cursor = (x, y);
                    return match self.armed {
                        Some(slot) => Some(InputEvent::Intent(GameIntent::Place { slot, x, y })),
                        None => Some(InputEvent::CursorMoved),
                    };
                }
                None
            }
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                // Hover drives the placement preview.
                let (x, y) = layout.board_cell_at(event.column, event.row)?;
                if (x, y) == self.cursor {
                    return None;
                }
                self.cursor = (x, y);
                Some(InputEvent::CursorMoved)
            }
            _ => None,
        }
    }

    /// First tap arms a slot, a second tap on the same slot rotates it.
    fn tap_slot(&mut self, slot: usize) -> GameIntent {
        if self.armed == Some(slot) {
            GameIntent::Rotate(slot)
        } else {
            self.armed = Some(slot);
            GameIntent::Select(slot)
        }
    }

    fn move_cursor(&mut self, dx: i8, dy: i8) -> Option<InputEvent> {
        let max = BOARD_SIZE as i8 - 1;
        let next = (
            (self.cursor.0 + dx).clamp(0, max),
            (self.cursor.1 + dy).clamp(0, max),
        );
        if next == self.cursor {
            return None;
        }
        self.cursor = next;
        Some(InputEvent::CursorMoved)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
