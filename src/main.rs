//! Terminal block puzzle runner (default binary).
//!
//! Loads the persisted session when a valid snapshot exists, otherwise
//! starts fresh with a clock-derived seed. Saves best-effort after every
//! committed mutation; a failed save never interrupts play.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_blocks::core::GameSession;
use tui_blocks::input::{should_quit, InputEvent, InputHandler};
use tui_blocks::persist::{restore_session, snapshot_session, FileStore, SaveStore};
use tui_blocks::term::{GameView, TerminalRenderer, UiState, Viewport};
use tui_blocks::types::GameIntent;

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let store = FileStore::from_env();
    let mut session = load_or_fresh(&store);

    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let ui = UiState {
                cursor: input.cursor(),
            };
            let frame = view.render(&session, &ui, Viewport::new(w, h));
            term.draw(&frame)?;
            dirty = false;
        }

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let layout = view.layout(Viewport::new(w, h));

        let input_event = match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if should_quit(key) {
                    return Ok(());
                }
                input.handle_key(key.code)
            }
            Event::Mouse(mouse) => input.handle_mouse(mouse, &layout),
            Event::Resize(..) => {
                dirty = true;
                continue;
            }
            _ => None,
        };

        match input_event {
            Some(InputEvent::CursorMoved) => {
                dirty = true;
            }
            Some(InputEvent::Intent(intent)) => {
                let accepted = session.apply_intent(intent);
                input.sync_selection(session.selected());

                if accepted && mutates_saved_state(intent) {
                    let _ = store.save(&snapshot_session(&session));
                }
                dirty = true;
            }
            None => {}
        }
    }
}

/// Load the persisted session, falling back to a fresh one on a missing
/// or corrupt payload.
fn load_or_fresh(store: &FileStore) -> GameSession {
    store
        .load()
        .and_then(|save| restore_session(&save))
        .unwrap_or_else(|| GameSession::new(clock_seed()))
}

/// Intents whose acceptance changes what the save file should hold.
fn mutates_saved_state(intent: GameIntent) -> bool {
    matches!(
        intent,
        GameIntent::Place { .. } | GameIntent::Rotate(_) | GameIntent::Undo | GameIntent::Reset
    )
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
