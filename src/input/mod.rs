//! Input module - translates terminal events into game intents.

pub mod handler;

pub use handler::{should_quit, InputEvent, InputHandler};
