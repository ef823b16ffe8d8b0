//! Terminal rendering module.
//!
//! Renders into a simple framebuffer that is flushed to a crossterm
//! backend, keeping `core` free of I/O. The view also publishes the
//! screen `Layout` the input layer uses for pointer hit-testing.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Frame, Glyph, Rgb, Style};
pub use game_view::{GameView, Layout, SlotRect, UiState, Viewport};
pub use renderer::TerminalRenderer;
