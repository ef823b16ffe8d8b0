//! Terminal block puzzle.
//!
//! `core` holds the pure placement/clear/score engine and session state;
//! `term`, `input`, and `persist` are the I/O collaborators around it.

pub mod core;
pub mod input;
pub mod persist;
pub mod term;
pub mod types;
