//! Core module - pure game logic with no external dependencies
//!
//! This module contains all the game rules, state management, and logic.
//! It has zero dependencies on UI, persistence, or I/O.

pub mod grid;
pub mod placement;
pub mod rng;
pub mod session;
pub mod shapes;

// Re-export commonly used types
pub use grid::Grid;
pub use placement::{can_place, clear_full, commit, score_for_placement};
pub use placement::{ClearReport, PlacementError};
pub use rng::{ShapeDealer, SimpleRng};
pub use session::{GameSession, PlacementReport, ShapePool};
pub use shapes::{normalize, rotate_offsets, OffsetSet, ShapeInstance, ShapeTemplate, CATALOG};
