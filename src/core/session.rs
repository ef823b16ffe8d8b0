//! Session module - turn orchestration over the grid, pool, and score
//!
//! Owns the grid, the 3-shape pool, the score, and a single-slot undo
//! snapshot. Every transition is synchronous and total: invalid requests
//! are rejected without touching state. There are no process-wide
//! singletons; callers hold the session and may run several side by side.

use arrayvec::ArrayVec;

use crate::core::grid::Grid;
use crate::core::placement::{self, PlacementError};
use crate::core::rng::ShapeDealer;
use crate::core::shapes::ShapeInstance;
use crate::types::{GameIntent, BOARD_SIZE, POOL_SIZE};

/// Shapes currently offered to the player
pub type ShapePool = ArrayVec<ShapeInstance, POOL_SIZE>;

/// Deep copy of the undoable state, taken immediately before a commit
#[derive(Debug, Clone)]
struct Snapshot {
    grid: Grid,
    score: u32,
    pool: ShapePool,
}

/// What a successful placement did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementReport {
    pub cells_placed: usize,
    pub rows_cleared: u8,
    pub cols_cleared: u8,
    pub points: u32,
}

/// Complete game session state
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    score: u32,
    pool: ShapePool,
    dealer: ShapeDealer,
    selected: Option<usize>,
    history: Option<Snapshot>,
}

impl GameSession {
    /// Create a fresh session with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut dealer = ShapeDealer::new(seed);
        let pool = dealer.deal_pool();
        Self {
            grid: Grid::new(),
            score: 0,
            pool,
            dealer,
            selected: None,
            history: None,
        }
    }

    /// Rebuild a session from persisted parts.
    /// An empty saved pool is refilled so the player always has shapes.
    pub fn from_saved(grid: Grid, score: u32, pool: Vec<ShapeInstance>, seed: u32) -> Self {
        let mut dealer = ShapeDealer::new(seed);
        let mut bounded = ShapePool::new();
        for shape in pool.into_iter().take(POOL_SIZE) {
            bounded.push(shape);
        }
        if bounded.is_empty() {
            bounded = dealer.deal_pool();
        }
        Self {
            grid,
            score,
            pool: bounded,
            dealer,
            selected: None,
            history: None,
        }
    }

    /// Fresh empty grid, zero score, new random pool; history cleared
    pub fn reset(&mut self) {
        let seed = self.dealer.seed();
        *self = Self::new(seed);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn pool(&self) -> &[ShapeInstance] {
        &self.pool
    }

    pub fn shape(&self, slot: usize) -> Option<&ShapeInstance> {
        self.pool.get(slot)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn has_undo(&self) -> bool {
        self.history.is_some()
    }

    /// Seed for persisting the draw sequence
    pub fn seed(&self) -> u32 {
        self.dealer.seed()
    }

    #[cfg(test)]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Mark a pool slot as the active placement candidate.
    /// Gesture bookkeeping (tap counts) belongs to the input layer; the
    /// session only records which slot is armed.
    pub fn select_shape(&mut self, slot: usize) -> bool {
        if slot >= self.pool.len() {
            return false;
        }
        self.selected = Some(slot);
        true
    }

    /// Rotate a pool entry 90 degrees (rotate + renormalize)
    pub fn rotate(&mut self, slot: usize) -> bool {
        match self.pool.get_mut(slot) {
            Some(shape) => {
                shape.rotate();
                true
            }
            None => false,
        }
    }

    /// Validate and, if valid, commit a placement.
    ///
    /// On success the pre-placement state is snapshotted into the
    /// single-slot history, the shape leaves the pool, full lines are
    /// cleared, the score is bumped, and an empty pool is refilled. On
    /// rejection every piece of state, the history included, is untouched.
    pub fn attempt_placement(
        &mut self,
        slot: usize,
        x: i8,
        y: i8,
    ) -> Result<PlacementReport, PlacementError> {
        let shape = self.pool.get(slot).ok_or(PlacementError::SlotOutOfRange)?;
        placement::validate(shape.cells(), x, y, &self.grid)?;

        self.history = Some(Snapshot {
            grid: self.grid.clone(),
            score: self.score,
            pool: self.pool.clone(),
        });

        let shape = self.pool.remove(slot);
        let written = placement::commit(shape.cells(), x, y, shape.color(), &mut self.grid);
        let cleared = placement::clear_full(&mut self.grid);
        let points = placement::score_for_placement(written.len(), &cleared);
        self.score = self.score.saturating_add(points);

        if self.pool.is_empty() {
            self.pool = self.dealer.deal_pool();
        }
        self.selected = None;

        Ok(PlacementReport {
            cells_placed: written.len(),
            rows_cleared: cleared.rows,
            cols_cleared: cleared.cols,
            points,
        })
    }

    /// Restore the pre-placement snapshot, consuming it.
    /// Returns false ("nothing to undo") when no snapshot exists.
    pub fn undo(&mut self) -> bool {
        match self.history.take() {
            Some(snapshot) => {
                self.grid = snapshot.grid;
                self.score = snapshot.score;
                self.pool = snapshot.pool;
                self.selected = None;
                true
            }
            None => false,
        }
    }

    /// True when no pool shape fits anywhere on the grid.
    /// Advisory only: undo and reset remain available.
    pub fn is_stuck(&self) -> bool {
        for shape in &self.pool {
            for y in 0..BOARD_SIZE as i8 {
                for x in 0..BOARD_SIZE as i8 {
                    if placement::can_place(shape.cells(), x, y, &self.grid) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Single dispatch point for the input layer.
    /// Returns whether the intent was accepted (state changed or armed).
    pub fn apply_intent(&mut self, intent: GameIntent) -> bool {
        match intent {
            GameIntent::Select(slot) => self.select_shape(slot),
            GameIntent::Rotate(slot) => self.rotate(slot),
            GameIntent::Place { slot, x, y } => self.attempt_placement(slot, x, y).is_ok(),
            GameIntent::Undo => self.undo(),
            GameIntent::Reset => {
                self.reset();
                true
            }
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shapes::{ShapeInstance, CATALOG};
    use crate::types::ColorTag;

    fn template(name: &str) -> ShapeInstance {
        ShapeInstance::from_template(CATALOG.iter().find(|t| t.name == name).unwrap())
    }

    /// Session whose pool is forced to known shapes
    fn session_with_pool(names: &[&str]) -> GameSession {
        let mut session = GameSession::new(12345);
        session.pool.clear();
        for name in names {
            session.pool.push(template(name));
        }
        session
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new(12345);

        assert_eq!(session.score(), 0);
        assert_eq!(session.pool().len(), POOL_SIZE);
        assert_eq!(session.selected(), None);
        assert!(!session.has_undo());
        assert_eq!(session.grid().occupied_cells(), 0);
    }

    #[test]
    fn test_select_shape_bounds_checked() {
        let mut session = GameSession::new(1);

        assert!(session.select_shape(0));
        assert_eq!(session.selected(), Some(0));

        assert!(!session.select_shape(POOL_SIZE));
        // Failed select leaves the previous selection armed.
        assert_eq!(session.selected(), Some(0));
    }

    #[test]
    fn test_rotate_pool_entry() {
        let mut session = session_with_pool(&["bar3"]);
        assert_eq!(session.shape(0).unwrap().width(), 3);

        assert!(session.rotate(0));
        assert_eq!(session.shape(0).unwrap().width(), 1);
        assert_eq!(session.shape(0).unwrap().height(), 3);

        assert!(!session.rotate(7));
    }

    #[test]
    fn test_placement_scores_and_removes_shape() {
        let mut session = session_with_pool(&["square2", "dot"]);

        let report = session.attempt_placement(0, 0, 0).unwrap();
        assert_eq!(report.cells_placed, 4);
        assert_eq!(report.rows_cleared, 0);
        assert_eq!(report.cols_cleared, 0);
        assert_eq!(report.points, 40);

        assert_eq!(session.score(), 40);
        assert_eq!(session.pool().len(), 1);
        assert!(session.grid().is_occupied(0, 0));
        assert!(session.grid().is_occupied(1, 1));
    }

    #[test]
    fn test_rejection_leaves_all_state_untouched() {
        let mut session = session_with_pool(&["square2"]);
        session.select_shape(0);

        // Out of bounds.
        assert_eq!(
            session.attempt_placement(0, 9, 9),
            Err(PlacementError::OutOfBounds)
        );
        // Bad slot.
        assert_eq!(
            session.attempt_placement(5, 0, 0),
            Err(PlacementError::SlotOutOfRange)
        );

        assert_eq!(session.score(), 0);
        assert_eq!(session.pool().len(), 1);
        assert_eq!(session.selected(), Some(0));
        assert!(!session.has_undo(), "rejection must not write history");
        assert_eq!(session.grid().occupied_cells(), 0);
    }

    #[test]
    fn test_overlap_rejected() {
        let mut session = session_with_pool(&["dot", "dot"]);
        session.attempt_placement(0, 4, 4).unwrap();

        assert_eq!(
            session.attempt_placement(0, 4, 4),
            Err(PlacementError::Overlap)
        );
    }

    #[test]
    fn test_placement_clearing_a_row() {
        let mut session = session_with_pool(&["bar2"]);
        // Fill row 0 except its last two cells.
        for x in 0..8 {
            session.grid_mut().set(x, 0, Some(ColorTag::Amber));
        }

        let report = session.attempt_placement(0, 8, 0).unwrap();
        assert_eq!(report.rows_cleared, 1);
        assert_eq!(report.cols_cleared, 0);
        assert_eq!(report.points, 2 * 10 + 100);

        // The whole row is empty again.
        for x in 0..BOARD_SIZE as i8 {
            assert!(session.grid().is_free(x, 0));
        }
    }

    #[test]
    fn test_pool_refills_only_when_emptied() {
        let mut session = session_with_pool(&["dot", "dot", "dot"]);

        session.attempt_placement(0, 0, 0).unwrap();
        assert_eq!(session.pool().len(), 2);

        session.attempt_placement(0, 2, 0).unwrap();
        assert_eq!(session.pool().len(), 1);

        session.attempt_placement(0, 4, 0).unwrap();
        // Last shape placed: refilled to exactly POOL_SIZE new shapes.
        assert_eq!(session.pool().len(), POOL_SIZE);
    }

    #[test]
    fn test_undo_restores_pre_placement_state() {
        let mut session = session_with_pool(&["square2", "dot"]);
        let grid_before = session.grid().clone();
        let pool_before: Vec<_> = session.pool().to_vec();

        session.attempt_placement(0, 3, 3).unwrap();
        assert_ne!(session.grid(), &grid_before);

        assert!(session.undo());
        assert_eq!(session.grid(), &grid_before);
        assert_eq!(session.score(), 0);
        assert_eq!(session.pool(), pool_before.as_slice());

        // Second consecutive undo signals "nothing to undo".
        assert!(!session.undo());
    }

    #[test]
    fn test_undo_after_refill_restores_old_pool() {
        let mut session = session_with_pool(&["dot"]);
        let pool_before: Vec<_> = session.pool().to_vec();

        session.attempt_placement(0, 0, 0).unwrap();
        assert_eq!(session.pool().len(), POOL_SIZE);

        assert!(session.undo());
        assert_eq!(session.pool(), pool_before.as_slice());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = session_with_pool(&["dot", "dot"]);
        session.attempt_placement(0, 0, 0).unwrap();
        session.select_shape(0);

        session.reset();
        assert_eq!(session.score(), 0);
        assert_eq!(session.grid().occupied_cells(), 0);
        assert_eq!(session.pool().len(), POOL_SIZE);
        assert_eq!(session.selected(), None);
        assert!(!session.has_undo());
    }

    #[test]
    fn test_is_stuck_detection() {
        let mut session = session_with_pool(&["square3"]);
        assert!(!session.is_stuck());

        // Checkerboard leaves no 3x3 hole anywhere.
        for y in 0..BOARD_SIZE as i8 {
            for x in 0..BOARD_SIZE as i8 {
                if (x + y) % 2 == 0 {
                    session.grid_mut().set(x, y, Some(ColorTag::Teal));
                }
            }
        }
        assert!(session.is_stuck());
    }

    #[test]
    fn test_apply_intent_dispatch() {
        let mut session = session_with_pool(&["dot", "bar2"]);

        assert!(session.apply_intent(GameIntent::Select(1)));
        assert!(session.apply_intent(GameIntent::Rotate(1)));
        assert!(session.apply_intent(GameIntent::Place { slot: 0, x: 0, y: 0 }));
        assert!(session.apply_intent(GameIntent::Undo));
        assert!(!session.apply_intent(GameIntent::Undo));
        assert!(session.apply_intent(GameIntent::Reset));

        assert!(!session.apply_intent(GameIntent::Select(POOL_SIZE)));
    }

    #[test]
    fn test_from_saved_refills_empty_pool() {
        let session = GameSession::from_saved(Grid::new(), 120, Vec::new(), 7);
        assert_eq!(session.score(), 120);
        assert_eq!(session.pool().len(), POOL_SIZE);
    }

    #[test]
    fn test_deterministic_pools_for_equal_seeds() {
        let a = GameSession::new(2024);
        let b = GameSession::new(2024);
        assert_eq!(a.pool(), b.pool());
    }
}
