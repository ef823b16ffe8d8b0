//! Placement engine - validity, commit, line clears, scoring
//!
//! All operations work on an offset set plus a board-coordinate origin.
//! Validation is all-or-nothing: one bad cell rejects the whole placement.
//! Full rows AND full columns are identified from the pre-clear grid, then
//! the union is cleared together; a cell at the intersection of a full row
//! and a full column is cleared once but its row and column each still earn
//! the full line bonus.

use arrayvec::ArrayVec;

use crate::core::grid::Grid;
use crate::core::shapes::CellOffset;
use crate::types::{ColorTag, BOARD_SIZE, CELL_POINTS, LINE_POINTS, MAX_SHAPE_CELLS};

/// Absolute cells written by a commit
pub type CommittedCells = ArrayVec<(i8, i8), MAX_SHAPE_CELLS>;

/// Why a placement was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    SlotOutOfRange,
    OutOfBounds,
    Overlap,
}

impl PlacementError {
    pub fn code(self) -> &'static str {
        match self {
            PlacementError::SlotOutOfRange => "slot_out_of_range",
            PlacementError::OutOfBounds | PlacementError::Overlap => "invalid_placement",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlacementError::SlotOutOfRange => "no shape at that pool slot",
            PlacementError::OutOfBounds => "shape would leave the board",
            PlacementError::Overlap => "shape overlaps an occupied cell",
        }
    }
}

/// Rows and columns removed by a clear pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearReport {
    pub rows: u8,
    pub cols: u8,
}

impl ClearReport {
    pub fn lines(&self) -> u8 {
        self.rows + self.cols
    }
}

/// Check a placement and report the first kind of violation found.
/// Out-of-bounds is reported ahead of overlap when both apply.
pub fn validate(
    cells: &[CellOffset],
    origin_x: i8,
    origin_y: i8,
    grid: &Grid,
) -> Result<(), PlacementError> {
    for &(dx, dy) in cells {
        if grid.is_out_of_bounds(origin_x + dx, origin_y + dy) {
            return Err(PlacementError::OutOfBounds);
        }
    }
    for &(dx, dy) in cells {
        if grid.is_occupied(origin_x + dx, origin_y + dy) {
            return Err(PlacementError::Overlap);
        }
    }
    Ok(())
}

/// True if every absolute cell is inside [0, BOARD_SIZE) and unoccupied
pub fn can_place(cells: &[CellOffset], origin_x: i8, origin_y: i8, grid: &Grid) -> bool {
    validate(cells, origin_x, origin_y, grid).is_ok()
}

/// Write the color tag into every absolute cell.
/// Contract: the caller has already validated with [`can_place`]; commit
/// performs no re-validation.
pub fn commit(
    cells: &[CellOffset],
    origin_x: i8,
    origin_y: i8,
    color: ColorTag,
    grid: &mut Grid,
) -> CommittedCells {
    let mut written = CommittedCells::new();
    for &(dx, dy) in cells {
        let x = origin_x + dx;
        let y = origin_y + dy;
        grid.set(x, y, Some(color));
        written.push((x, y));
    }
    written
}

/// Clear every full row and full column, identified before any cell is
/// removed, and report how many of each were cleared.
pub fn clear_full(grid: &mut Grid) -> ClearReport {
    let size = BOARD_SIZE as usize;

    let mut full_rows = [false; BOARD_SIZE as usize];
    let mut full_cols = [false; BOARD_SIZE as usize];

    for y in 0..size {
        full_rows[y] = grid.is_row_full(y);
    }
    for x in 0..size {
        full_cols[x] = grid.is_col_full(x);
    }

    let mut report = ClearReport::default();

    for (y, &full) in full_rows.iter().enumerate() {
        if !full {
            continue;
        }
        report.rows += 1;
        for x in 0..size {
            grid.clear_cell(x as i8, y as i8);
        }
    }
    for (x, &full) in full_cols.iter().enumerate() {
        if !full {
            continue;
        }
        report.cols += 1;
        for y in 0..size {
            grid.clear_cell(x as i8, y as i8);
        }
    }

    report
}

/// Score for a committed placement.
/// A row and a column clearing simultaneously each contribute their full
/// line bonus; the intersection is NOT deduplicated (pinned behavior).
pub fn score_for_placement(cells_placed: usize, cleared: &ClearReport) -> u32 {
    let cell_points = (cells_placed as u32).saturating_mul(CELL_POINTS);
    let line_points = (cleared.lines() as u32).saturating_mul(LINE_POINTS);
    cell_points.saturating_add(line_points)
}
