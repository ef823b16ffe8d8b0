//! Grid tests - bounds, occupancy, and full-line queries

use tui_blocks::core::Grid;
use tui_blocks::types::{ColorTag, BOARD_SIZE};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.size(), BOARD_SIZE);

    for y in 0..BOARD_SIZE as i8 {
        for x in 0..BOARD_SIZE as i8 {
            assert!(grid.is_free(x, y), "Cell ({}, {}) should be free", x, y);
            assert_eq!(grid.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::new();

    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(BOARD_SIZE as i8, 0), None);
    assert_eq!(grid.get(0, BOARD_SIZE as i8), None);
}

#[test]
fn test_grid_set_and_clear() {
    let mut grid = Grid::new();

    assert!(grid.set(5, 7, Some(ColorTag::Teal)));
    assert_eq!(grid.get(5, 7), Some(Some(ColorTag::Teal)));
    assert!(grid.is_occupied(5, 7));
    assert!(!grid.is_free(5, 7));

    assert!(grid.clear_cell(5, 7));
    assert_eq!(grid.get(5, 7), Some(None));
}

#[test]
fn test_grid_set_out_of_bounds() {
    let mut grid = Grid::new();

    assert!(!grid.set(-1, 0, Some(ColorTag::Amber)));
    assert!(!grid.set(0, -1, Some(ColorTag::Amber)));
    assert!(!grid.set(BOARD_SIZE as i8, 0, Some(ColorTag::Amber)));
    assert!(!grid.set(0, BOARD_SIZE as i8, Some(ColorTag::Amber)));
}

#[test]
fn test_grid_out_of_bounds_is_neither_free_nor_occupied() {
    let grid = Grid::new();

    assert!(!grid.is_free(-1, 0));
    assert!(!grid.is_occupied(-1, 0));
    assert!(grid.is_out_of_bounds(10, 3));
    assert!(!grid.is_out_of_bounds(9, 3));
}

#[test]
fn test_grid_is_row_full() {
    let mut grid = Grid::new();
    assert!(!grid.is_row_full(5));

    for x in 0..BOARD_SIZE {
        grid.set(x as i8, 5, Some(ColorTag::Jade));
    }
    assert!(grid.is_row_full(5));

    // One gap breaks fullness.
    grid.clear_cell(9, 5);
    assert!(!grid.is_row_full(5));

    // Index past the edge is never full.
    assert!(!grid.is_row_full(BOARD_SIZE as usize));
}

#[test]
fn test_grid_is_col_full() {
    let mut grid = Grid::new();
    assert!(!grid.is_col_full(2));

    for y in 0..BOARD_SIZE {
        grid.set(2, y as i8, Some(ColorTag::Rose));
    }
    assert!(grid.is_col_full(2));

    grid.clear_cell(2, 0);
    assert!(!grid.is_col_full(2));
}

#[test]
fn test_grid_clear_empties_everything() {
    let mut grid = Grid::new();
    for x in 0..BOARD_SIZE {
        grid.set(x as i8, 3, Some(ColorTag::Sand));
    }
    assert_eq!(grid.occupied_cells(), BOARD_SIZE as usize);

    grid.clear();
    assert_eq!(grid.occupied_cells(), 0);
}

#[test]
fn test_grid_clone_snapshot_independent() {
    let mut grid = Grid::new();
    grid.set(1, 1, Some(ColorTag::Lilac));

    let snapshot = grid.clone();
    grid.set(1, 1, None);

    assert!(snapshot.is_occupied(1, 1));
    assert!(grid.is_free(1, 1));
}
