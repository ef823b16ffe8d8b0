//! Persistence module - best-effort session snapshots
//!
//! The payload is a small JSON document: one string row per grid line
//! (`.` = empty, otherwise a color code) plus the pool's offset sets.
//! Loading is forgiving by contract: a missing, unreadable, or
//! structurally invalid payload is treated as absent and the caller falls
//! back to a fresh session. Saving is fire-and-forget; the runner ignores
//! its failure.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{GameSession, Grid, ShapeInstance};
use crate::types::{ColorTag, BOARD_SIZE, POOL_SIZE};

/// Bumped when the payload shape changes; older payloads load as absent
pub const SAVE_VERSION: u32 = 1;

/// Environment override for the save file location
pub const SAVE_PATH_ENV: &str = "TUI_BLOCKS_SAVE";

const DEFAULT_SAVE_FILE: &str = "tui-blocks-save.json";

/// One pool entry as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedShape {
    pub color: String,
    pub cells: Vec<(i8, i8)>,
}

/// The full persisted payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: u32,
    pub seed: u32,
    pub score: u32,
    pub grid: Vec<String>,
    pub pool: Vec<SavedShape>,
}

/// Encode a session into a persistable payload
pub fn snapshot_session(session: &GameSession) -> SaveGame {
    let size = BOARD_SIZE as usize;
    let mut rows = Vec::with_capacity(size);
    for y in 0..size {
        let mut row = String::with_capacity(size);
        for x in 0..size {
            let cell = session.grid().get(x as i8, y as i8).unwrap_or(None);
            row.push(match cell {
                Some(tag) => tag.code(),
                None => '.',
            });
        }
        rows.push(row);
    }

    let pool = session
        .pool()
        .iter()
        .map(|shape| SavedShape {
            color: shape.color().as_str().to_string(),
            cells: shape.cells().to_vec(),
        })
        .collect();

    SaveGame {
        version: SAVE_VERSION,
        seed: session.seed(),
        score: session.score(),
        grid: rows,
        pool,
    }
}

/// Decode a payload back into a session.
/// Returns None on any structural problem: wrong version, bad grid
/// dimensions, unknown cell code, or a malformed pool entry.
pub fn restore_session(save: &SaveGame) -> Option<GameSession> {
    if save.version != SAVE_VERSION {
        return None;
    }

    let size = BOARD_SIZE as usize;
    if save.grid.len() != size {
        return None;
    }

    let mut grid = Grid::new();
    for (y, row) in save.grid.iter().enumerate() {
        if row.chars().count() != size {
            return None;
        }
        for (x, ch) in row.chars().enumerate() {
            if ch == '.' {
                continue;
            }
            let tag = ColorTag::from_code(ch)?;
            grid.set(x as i8, y as i8, Some(tag));
        }
    }

    if save.pool.len() > POOL_SIZE {
        return None;
    }
    let mut pool = Vec::with_capacity(save.pool.len());
    for entry in &save.pool {
        let color = ColorTag::from_str(&entry.color)?;
        let shape = ShapeInstance::from_parts(&entry.cells, color)?;
        pool.push(shape);
    }

    Some(GameSession::from_saved(grid, save.score, pool, save.seed))
}

/// Where session snapshots live
pub trait SaveStore {
    fn save(&self, payload: &SaveGame) -> Result<()>;
    fn load(&self) -> Option<SaveGame>;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Default location, overridable through `TUI_BLOCKS_SAVE`
    pub fn from_env() -> Self {
        let path = std::env::var_os(SAVE_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_FILE));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for FileStore {
    fn save(&self, payload: &SaveGame) -> Result<()> {
        let json = serde_json::to_string_pretty(payload)?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing save file {}", self.path.display()))?;
        Ok(())
    }

    fn load(&self) -> Option<SaveGame> {
        let json = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&json).ok()
    }
}
