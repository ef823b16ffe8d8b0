//! Shapes module - catalog templates and offset-set transforms
//!
//! A shape is an ordered set of (x, y) cell offsets relative to its own
//! origin, plus a color tag. Templates are immutable catalog entries;
//! instances are runtime copies whose offsets rotation rewrites in place.
//! There is no stored rotation state: each rotation recomputes the offsets
//! and renormalizes them so min x and min y are both 0.

use arrayvec::ArrayVec;

use crate::types::{ColorTag, MAX_SHAPE_CELLS};

/// Offset of a single cell relative to the shape origin
pub type CellOffset = (i8, i8);

/// Offset set of a shape instance
pub type OffsetSet = ArrayVec<CellOffset, MAX_SHAPE_CELLS>;

/// Immutable catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeTemplate {
    pub name: &'static str,
    pub cells: &'static [CellOffset],
    pub color: ColorTag,
}

/// The finite shape library offered to the player
pub const CATALOG: [ShapeTemplate; 12] = [
    ShapeTemplate {
        name: "dot",
        cells: &[(0, 0)],
        color: ColorTag::Sand,
    },
    ShapeTemplate {
        name: "bar2",
        cells: &[(0, 0), (1, 0)],
        color: ColorTag::Azure,
    },
    ShapeTemplate {
        name: "bar3",
        cells: &[(0, 0), (1, 0), (2, 0)],
        color: ColorTag::Coral,
    },
    ShapeTemplate {
        name: "bar4",
        cells: &[(0, 0), (1, 0), (2, 0), (3, 0)],
        color: ColorTag::Amber,
    },
    ShapeTemplate {
        name: "bar5",
        cells: &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)],
        color: ColorTag::Rose,
    },
    ShapeTemplate {
        name: "square2",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
        color: ColorTag::Jade,
    },
    ShapeTemplate {
        name: "square3",
        cells: &[
            (0, 0),
            (1, 0),
            (2, 0),
            (0, 1),
            (1, 1),
            (2, 1),
            (0, 2),
            (1, 2),
            (2, 2),
        ],
        color: ColorTag::Teal,
    },
    ShapeTemplate {
        name: "corner3",
        cells: &[(0, 0), (1, 0), (0, 1)],
        color: ColorTag::Lilac,
    },
    ShapeTemplate {
        name: "corner5",
        cells: &[(0, 0), (1, 0), (2, 0), (0, 1), (0, 2)],
        color: ColorTag::Azure,
    },
    ShapeTemplate {
        name: "ell4",
        cells: &[(0, 0), (0, 1), (0, 2), (1, 2)],
        color: ColorTag::Coral,
    },
    ShapeTemplate {
        name: "tee4",
        cells: &[(0, 0), (1, 0), (2, 0), (1, 1)],
        color: ColorTag::Rose,
    },
    ShapeTemplate {
        name: "ess4",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1)],
        color: ColorTag::Jade,
    },
];

/// Rotate an offset set 90 degrees about the origin: (x, y) -> (y, -x).
/// Does not renormalize; offsets may be negative afterwards.
pub fn rotate_offsets(offsets: &mut OffsetSet) {
    for offset in offsets.iter_mut() {
        *offset = (offset.1, -offset.0);
    }
}

/// Translate an offset set so the minimum x and minimum y are both 0.
/// Must run after any rotation before the shape is used for placement or
/// rendering; negative offsets break the placement math.
pub fn normalize(offsets: &mut OffsetSet) {
    let Some(&(first_x, first_y)) = offsets.first() else {
        return;
    };
    let mut min_x = first_x;
    let mut min_y = first_y;
    for &(x, y) in offsets.iter() {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
    }
    for offset in offsets.iter_mut() {
        *offset = (offset.0 - min_x, offset.1 - min_y);
    }
}

/// Runtime copy of a template, owned by the shape pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeInstance {
    cells: OffsetSet,
    color: ColorTag,
}

impl ShapeInstance {
    pub fn from_template(template: &ShapeTemplate) -> Self {
        let mut cells = OffsetSet::new();
        for &offset in template.cells {
            cells.push(offset);
        }
        Self {
            cells,
            color: template.color,
        }
    }

    /// Rebuild an instance from raw parts (persistence restore path).
    /// Returns None if the offsets are empty, oversized, or not normalized.
    pub fn from_parts(offsets: &[CellOffset], color: ColorTag) -> Option<Self> {
        if offsets.is_empty() || offsets.len() > MAX_SHAPE_CELLS {
            return None;
        }
        let mut cells = OffsetSet::new();
        for &offset in offsets {
            cells.push(offset);
        }
        let mut check = cells.clone();
        normalize(&mut check);
        if check != cells {
            return None;
        }
        Some(Self { cells, color })
    }

    pub fn cells(&self) -> &[CellOffset] {
        &self.cells
    }

    pub fn color(&self) -> ColorTag {
        self.color
    }

    /// Rotate 90 degrees in place and renormalize
    pub fn rotate(&mut self) {
        rotate_offsets(&mut self.cells);
        normalize(&mut self.cells);
    }

    /// Footprint width in cells
    pub fn width(&self) -> i8 {
        self.cells.iter().map(|&(x, _)| x).max().unwrap_or(0) + 1
    }

    /// Footprint height in cells
    pub fn height(&self) -> i8 {
        self.cells.iter().map(|&(_, y)| y).max().unwrap_or(0) + 1
    }
}
