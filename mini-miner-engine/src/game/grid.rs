//! Grid State
//!
//! The 8x8 board stored as flat sequences indexed `row * GRID_WIDTH + col`,
//! row 0 at the top. Every per-cell buffer has exactly [`CELL_COUNT`] entries
//! for the lifetime of the grid; cells are mutated in place, never
//! reallocated.

use serde::{Serialize, Deserialize};

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::matcher;

/// Columns on the board.
pub const GRID_WIDTH: usize = 8;

/// Rows on the board.
pub const GRID_HEIGHT: usize = 8;

/// Total cells.
pub const CELL_COUNT: usize = GRID_WIDTH * GRID_HEIGHT;

/// A token ("jewel") kind. Values are opaque ids from the configured palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenType(pub u8);

/// Flat index of a cell.
#[inline]
pub const fn cell_index(row: usize, col: usize) -> usize {
    row * GRID_WIDTH + col
}

/// Row of a flat index.
#[inline]
pub const fn row_of(index: usize) -> usize {
    index / GRID_WIDTH
}

/// Column of a flat index.
#[inline]
pub const fn col_of(index: usize) -> usize {
    index % GRID_WIDTH
}

/// True if two cells share an edge. Row wraparound (index 7 and 8) is not adjacent.
pub fn are_adjacent(a: usize, b: usize) -> bool {
    if a >= CELL_COUNT || b >= CELL_COUNT || a == b {
        return false;
    }
    let (ra, ca) = (row_of(a), col_of(a));
    let (rb, cb) = (row_of(b), col_of(b));
    (ra == rb && ca.abs_diff(cb) == 1) || (ca == cb && ra.abs_diff(rb) == 1)
}

/// Board data shared by the detector, the resolver and the stage driver.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Grid {
    /// Token kind per cell
    pub types: Vec<TokenType>,
    /// Cell is part of a run of 3+ in the latest detection pass
    pub match_flags: Vec<bool>,
    /// Matched cells per column, always derived from `match_flags`
    pub match_counts: Vec<u8>,
    /// Current animated screen position per cell slot
    pub positions: Vec<Vec2>,
    /// Resting (target) screen position per cell slot
    pub rest_positions: Vec<Vec2>,
    /// Current movement per cell; zero means stationary
    pub velocities: Vec<Vec2>,
    /// Pending player selection (0-2 cell indices)
    pub selection: Vec<usize>,
    /// Screen rectangle the grid is laid out in
    pub container: Rect,
    /// Size of one cell
    pub cell_size: Vec2,
}

impl Grid {
    /// Lay out a grid in `container`. All cells start at rest with token 0.
    pub fn new(container: Rect) -> Self {
        let cell_size = Vec2::new(
            container.width() / GRID_WIDTH as f32,
            container.height() / GRID_HEIGHT as f32,
        );

        let rest_positions: Vec<Vec2> = (0..CELL_COUNT)
            .map(|i| {
                Vec2::new(
                    container.pos.x + col_of(i) as f32 * cell_size.x,
                    container.pos.y + row_of(i) as f32 * cell_size.y,
                )
            })
            .collect();

        Self {
            types: vec![TokenType::default(); CELL_COUNT],
            match_flags: vec![false; CELL_COUNT],
            match_counts: vec![0; GRID_WIDTH],
            positions: rest_positions.clone(),
            rest_positions,
            velocities: vec![Vec2::ZERO; CELL_COUNT],
            selection: Vec::with_capacity(2),
            container,
            cell_size,
        }
    }

    /// Token at (row, col).
    #[inline]
    pub fn token(&self, row: usize, col: usize) -> TokenType {
        self.types[cell_index(row, col)]
    }

    /// Overwrite all token types, row-major. Extra entries are ignored.
    pub fn set_types(&mut self, types: &[TokenType]) {
        for (slot, t) in self.types.iter_mut().zip(types) {
            *slot = *t;
        }
    }

    /// Map a screen point (e.g. a mouse click) to the cell under it.
    pub fn cell_at_point(&self, point: Vec2) -> Option<usize> {
        if !self.container.contains(point) {
            return None;
        }
        let col = ((point.x - self.container.pos.x) / self.cell_size.x) as usize;
        let row = ((point.y - self.container.pos.y) / self.cell_size.y) as usize;
        // Float rounding at the far edge can land exactly on the bound
        Some(cell_index(row.min(GRID_HEIGHT - 1), col.min(GRID_WIDTH - 1)))
    }

    /// Clear all match flags and counts.
    pub fn reset_matches(&mut self) {
        self.match_flags.fill(false);
        self.match_counts.fill(0);
    }

    /// Reset flags, scan rows and columns, recount columns.
    ///
    /// Returns the number of matched cells.
    pub fn detect_matches(&mut self) -> usize {
        self.match_flags.fill(false);
        matcher::detect_matches(&self.types, &mut self.match_flags);
        self.recount_matches()
    }

    /// Recompute `match_counts` from `match_flags`. Returns the total.
    pub fn recount_matches(&mut self) -> usize {
        matcher::column_match_counts(&self.match_flags, &mut self.match_counts);
        self.match_counts.iter().map(|c| *c as usize).sum()
    }

    /// True if any cell is flagged.
    #[inline]
    pub fn has_matches(&self) -> bool {
        matcher::has_matches(&self.match_flags)
    }

    /// Swap the token types of two cells.
    #[inline]
    pub fn swap_types(&mut self, a: usize, b: usize) {
        self.types.swap(a, b);
    }

    /// Swap the animated positions of two cells (the visual half of a swap).
    #[inline]
    pub fn swap_positions(&mut self, a: usize, b: usize) {
        self.positions.swap(a, b);
    }

    /// Put every cell at rest with zero velocity.
    pub fn snap_to_rest(&mut self) {
        self.positions.copy_from_slice(&self.rest_positions);
        self.velocities.fill(Vec2::ZERO);
    }
}

// =============================================================================
// TESTS
// =============================================================================
