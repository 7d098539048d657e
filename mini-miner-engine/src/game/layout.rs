//! Layout Resolution
//!
//! Clears matched cells, lets survivors fall, and spawns replacements.
//!
//! Each column is handled independently:
//! 1. Scanning bottom-up, unmatched cells are copied into the lowest free
//!    slot (type and current animated position travel together), so the
//!    relative order of survivors never changes.
//! 2. The top `count` slots become the spawn zone: fresh random tokens whose
//!    animated position starts `count` cells above their rest slot.
//!
//! Rest positions are never modified. The motion step animates every slot
//! from wherever its token now is back to rest, so survivors fall by the
//! number of cleared cells below them and spawns fall in from above the grid.

use crate::core::rng::TokenSource;
use crate::core::vec2::Vec2;
use crate::game::grid::{cell_index, Grid, TokenType, GRID_HEIGHT, GRID_WIDTH};

/// Draw a uniformly random token from the palette.
#[inline]
pub fn random_token<S: TokenSource + ?Sized>(palette: &[TokenType], source: &mut S) -> TokenType {
    palette[source.next_index(palette.len())]
}

/// Compact every column with matches and refill from the top.
///
/// Uses `grid.match_flags` and `grid.match_counts` as computed by the last
/// detection pass. Returns the cleared count per column.
/// `palette` must be non-empty.
pub fn resolve_layout<S: TokenSource + ?Sized>(
    grid: &mut Grid,
    palette: &[TokenType],
    source: &mut S,
) -> [u8; GRID_WIDTH] {
    let mut cleared = [0u8; GRID_WIDTH];

    for (col, cleared_in_col) in cleared.iter_mut().enumerate() {
        let count = grid.match_counts[col] as usize;
        if count == 0 {
            continue;
        }

        compact_column(grid, col);
        spawn_column(grid, col, count, palette, source);
        *cleared_in_col = count as u8;
    }

    cleared
}

/// Move survivors of `col` to the bottom, preserving order.
fn compact_column(grid: &mut Grid, col: usize) {
    let mut write = GRID_HEIGHT;
    for read in (0..GRID_HEIGHT).rev() {
        let src = cell_index(read, col);
        if grid.match_flags[src] {
            continue;
        }
        write -= 1;
        if write != read {
            let dst = cell_index(write, col);
            grid.types[dst] = grid.types[src];
            grid.positions[dst] = grid.positions[src];
        }
    }
}

/// Fill the top `count` slots of `col` with new tokens placed above the grid.
fn spawn_column<S: TokenSource + ?Sized>(
    grid: &mut Grid,
    col: usize,
    count: usize,
    palette: &[TokenType],
    source: &mut S,
) {
    let drop_offset = Vec2::new(0.0, grid.cell_size.y * count as f32);
    for row in 0..count {
        let idx = cell_index(row, col);
        grid.types[idx] = random_token(palette, source);
        grid.positions[idx] = grid.rest_positions[idx] - drop_offset;
    }
}

// =============================================================================
// TESTS
// =============================================================================
