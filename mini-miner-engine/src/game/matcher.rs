//! Match Detection
//!
//! A cell is matched iff it belongs to a maximal run of at least
//! [`MIN_MATCH_LEN`] identical adjacent tokens along its row or its column.
//! Rows and columns are scanned independently and their flags OR together.

use crate::game::grid::{cell_index, col_of, GRID_HEIGHT, GRID_WIDTH, TokenType};

/// Shortest run that counts as a match.
pub const MIN_MATCH_LEN: usize = 3;

/// OR match flags for every row and column run into `flags`.
///
/// Flags are only ever set, never cleared; callers reset them first.
pub fn detect_matches(types: &[TokenType], flags: &mut [bool]) {
    for row in 0..GRID_HEIGHT {
        scan_line(types, flags, GRID_WIDTH, |step| cell_index(row, step));
    }
    for col in 0..GRID_WIDTH {
        scan_line(types, flags, GRID_HEIGHT, |step| cell_index(step, col));
    }
}

/// Walk one line of `len` cells, mapping each step to a flat index via `cell`.
fn scan_line<F>(types: &[TokenType], flags: &mut [bool], len: usize, cell: F)
where
    F: Fn(usize) -> usize,
{
    let mut current: Option<TokenType> = None;
    let mut run_len = 0;

    for step in 0..len {
        let token = types[cell(step)];
        if current == Some(token) {
            run_len += 1;
        } else {
            flag_run(flags, &cell, step - run_len, step);
            current = Some(token);
            run_len = 1;
        }
    }

    // Trailing run touching the line boundary
    flag_run(flags, &cell, len - run_len, len);
}

#[inline]
fn flag_run<F>(flags: &mut [bool], cell: &F, start: usize, end: usize)
where
    F: Fn(usize) -> usize,
{
    if end - start >= MIN_MATCH_LEN {
        for step in start..end {
            flags[cell(step)] = true;
        }
    }
}

/// True if any cell is flagged.
#[inline]
pub fn has_matches(flags: &[bool]) -> bool {
    flags.iter().any(|f| *f)
}

/// Count flagged cells per column into `counts` (overwritten).
pub fn column_match_counts(flags: &[bool], counts: &mut [u8]) {
    counts.fill(0);
    for (index, _) in flags.iter().enumerate().filter(|(_, f)| **f) {
        counts[col_of(index)] += 1;
    }
}

/// Find an adjacent swap that would produce a match.
///
/// Scans cells in index order, trying the right neighbour then the one below.
/// Returns `None` when the board has no legal move.
pub fn find_swap(types: &[TokenType]) -> Option<(usize, usize)> {
    let mut scratch = types.to_vec();
    let mut flags = vec![false; types.len()];

    for row in 0..GRID_HEIGHT {
        for col in 0..GRID_WIDTH {
            let a = cell_index(row, col);
            let neighbours = [
                (col + 1 < GRID_WIDTH).then(|| cell_index(row, col + 1)),
                (row + 1 < GRID_HEIGHT).then(|| cell_index(row + 1, col)),
            ];
            for b in neighbours.into_iter().flatten() {
                if scratch[a] == scratch[b] {
                    continue;
                }
                scratch.swap(a, b);
                flags.fill(false);
                detect_matches(&scratch, &mut flags);
                scratch.swap(a, b);
                if has_matches(&flags) {
                    return Some((a, b));
                }
            }
        }
    }
    None
}

// =============================================================================
// TESTS
// =============================================================================
