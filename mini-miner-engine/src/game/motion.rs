//! Token Motion
//!
//! Every cell slot animates from its current position back to its rest
//! position at a constant speed per axis. The approach is monotonic and never
//! overshoots: once the remaining distance on an axis fits in one tick's
//! travel, the position snaps to the target and that axis stops.

use crate::game::grid::Grid;

/// Set each cell's velocity toward its rest position at `speed`.
///
/// Axes within `speed * dt` of their target are snapped and zeroed.
pub fn steer_toward_rest(grid: &mut Grid, speed: f32, dt: f32) {
    let step = speed * dt;
    let cells = grid
        .positions
        .iter_mut()
        .zip(&grid.rest_positions)
        .zip(grid.velocities.iter_mut());

    for ((position, rest), velocity) in cells {
        velocity.x = steer_axis(&mut position.x, rest.x, speed, step);
        velocity.y = steer_axis(&mut position.y, rest.y, speed, step);
    }
}

/// Returns the axis velocity, snapping `current` when the target is in reach.
#[inline]
fn steer_axis(current: &mut f32, target: f32, speed: f32, step: f32) -> f32 {
    let remaining = target - *current;
    if remaining.abs() <= step {
        *current = target;
        0.0
    } else {
        speed.copysign(remaining)
    }
}

/// Advance every position by `velocity * dt`.
pub fn integrate(grid: &mut Grid, dt: f32) {
    for (position, velocity) in grid.positions.iter_mut().zip(&grid.velocities) {
        *position += velocity.scale(dt);
    }
}

/// True while any cell has a non-zero velocity.
#[inline]
pub fn is_moving(grid: &Grid) -> bool {
    grid.velocities.iter().any(|v| !v.is_zero())
}

/// True once every cell sits exactly on its rest position.
pub fn is_at_rest(grid: &Grid) -> bool {
    grid.positions
        .iter()
        .zip(&grid.rest_positions)
        .all(|(p, r)| p == r)
}

// =============================================================================
// TESTS
// =============================================================================
