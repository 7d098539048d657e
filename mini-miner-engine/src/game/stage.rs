//! Stage Driver
//!
//! The board animates through a fixed sequence of stages. Each stage has one
//! handler which returns a [`StageFlow`]: either yield to the caller until
//! the next tick, or continue straight into the next stage within the same
//! tick.
//!
//! ```text
//!   Idle ──swap accepted──▶ AnimatingSwap ──stopped──▶ Resolving
//!    ▲                                                    │
//!    │                                                    ▼
//!    └──no matches── Settling ◀──stopped── Dropping ◀─────┘
//!                       │
//!                       └──chain reaction──▶ Resolving (next tick)
//! ```

use serde::{Serialize, Deserialize};
use tracing::warn;

use crate::core::rng::TokenSource;
use crate::game::events::BoardEvent;
use crate::game::grid::{are_adjacent, CELL_COUNT};
use crate::game::layout::resolve_layout;
use crate::game::motion::{integrate, is_moving, steer_toward_rest};
use crate::game::state::Board;

/// Where the board is in its animation sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Waiting for the player to pick two cells
    #[default]
    Idle,
    /// Two accepted cells are sliding into each other's place
    AnimatingSwap {
        /// First selected cell
        first: usize,
        /// Second selected cell
        second: usize,
    },
    /// Matched cells are about to be removed and refilled
    Resolving,
    /// Survivors and spawns are falling into place
    Dropping,
    /// Motion finished; checking for chain reactions
    Settling,
}

impl Stage {
    /// Short name for logs and render snapshots.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::AnimatingSwap { .. } => "animating_swap",
            Stage::Resolving => "resolving",
            Stage::Dropping => "dropping",
            Stage::Settling => "settling",
        }
    }

    /// Stable tag used in the state hash.
    pub fn tag(&self) -> u8 {
        match self {
            Stage::Idle => 0,
            Stage::AnimatingSwap { .. } => 1,
            Stage::Resolving => 2,
            Stage::Dropping => 3,
            Stage::Settling => 4,
        }
    }

    /// True if the board accepts selections.
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Stage::Idle)
    }
}

/// Outcome of running one stage handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageFlow {
    /// Store the stage and return control to the caller.
    Yield(Stage),
    /// Store the stage and run its handler in the same tick.
    Continue(Stage),
}

/// Run the handler for the board's current stage.
///
/// `selected` is only consumed by [`Stage::Idle`]; selections that arrive
/// while the board is animating are dropped.
pub fn step<R: TokenSource>(board: &mut Board<R>, selected: Option<u8>, dt: f32) -> StageFlow {
    match board.stage {
        Stage::Idle => run_idle(board, selected),
        Stage::AnimatingSwap { .. } => run_animating_swap(board, dt),
        Stage::Resolving => run_resolving(board, dt),
        Stage::Dropping => run_dropping(board, dt),
        Stage::Settling => run_settling(board),
    }
}

/// Collect selections and attempt a swap once two are pending.
fn run_idle<R: TokenSource>(board: &mut Board<R>, selected: Option<u8>) -> StageFlow {
    let Some(cell) = selected else {
        return StageFlow::Yield(Stage::Idle);
    };
    let cell = cell as usize;
    let tick = board.tick;

    if cell >= CELL_COUNT {
        let event = match board.grid.selection.first().copied() {
            Some(pending) => BoardEvent::selection_cancelled(tick, pending, Some(cell)),
            None => BoardEvent::selection_cancelled(tick, cell, None),
        };
        board.grid.selection.clear();
        board.push_event(event);
        return StageFlow::Yield(Stage::Idle);
    }

    board.grid.selection.push(cell);
    if board.grid.selection.len() < 2 {
        return StageFlow::Yield(Stage::Idle);
    }

    let (first, second) = (board.grid.selection[0], board.grid.selection[1]);
    board.grid.selection.clear();

    if !are_adjacent(first, second) {
        board.push_event(BoardEvent::selection_cancelled(tick, first, Some(second)));
        return StageFlow::Yield(Stage::Idle);
    }

    board.grid.swap_types(first, second);
    if board.grid.detect_matches() == 0 {
        board.grid.swap_types(first, second);
        board.push_event(BoardEvent::swap_rejected(tick, first, second));
        return StageFlow::Yield(Stage::Idle);
    }

    // Types are already swapped; swapping positions makes both tokens
    // slide from their old slot into the new one.
    board.grid.swap_positions(first, second);
    board.push_event(BoardEvent::swap_accepted(tick, first, second));
    StageFlow::Continue(Stage::AnimatingSwap { first, second })
}

fn run_animating_swap<R: TokenSource>(board: &mut Board<R>, dt: f32) -> StageFlow {
    steer_toward_rest(&mut board.grid, board.config.animation_speed, dt);
    integrate(&mut board.grid, dt);

    if is_moving(&board.grid) {
        StageFlow::Yield(board.stage)
    } else {
        StageFlow::Continue(Stage::Resolving)
    }
}

/// Clear the matched cells found by the last detection pass and refill.
fn run_resolving<R: TokenSource>(board: &mut Board<R>, dt: f32) -> StageFlow {
    board.grid.recount_matches();
    let cleared = resolve_layout(&mut board.grid, &board.config.palette, &mut board.source);
    // Flags described the pre-compaction layout
    board.grid.reset_matches();

    let event = BoardEvent::cells_cleared(board.tick, cleared, board.cascade_depth);
    board.push_event(event);

    steer_toward_rest(&mut board.grid, board.config.drop_speed, dt);
    StageFlow::Continue(Stage::Dropping)
}

fn run_dropping<R: TokenSource>(board: &mut Board<R>, dt: f32) -> StageFlow {
    integrate(&mut board.grid, dt);
    steer_toward_rest(&mut board.grid, board.config.drop_speed, dt);

    if is_moving(&board.grid) {
        StageFlow::Yield(Stage::Dropping)
    } else {
        StageFlow::Continue(Stage::Settling)
    }
}

/// Look for chain reactions once everything has landed.
fn run_settling<R: TokenSource>(board: &mut Board<R>) -> StageFlow {
    if board.grid.detect_matches() == 0 {
        board.push_event(BoardEvent::board_settled(board.tick, board.cascade_depth));
        board.cascade_depth = 0;
        return StageFlow::Yield(Stage::Idle);
    }

    board.cascade_depth += 1;
    if board.cascade_depth >= board.config.max_cascade_depth {
        warn!(
            tick = board.tick,
            depth = board.cascade_depth,
            "cascade limit reached, resetting round"
        );
        board.push_event(BoardEvent::cascade_limit_reached(board.tick, board.cascade_depth));
        board.reset_round();
        return StageFlow::Yield(Stage::Idle);
    }

    StageFlow::Yield(Stage::Resolving)
}

// =============================================================================
// TESTS
// =============================================================================
