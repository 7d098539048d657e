//! Board Tick
//!
//! Advances a board by one external frame. Given the same seed, the same
//! input frames and the same frame deltas, every run produces identical
//! boards, events and state hashes.

use tracing::debug;
#[cfg(feature = "debug-tracing")]
use tracing::trace;

use crate::core::rng::TokenSource;
use crate::game::events::{BoardEvent, BoardEventData};
use crate::game::input::{InputFrame, InputRecording};
use crate::game::stage::{self, Stage, StageFlow};
use crate::game::state::Board;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<BoardEvent>,
    /// Stage the board rests in after the tick
    pub stage: Stage,
    /// Whether the board was regenerated this tick
    pub round_reset: bool,
}

/// Run one tick.
///
/// # Arguments
///
/// * `board` - The board (will be mutated)
/// * `input` - Input captured for this frame
/// * `dt` - Smoothed frame delta in seconds
///
/// A round-end signal takes priority: the board is regenerated and the
/// selection in the same frame is ignored. Otherwise stage handlers run
/// until one yields.
pub fn tick<R: TokenSource>(board: &mut Board<R>, input: &InputFrame, dt: f32) -> TickResult {
    #[cfg(feature = "debug-tracing")]
    trace!(tick = board.tick, stage = board.stage.name(), ?input, dt, "tick");

    if input.end_round {
        board.reset_round();
    } else {
        run_stages(board, input.selected_cell, dt);
    }

    let events = board.take_events();
    let round_reset = events
        .iter()
        .any(|e| matches!(e.data, BoardEventData::RoundReset));

    board.tick = board.tick.wrapping_add(1);

    TickResult {
        events,
        stage: board.stage,
        round_reset,
    }
}

/// Drive stage handlers until one yields.
fn run_stages<R: TokenSource>(board: &mut Board<R>, selected: Option<u8>, dt: f32) {
    let mut selected = selected;
    loop {
        let from = board.stage;
        let flow = stage::step(board, selected.take(), dt);
        let (next, keep_going) = match flow {
            StageFlow::Yield(next) => (next, false),
            StageFlow::Continue(next) => (next, true),
        };

        if from.tag() != next.tag() {
            debug!(tick = board.tick, from = from.name(), to = next.name(), "stage transition");
        }
        board.stage = next;

        if !keep_going {
            break;
        }
    }
}

/// Replay a recorded round from a freshly created board.
///
/// `board` must be at tick 0 and created with the same configuration and
/// seed as the recorded one. Every tick from 0 to `recording.end_tick` is
/// simulated with `recording.dt`; an empty recording simulates nothing.
/// Returns all generated events.
pub fn replay_round<R: TokenSource>(
    board: &mut Board<R>,
    recording: &InputRecording,
) -> Vec<BoardEvent> {
    let mut all_events = Vec::new();

    for (_, frame) in recording.replay_iter() {
        let result = tick(board, &frame, recording.dt);
        all_events.extend(result.events);
    }

    all_events
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::BoardConfig;
    use crate::game::grid::{cell_index, TokenType, CELL_COUNT, GRID_WIDTH};

    const DT: f32 = 1.0 / 60.0;

    fn stripes() -> Vec<TokenType> {
        (0..CELL_COUNT)
            .map(|i| TokenType(((i / GRID_WIDTH + i % GRID_WIDTH) % 3) as u8))
            .collect()
    }

    fn striped_board(seed: u64) -> Board {
        let config = BoardConfig::with_palette((0..3).map(TokenType).collect());
        let mut board = Board::new(config, seed).unwrap();
        board.grid.set_types(&stripes());
        board
    }

    /// Row 0 is [5,5,x,5,...]: selecting cells 2 then 3 completes a run.
    fn board_with_pending_match(seed: u64) -> Board {
        let mut board = striped_board(seed);
        for col in [0, 1, 3] {
            board.grid.types[cell_index(0, col)] = TokenType(5);
        }
        board
    }

    fn run_until_idle(board: &mut Board, limit: u32) -> Vec<BoardEvent> {
        let mut events = Vec::new();
        for _ in 0..limit {
            let result = tick(board, &InputFrame::new(), DT);
            events.extend(result.events);
            if result.stage.is_idle() {
                return events;
            }
        }
        panic!("board did not settle within {} ticks", limit);
    }

    #[test]
    fn test_tick_advances_counter() {
        let mut board = striped_board(1);
        tick(&mut board, &InputFrame::new(), DT);
        tick(&mut board, &InputFrame::new(), DT);
        assert_eq!(board.tick, 2);
        assert_eq!(board.stage, Stage::Idle);
    }

    #[test]
    fn test_end_round_resets() {
        let mut board = striped_board(1);
        board.stage = Stage::Dropping;
        board.grid.velocities[3].y = 90.0;

        let result = tick(&mut board, &InputFrame::end_round(), DT);

        assert!(result.round_reset);
        assert_eq!(result.stage, Stage::Idle);
        assert!(board.grid.velocities.iter().all(|v| v.is_zero()));
        assert_eq!(result.events, vec![BoardEvent::round_reset(0)]);
    }

    #[test]
    fn test_accepted_swap_runs_to_completion() {
        let mut board = board_with_pending_match(3);

        tick(&mut board, &InputFrame::select(2), DT);
        let result = tick(&mut board, &InputFrame::select(3), DT);

        assert!(matches!(
            result.events[0].data,
            BoardEventData::SwapAccepted { first: 2, second: 3 }
        ));
        assert_eq!(result.stage, Stage::AnimatingSwap { first: 2, second: 3 });

        let events = run_until_idle(&mut board, 10_000);

        let cleared = events.iter().find_map(|e| match &e.data {
            BoardEventData::CellsCleared { per_column, .. } => Some(*per_column),
            _ => None,
        });
        assert_eq!(cleared, Some([1, 1, 1, 0, 0, 0, 0, 0]));
        assert!(events
            .iter()
            .any(|e| matches!(e.data, BoardEventData::BoardSettled { .. } | BoardEventData::RoundReset)));
        assert_eq!(board.grid.positions, board.grid.rest_positions);
        assert!(board.grid.selection.is_empty());
    }

    #[test]
    fn test_selection_during_animation_dropped() {
        let mut board = board_with_pending_match(3);
        tick(&mut board, &InputFrame::select(2), DT);
        tick(&mut board, &InputFrame::select(3), DT);

        let result = tick(&mut board, &InputFrame::select(40), DT);

        assert!(!result.stage.is_idle());
        assert!(board.grid.selection.is_empty());
    }

    #[test]
    fn test_zero_dt_makes_no_progress() {
        let mut board = board_with_pending_match(3);
        tick(&mut board, &InputFrame::select(2), 0.0);
        tick(&mut board, &InputFrame::select(3), 0.0);

        for _ in 0..10 {
            let result = tick(&mut board, &InputFrame::new(), 0.0);
            assert_eq!(result.stage, Stage::AnimatingSwap { first: 2, second: 3 });
        }
    }

    #[test]
    fn test_single_type_palette_hits_cascade_limit() {
        let config = BoardConfig {
            max_cascade_depth: 4,
            ..BoardConfig::with_palette(vec![TokenType(1)])
        };
        let mut board = Board::new(config, 5).unwrap();
        board.grid.detect_matches();
        board.stage = Stage::Resolving;

        let events = run_until_idle(&mut board, 10_000);

        assert!(events
            .iter()
            .any(|e| matches!(e.data, BoardEventData::CascadeLimitReached { depth: 4 })));
        assert!(matches!(events.last().map(|e| &e.data), Some(BoardEventData::RoundReset)));
    }

    #[test]
    fn test_replay_matches_live_run() {
        let seed = 77;
        let mut live = board_with_pending_match(seed);
        let mut recording = InputRecording::new(seed, DT);

        for t in 0..600u32 {
            let frame = match t {
                5 => InputFrame::select(2),
                6 => InputFrame::select(3),
                400 => InputFrame::end_round(),
                _ => InputFrame::new(),
            };
            recording.record(live.tick, frame);
            tick(&mut live, &frame, DT);
        }

        let mut replayed = board_with_pending_match(seed);
        let events = replay_round(&mut replayed, &recording);

        assert_eq!(replayed.tick, live.tick);
        assert_eq!(replayed.compute_hash(), live.compute_hash());
        assert!(events.iter().any(|e| matches!(e.data, BoardEventData::RoundReset)));
    }

    #[test]
    fn test_empty_recording_leaves_board_untouched() {
        let mut board = striped_board(5);
        let before = board.compute_hash();

        let events = replay_round(&mut board, &InputRecording::new(5, DT));

        assert!(events.is_empty());
        assert_eq!(board.tick, 0);
        assert_eq!(board.compute_hash(), before);
    }
}
