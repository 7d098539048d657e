//! End-to-end rounds driven purely through input frames.

use mini_miner::game::events::{BoardEvent, BoardEventData};
use mini_miner::game::grid::cell_index;
use mini_miner::game::matcher::find_swap;
use mini_miner::game::motion::is_at_rest;
use mini_miner::game::Stage;
use mini_miner::{
    replay_round, tick, Board, BoardConfig, InputFrame, InputRecording, Rect, TokenSource,
    TokenType, CELL_COUNT, GRID_WIDTH,
};

const DT: f32 = 1.0 / 60.0;

/// Cycles through a fixed list of palette indices.
struct Cycle {
    picks: Vec<usize>,
    at: usize,
}

impl TokenSource for Cycle {
    fn next_index(&mut self, len: usize) -> usize {
        let pick = self.picks[self.at % self.picks.len()] % len;
        self.at += 1;
        pick
    }

    fn state_words(&self) -> [u64; 2] {
        [self.at as u64, 0]
    }
}

fn four_type_config() -> BoardConfig {
    BoardConfig {
        container: Rect::new(0.0, 0.0, 800.0, 600.0),
        ..BoardConfig::with_palette((0..4).map(TokenType).collect())
    }
}

/// Diagonal stripes of types 0-2 with row 0 set to [3,3,2,3,1,2,0,1].
///
/// Swapping cells 2 and 3 creates exactly one run: row 0, cols 0-2.
fn known_types() -> Vec<TokenType> {
    let mut types: Vec<TokenType> = (0..CELL_COUNT)
        .map(|i| TokenType(((i / GRID_WIDTH + i % GRID_WIDTH) % 3) as u8))
        .collect();
    for col in [0, 1, 3] {
        types[cell_index(0, col)] = TokenType(3);
    }
    types
}

fn run_until_idle<R: TokenSource>(board: &mut Board<R>) -> Vec<BoardEvent> {
    let mut events = Vec::new();
    for _ in 0..10_000 {
        let result = tick(board, &InputFrame::new(), DT);
        events.extend(result.events);
        if result.stage.is_idle() {
            return events;
        }
    }
    panic!("board never returned to idle");
}

#[test]
fn test_single_clear_cycle() {
    // 64 picks build the initial board, so spawns start at offset 1: [1, 3, 0]
    let source = Cycle { picks: vec![0, 1, 3], at: 0 };
    let mut board = Board::with_source(four_type_config(), source).unwrap();
    board.grid.set_types(&known_types());

    let first = tick(&mut board, &InputFrame::select(2), DT);
    assert!(first.events.is_empty());
    assert_eq!(board.grid.selection, vec![2]);

    let second = tick(&mut board, &InputFrame::select(3), DT);
    assert_eq!(second.events, vec![BoardEvent::swap_accepted(1, 2, 3)]);
    assert_eq!(second.stage, Stage::AnimatingSwap { first: 2, second: 3 });

    let events = run_until_idle(&mut board);
    let data: Vec<&BoardEventData> = events.iter().map(|e| &e.data).collect();

    assert_eq!(data.len(), 2, "{:?}", data);
    assert_eq!(
        data[0],
        &BoardEventData::CellsCleared {
            per_column: [1, 1, 1, 0, 0, 0, 0, 0],
            total: 3,
            cascade_depth: 0,
        }
    );
    assert_eq!(data[1], &BoardEventData::BoardSettled { cascade_depth: 0 });

    let row0: Vec<u8> = (0..GRID_WIDTH).map(|col| board.grid.token(0, col).0).collect();
    assert_eq!(row0, vec![1, 3, 0, 2, 1, 2, 0, 1]);
    // Everything below row 0 is untouched
    assert_eq!(&board.grid.types[GRID_WIDTH..], &known_types()[GRID_WIDTH..]);

    assert_eq!(board.stage, Stage::Idle);
    assert!(is_at_rest(&board.grid));
    assert!(board.grid.selection.is_empty());
    assert!(!board.grid.has_matches());
}

#[test]
fn test_rejected_swap_then_accepted_swap() {
    let source = Cycle { picks: vec![0, 1, 3], at: 0 };
    let mut board = Board::with_source(four_type_config(), source).unwrap();
    board.grid.set_types(&known_types());

    // Cells 12 and 13 are both in the striped area; no run forms
    tick(&mut board, &InputFrame::select(12), DT);
    let rejected = tick(&mut board, &InputFrame::select(13), DT);
    assert_eq!(rejected.events, vec![BoardEvent::swap_rejected(1, 12, 13)]);
    assert_eq!(board.grid.types, known_types());

    tick(&mut board, &InputFrame::select(3), DT);
    let accepted = tick(&mut board, &InputFrame::select(2), DT);
    assert_eq!(accepted.events, vec![BoardEvent::swap_accepted(3, 3, 2)]);
}

#[test]
fn test_end_round_mid_animation() {
    let source = Cycle { picks: vec![0, 1, 3], at: 0 };
    let mut board = Board::with_source(four_type_config(), source).unwrap();
    board.grid.set_types(&known_types());

    tick(&mut board, &InputFrame::select(2), DT);
    tick(&mut board, &InputFrame::select(3), DT);
    tick(&mut board, &InputFrame::new(), DT);
    assert!(!board.stage.is_idle());

    let result = tick(&mut board, &InputFrame::end_round(), DT);

    assert!(result.round_reset);
    assert_eq!(result.events, vec![BoardEvent::round_reset(3)]);
    assert_eq!(board.stage, Stage::Idle);
    assert!(is_at_rest(&board.grid));
    assert!(board.grid.types.iter().all(|t| t.0 < 4));
}

#[test]
fn test_recorded_round_replays_identically() {
    let seed = 2024;
    let mut live = Board::new(four_type_config(), seed).unwrap();
    let mut recording = InputRecording::new(seed, DT);
    let mut pending: Option<u8> = None;
    let mut accepted = 0;

    for t in 0..3000u32 {
        let frame = if t == 2000 {
            InputFrame::end_round()
        } else if let Some(cell) = pending.take() {
            InputFrame::select(cell)
        } else if live.stage.is_idle() && t % 20 == 0 {
            match find_swap(&live.grid.types) {
                Some((a, b)) => {
                    pending = Some(b as u8);
                    InputFrame::select(a as u8)
                }
                None => InputFrame::end_round(),
            }
        } else {
            InputFrame::new()
        };

        recording.record(live.tick, frame);
        let result = tick(&mut live, &frame, DT);
        accepted += result
            .events
            .iter()
            .filter(|e| matches!(e.data, BoardEventData::SwapAccepted { .. }))
            .count();
    }
    assert!(accepted > 0, "autoplayer never made a move");

    let bytes = recording.to_bytes().unwrap();
    let restored = InputRecording::from_bytes(&bytes).unwrap();
    assert_eq!(restored.compute_hash(), recording.compute_hash());

    let mut replayed = Board::new(four_type_config(), restored.rng_seed).unwrap();
    replay_round(&mut replayed, &restored);

    assert_eq!(replayed.tick, live.tick);
    assert_eq!(replayed.grid.types, live.grid.types);
    assert_eq!(replayed.compute_hash(), live.compute_hash());
}
