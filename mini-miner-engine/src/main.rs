//! Mini Miner Demo Driver
//!
//! Runs the board engine headless: an autoplayer picks hinted swaps, the
//! round ends on a fixed timer, and the recorded input is replayed to check
//! that the simulation is deterministic.
//!
//! Usage: `mini-miner [config.json]`. Log level via `RUST_LOG` (default `info`).

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mini_miner::{
    TICK_RATE, VERSION,
    Board, BoardConfig, DeltaSmoother, InputFrame, InputRecording,
    game::{
        events::BoardEventData,
        matcher::find_swap,
        tick::{tick, replay_round},
    },
};

/// Round length in ticks (60 seconds at the nominal rate)
const ROUND_TICKS: u32 = 60 * TICK_RATE;

/// Rounds the demo plays before replaying
const DEMO_ROUNDS: u32 = 3;

/// Idle ticks the autoplayer waits between moves
const THINK_TICKS: u32 = 30;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Mini Miner Engine v{}", VERSION);

    let config = load_config(std::env::args().nth(1))?;
    info!(
        "Palette: {} types, container {}x{}",
        config.palette.len(),
        config.container.width(),
        config.container.height()
    );

    demo_rounds(config)
}

/// Load config from a JSON file, or defaults when no path is given.
fn load_config(path: Option<String>) -> Result<BoardConfig> {
    let config = match path {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path))?;
            BoardConfig::from_json_str(&json).with_context(|| format!("parsing config {}", path))?
        }
        None => BoardConfig::default(),
    };
    config.validate().context("invalid board config")?;
    Ok(config)
}

/// Autoplay a few rounds, then replay the recording and compare hashes.
fn demo_rounds(config: BoardConfig) -> Result<()> {
    info!("=== Starting Demo ===");

    let rng_seed = 12345u64;
    let mut board = Board::new(config.clone(), rng_seed)?;

    // Fixed nominal delta so the replay runs on the same dt
    let mut smoother = DeltaSmoother::default();
    let nominal = 1.0 / TICK_RATE as f32;
    let dt = smoother.push(nominal);
    let mut recording = InputRecording::new(rng_seed, dt);

    let mut planned: Vec<u8> = Vec::new();
    let mut idle_ticks = 0u32;
    let mut swaps = 0u32;
    let mut cleared = 0u32;

    for t in 0..ROUND_TICKS * DEMO_ROUNDS {
        let frame = if t > 0 && t % ROUND_TICKS == 0 {
            InputFrame::end_round()
        } else if board.stage.is_idle() {
            idle_ticks += 1;
            next_autoplay_frame(&board, &mut planned, &mut idle_ticks)
        } else {
            InputFrame::new()
        };

        recording.record(board.tick, frame);
        let result = tick(&mut board, &frame, dt);

        for event in &result.events {
            match &event.data {
                BoardEventData::SwapAccepted { first, second } => {
                    swaps += 1;
                    info!("Tick {}: swap {} <-> {}", event.tick, first, second);
                }
                BoardEventData::CellsCleared { total, cascade_depth, .. } => {
                    cleared += total;
                    info!("Tick {}: cleared {} (chain {})", event.tick, total, cascade_depth);
                }
                BoardEventData::RoundReset => {
                    info!("Tick {}: new round", event.tick);
                }
                _ => {}
            }
        }
    }

    info!("=== Demo Results ===");
    info!("Swaps: {}, cells cleared: {}", swaps, cleared);
    let live_hash = board.compute_hash();
    info!("Final State Hash: {}", hex::encode(live_hash));
    info!(
        "Recorded {} input frames over {} ticks",
        recording.len(),
        recording.end_tick.map_or(0, |end| end + 1)
    );

    // Recording round-trips through bincode before replay
    let bytes = recording.to_bytes()?;
    let recording = InputRecording::from_bytes(&bytes)?;
    info!(
        "Recording: {} bytes, hash {}",
        bytes.len(),
        hex::encode(&recording.compute_hash()[..8])
    );

    let mut replayed = Board::new(config, recording.rng_seed)?;
    replay_round(&mut replayed, &recording);
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if replay_hash != live_hash {
        bail!("replay diverged from live run");
    }
    info!("Replay verified");

    if let Ok(json) = board.view().to_json() {
        info!("Final view: {} bytes of JSON", json.len());
    }

    Ok(())
}

/// Pick the next selection: think for a while, then click a hinted pair.
fn next_autoplay_frame(board: &Board, planned: &mut Vec<u8>, idle_ticks: &mut u32) -> InputFrame {
    if let Some(cell) = planned.pop() {
        return InputFrame::select(cell);
    }
    if *idle_ticks < THINK_TICKS {
        return InputFrame::new();
    }
    *idle_ticks = 0;

    match find_swap(&board.grid.types) {
        Some((first, second)) => {
            planned.push(second as u8);
            InputFrame::select(first as u8)
        }
        None => {
            warn!("Tick {}: no legal move, ending round", board.tick);
            InputFrame::end_round()
        }
    }
}
