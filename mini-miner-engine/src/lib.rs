//! # Mini Miner Board Engine
//!
//! Rules engine for a match-3 puzzle: an 8x8 grid of tokens, player swaps,
//! run detection, gravity, refills and chain reactions, all driven one frame
//! at a time through an explicit stage machine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    MINI MINER ENGINE                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  ├── vec2.rs     - 2D screen-space vector                    │
//! │  ├── rect.rs     - Grid container rectangle                  │
//! │  ├── rng.rs      - Token source + Xorshift128+ PRNG          │
//! │  ├── hash.rs     - State hashing for replay checks           │
//! │  └── timer.rs    - Frame delta smoothing                     │
//! │                                                              │
//! │  game/           - Board logic                               │
//! │  ├── grid.rs     - Cell storage and adjacency                │
//! │  ├── matcher.rs  - Run detection                             │
//! │  ├── layout.rs   - Compaction and spawning                   │
//! │  ├── motion.rs   - Velocity steering                         │
//! │  ├── stage.rs    - Stage machine handlers                    │
//! │  ├── state.rs    - Board aggregate                           │
//! │  ├── tick.rs     - Per-frame driver and replay               │
//! │  ├── input.rs    - Input frames and recordings               │
//! │  ├── events.rs   - Board events                              │
//! │  ├── view.rs     - Render snapshot                           │
//! │  └── config.rs   - Configuration and validation              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! - Randomness only comes from the board's own [`TokenSource`]
//! - No system time: frame deltas are supplied by the caller
//! - Fixed iteration order over flat cell buffers
//!
//! Given the same seed, input frames and deltas, a round replays to the
//! same state hash.
//!
//! ## Example
//!
//! ```
//! use mini_miner::{Board, BoardConfig, InputFrame, tick};
//!
//! let mut board = Board::new(BoardConfig::default(), 12345).unwrap();
//! let result = tick(&mut board, &InputFrame::select(0), 1.0 / 60.0);
//! assert!(result.stage.is_idle());
//! assert_eq!(board.grid.selection, vec![0]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::vec2::Vec2;
pub use crate::core::rect::Rect;
pub use crate::core::rng::{DeterministicRng, TokenSource};
pub use crate::core::timer::DeltaSmoother;
pub use crate::game::config::{BoardConfig, ConfigError};
pub use crate::game::grid::{TokenType, GRID_WIDTH, GRID_HEIGHT, CELL_COUNT};
pub use crate::game::input::{InputFrame, InputRecording};
pub use crate::game::state::Board;
pub use crate::game::tick::{tick, replay_round, TickResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nominal frame rate the demo driver runs at (Hz)
pub const TICK_RATE: u32 = 60;
