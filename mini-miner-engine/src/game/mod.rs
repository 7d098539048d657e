//! Board Logic Module
//!
//! All board simulation code. Deterministic for a given seed, input frames
//! and frame deltas.
//!
//! ## Module Structure
//!
//! - `grid`: Cell storage, indexing, adjacency
//! - `matcher`: Row/column run detection and move hints
//! - `layout`: Column compaction and token spawning
//! - `motion`: Velocity steering and position integration
//! - `stage`: Animation stages and their handlers
//! - `state`: The `Board` aggregate
//! - `tick`: Per-frame driver and replay
//! - `input`: Input frames and recordings
//! - `events`: Board events
//! - `view`: Render snapshot
//! - `config`: Board configuration

pub mod config;
pub mod grid;
pub mod matcher;
pub mod layout;
pub mod motion;
pub mod stage;
pub mod state;
pub mod tick;
pub mod input;
pub mod events;
pub mod view;

// Re-export key types
pub use config::{BoardConfig, ConfigError};
pub use grid::{Grid, TokenType, GRID_WIDTH, GRID_HEIGHT, CELL_COUNT};
pub use stage::{Stage, StageFlow};
pub use state::Board;
pub use tick::{tick, replay_round, TickResult};
pub use input::{InputFrame, InputRecording};
pub use events::{BoardEvent, BoardEventData};
pub use view::{BoardView, CellView};
