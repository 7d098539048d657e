//! Board State
//!
//! [`Board`] owns everything one running game needs: the grid, the validated
//! configuration, the current stage, the token source and the pending event
//! queue. The stage driver and the tick loop mutate it; renderers read it
//! through [`Board::view`].

use tracing::info;

use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::rng::{DeterministicRng, TokenSource};
use crate::game::config::{BoardConfig, ConfigError};
use crate::game::events::BoardEvent;
use crate::game::grid::Grid;
use crate::game::layout::random_token;
use crate::game::stage::Stage;
use crate::game::view::BoardView;

/// A running board.
#[derive(Debug, Clone)]
pub struct Board<R: TokenSource = DeterministicRng> {
    /// Cell data
    pub grid: Grid,

    /// Validated configuration (palette deduplicated)
    pub config: BoardConfig,

    /// Current animation stage
    pub stage: Stage,

    /// Ticks simulated so far
    pub tick: u32,

    /// Chain reactions resolved since the last player swap
    pub cascade_depth: u32,

    /// Random source for new tokens
    pub(crate) source: R,

    /// Events generated this tick
    pending_events: Vec<BoardEvent>,
}

impl Board<DeterministicRng> {
    /// Create a board seeded with a deterministic RNG.
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_source(config, DeterministicRng::new(seed))
    }
}

impl<R: TokenSource> Board<R> {
    /// Create a board drawing tokens from `source`.
    ///
    /// Fails if the configuration is invalid. Duplicate palette entries are
    /// dropped. The initial board is fully random and may already contain
    /// runs; they resolve after the first accepted swap.
    pub fn with_source(mut config: BoardConfig, source: R) -> Result<Self, ConfigError> {
        config.validate()?;
        config.dedup_palette();

        let mut board = Self {
            grid: Grid::new(config.container),
            config,
            stage: Stage::Idle,
            tick: 0,
            cascade_depth: 0,
            source,
            pending_events: Vec::with_capacity(8),
        };
        board.create_board();
        Ok(board)
    }

    /// Assign every cell a uniformly random token from the palette.
    ///
    /// No attempt is made to avoid pre-existing runs or boards without a
    /// legal move.
    pub fn create_board(&mut self) {
        let palette = &self.config.palette;
        for slot in self.grid.types.iter_mut() {
            *slot = random_token(palette, &mut self.source);
        }
        self.grid.reset_matches();
    }

    /// End the round: regenerate the board and drop any animation in flight.
    pub fn reset_round(&mut self) {
        info!(tick = self.tick, stage = self.stage.name(), "round reset");

        self.stage = Stage::Idle;
        self.grid.selection.clear();
        self.create_board();
        self.grid.snap_to_rest();
        self.cascade_depth = 0;
        self.push_event(BoardEvent::round_reset(self.tick));
    }

    /// Push a board event.
    pub fn push_event(&mut self, event: BoardEvent) {
        self.pending_events.push(event);
    }

    /// Take all pending events.
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Compute hash of the full simulation state, including the token
    /// source, so boards that would refill differently never hash alike.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, |hasher| {
            hasher.update_u8(self.stage.tag());
            if let Stage::AnimatingSwap { first, second } = self.stage {
                hasher.update_u32(first as u32);
                hasher.update_u32(second as u32);
            }
            hasher.update_u32(self.cascade_depth);
            for word in self.source.state_words() {
                hasher.update_u64(word);
            }

            for t in &self.grid.types {
                hasher.update_u8(t.0);
            }
            for flag in &self.grid.match_flags {
                hasher.update_bool(*flag);
            }
            for position in &self.grid.positions {
                hasher.update_vec2(*position);
            }
            for velocity in &self.grid.velocities {
                hasher.update_vec2(*velocity);
            }

            hasher.update_u8(self.grid.selection.len() as u8);
            for cell in &self.grid.selection {
                hasher.update_u32(*cell as u32);
            }
        })
    }

    /// Snapshot for a renderer.
    pub fn view(&self) -> BoardView {
        BoardView::capture(&self.grid, self.stage, self.tick)
    }
}

// =============================================================================
// TESTS
// =============================================================================
