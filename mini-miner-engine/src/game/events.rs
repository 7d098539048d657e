//! Board Events
//!
//! Events generated while the stage driver runs. Callers drain them after
//! every tick for sound cues, scoring, logging or replay comparison.

use serde::{Serialize, Deserialize};

use crate::game::grid::GRID_WIDTH;

/// Board event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEventData {
    /// Selection was discarded without touching the board
    /// (out of range, same cell twice, or not adjacent)
    SelectionCancelled {
        /// First selected index as given
        first: usize,
        /// Second selected index, if one arrived
        second: Option<usize>,
    },

    /// Adjacent swap produced no match and was reverted
    SwapRejected {
        /// First selected cell
        first: usize,
        /// Second selected cell
        second: usize,
    },

    /// Adjacent swap produced a match; the swap animation starts
    SwapAccepted {
        /// First selected cell
        first: usize,
        /// Second selected cell
        second: usize,
    },

    /// Matched cells were removed and refilled
    CellsCleared {
        /// Cells cleared in each column, left to right
        per_column: [u8; GRID_WIDTH],
        /// Sum of `per_column`
        total: u32,
        /// Chain reactions resolved before this clear (0 for the swap itself)
        cascade_depth: u32,
    },

    /// Motion stopped and no further matches exist
    BoardSettled {
        /// Chain reactions resolved since the swap
        cascade_depth: u32,
    },

    /// Chain reactions exceeded the configured cap
    CascadeLimitReached {
        /// Depth that hit the cap
        depth: u32,
    },

    /// Round ended and the board was regenerated
    RoundReset,
}

/// A board event stamped with the tick it happened on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardEvent {
    /// Tick when event occurred
    pub tick: u32,

    /// Event data
    pub data: BoardEventData,
}

impl BoardEvent {
    /// Create a new event.
    pub fn new(tick: u32, data: BoardEventData) -> Self {
        Self { tick, data }
    }

    /// Create selection cancelled event.
    pub fn selection_cancelled(tick: u32, first: usize, second: Option<usize>) -> Self {
        Self::new(tick, BoardEventData::SelectionCancelled { first, second })
    }

    /// Create swap rejected event.
    pub fn swap_rejected(tick: u32, first: usize, second: usize) -> Self {
        Self::new(tick, BoardEventData::SwapRejected { first, second })
    }

    /// Create swap accepted event.
    pub fn swap_accepted(tick: u32, first: usize, second: usize) -> Self {
        Self::new(tick, BoardEventData::SwapAccepted { first, second })
    }

    /// Create cells cleared event. `total` is derived from `per_column`.
    pub fn cells_cleared(tick: u32, per_column: [u8; GRID_WIDTH], cascade_depth: u32) -> Self {
        let total = per_column.iter().map(|c| *c as u32).sum();
        Self::new(
            tick,
            BoardEventData::CellsCleared {
                per_column,
                total,
                cascade_depth,
            },
        )
    }

    /// Create board settled event.
    pub fn board_settled(tick: u32, cascade_depth: u32) -> Self {
        Self::new(tick, BoardEventData::BoardSettled { cascade_depth })
    }

    /// Create cascade limit event.
    pub fn cascade_limit_reached(tick: u32, depth: u32) -> Self {
        Self::new(tick, BoardEventData::CascadeLimitReached { depth })
    }

    /// Create round reset event.
    pub fn round_reset(tick: u32) -> Self {
        Self::new(tick, BoardEventData::RoundReset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_cleared_total() {
        let event = BoardEvent::cells_cleared(12, [1, 1, 1, 0, 0, 3, 0, 0], 0);

        assert_eq!(event.tick, 12);
        match event.data {
            BoardEventData::CellsCleared { total, cascade_depth, .. } => {
                assert_eq!(total, 6);
                assert_eq!(cascade_depth, 0);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_event_json_shape() {
        let event = BoardEvent::swap_accepted(3, 10, 11);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"tick":3,"data":{"SwapAccepted":{"first":10,"second":11}}}"#);
    }
}
