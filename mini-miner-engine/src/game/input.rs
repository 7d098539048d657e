//! Input Frames and Recording
//!
//! The input collaborator delivers one [`InputFrame`] per tick: a round-end
//! signal plus at most one newly selected cell. Frames are recorded sparsely
//! (only ticks that carried input) so a round can be replayed exactly.

use serde::{Serialize, Deserialize};

use crate::core::hash::{StateHash, StateHasher};

// =============================================================================
// INPUT TYPES
// =============================================================================

/// Input for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    /// End the current round (timer expired or end button clicked)
    pub end_round: bool,

    /// Cell selected this tick, if any. Out-of-range values are passed
    /// through and rejected by the stage driver.
    pub selected_cell: Option<u8>,
}

impl InputFrame {
    /// Create an idle frame.
    pub const fn new() -> Self {
        Self {
            end_round: false,
            selected_cell: None,
        }
    }

    /// Frame selecting one cell.
    pub const fn select(cell: u8) -> Self {
        Self {
            end_round: false,
            selected_cell: Some(cell),
        }
    }

    /// Frame ending the round.
    pub const fn end_round() -> Self {
        Self {
            end_round: true,
            selected_cell: None,
        }
    }

    /// Check if this is an idle frame (no input).
    #[inline]
    pub fn is_idle(&self) -> bool {
        !self.end_round && self.selected_cell.is_none()
    }
}

/// A non-idle frame and the tick it was captured on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedInput {
    /// Tick the frame applies to
    pub tick: u32,
    /// The frame
    pub frame: InputFrame,
}

// =============================================================================
// INPUT RECORDING
// =============================================================================

/// Complete input recording for one round.
///
/// Used for replay playback and determinism checks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputRecording {
    /// Seed the board was created with
    pub rng_seed: u64,

    /// Last tick covered by the recording (`None` until a tick is recorded)
    pub end_tick: Option<u32>,

    /// Frame delta (seconds) every tick was simulated with
    pub dt: f32,

    /// Non-idle frames in ascending tick order
    entries: Vec<TimedInput>,
}

impl InputRecording {
    /// Create an empty recording.
    pub fn new(rng_seed: u64, dt: f32) -> Self {
        Self {
            rng_seed,
            end_tick: None,
            dt,
            entries: Vec::with_capacity(128),
        }
    }

    /// Record input for a tick.
    ///
    /// Idle frames only advance `end_tick`. Ticks must be non-decreasing;
    /// a repeated tick replaces the earlier frame.
    pub fn record(&mut self, tick: u32, frame: InputFrame) {
        self.end_tick = Some(self.end_tick.map_or(tick, |end| end.max(tick)));

        if frame.is_idle() {
            return;
        }

        match self.entries.last_mut() {
            Some(last) if last.tick == tick => last.frame = frame,
            _ => self.entries.push(TimedInput { tick, frame }),
        }
    }

    /// Get input at a specific tick (idle if nothing was recorded).
    ///
    /// Uses binary search for efficiency.
    pub fn input_at(&self, tick: u32) -> InputFrame {
        match self.entries.binary_search_by_key(&tick, |e| e.tick) {
            Ok(idx) => self.entries[idx].frame,
            Err(_) => InputFrame::new(),
        }
    }

    /// All recorded (non-idle) entries.
    pub fn entries(&self) -> &[TimedInput] {
        &self.entries
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Create iterator over every tick from 0 to `end_tick` inclusive.
    /// Yields nothing if no tick was recorded.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            recording: self,
            current_tick: 0,
            entry_idx: 0,
        }
    }

    /// Hash of the recording contents.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_input_recording();
        hasher.update_u64(self.rng_seed);
        match self.end_tick {
            Some(end) => {
                hasher.update_bool(true);
                hasher.update_u32(end);
            }
            None => hasher.update_bool(false),
        }
        hasher.update_f32(self.dt);
        for entry in &self.entries {
            hasher.update_u32(entry.tick);
            hasher.update_bool(entry.frame.end_round);
            match entry.frame.selected_cell {
                Some(cell) => {
                    hasher.update_bool(true);
                    hasher.update_u8(cell);
                }
                None => hasher.update_bool(false),
            }
        }
        hasher.finalize()
    }

    /// Encode to compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode from binary.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

/// Iterator for replaying inputs tick-by-tick.
pub struct ReplayIterator<'a> {
    recording: &'a InputRecording,
    current_tick: u32,
    entry_idx: usize,
}

impl<'a> Iterator for ReplayIterator<'a> {
    type Item = (u32, InputFrame);

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.recording.end_tick?;
        if self.current_tick > end {
            return None;
        }

        let tick = self.current_tick;
        let frame = match self.recording.entries.get(self.entry_idx) {
            Some(entry) if entry.tick == tick => {
                self.entry_idx += 1;
                entry.frame
            }
            _ => InputFrame::new(),
        };

        self.current_tick += 1;
        Some((tick, frame))
    }
}

// =============================================================================
// TESTS
// =============================================================================
