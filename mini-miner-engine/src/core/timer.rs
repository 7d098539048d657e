//! Smoothed frame delta.
//!
//! The engine integrates motion with whatever delta the caller passes in.
//! Raw frame times jitter, so callers feed them through a [`DeltaSmoother`]
//! first. This is also where malformed deltas are guarded: the engine itself
//! trusts its input.

use std::collections::VecDeque;

/// Default number of frames averaged.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 10;

/// Moving average over the most recent frame deltas (seconds).
#[derive(Clone, Debug)]
pub struct DeltaSmoother {
    window: VecDeque<f32>,
    capacity: usize,
    sum: f32,
}

impl DeltaSmoother {
    /// Create a smoother averaging over `capacity` frames (min 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            sum: 0.0,
        }
    }

    /// Push a raw frame delta and return the smoothed delta.
    ///
    /// Negative, NaN and infinite deltas are recorded as 0.
    pub fn push(&mut self, raw_delta: f32) -> f32 {
        let delta = if raw_delta.is_finite() && raw_delta > 0.0 {
            raw_delta
        } else {
            0.0
        };

        if self.window.len() == self.capacity {
            if let Some(oldest) = self.window.pop_front() {
                self.sum -= oldest;
            }
        }
        self.window.push_back(delta);
        self.sum += delta;

        self.smoothed()
    }

    /// Current smoothed delta (0 before the first frame).
    pub fn smoothed(&self) -> f32 {
        if self.window.is_empty() {
            return 0.0;
        }
        (self.sum / self.window.len() as f32).max(0.0)
    }

    /// Drop all history.
    pub fn reset(&mut self) {
        self.window.clear();
        self.sum = 0.0;
    }
}

impl Default for DeltaSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoother_averages_window() {
        let mut smoother = DeltaSmoother::new(4);

        assert_eq!(smoother.smoothed(), 0.0);
        assert_eq!(smoother.push(0.02), 0.02);
        assert!((smoother.push(0.04) - 0.03).abs() < 1e-6);

        for _ in 0..4 {
            smoother.push(0.01);
        }
        assert!((smoother.smoothed() - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_smoother_guards_bad_deltas() {
        let mut smoother = DeltaSmoother::new(2);

        assert_eq!(smoother.push(-1.0), 0.0);
        assert_eq!(smoother.push(f32::NAN), 0.0);
        assert_eq!(smoother.push(f32::INFINITY), 0.0);
        assert!(smoother.smoothed().is_finite());
    }

    #[test]
    fn test_smoother_reset() {
        let mut smoother = DeltaSmoother::default();
        smoother.push(0.5);
        smoother.reset();
        assert_eq!(smoother.smoothed(), 0.0);
    }
}
