//! Core primitives.
//!
//! Vector math, layout rectangle, seeded randomness, state hashing and
//! frame-delta smoothing. Nothing here knows about the board rules.

pub mod vec2;
pub mod rect;
pub mod rng;
pub mod hash;
pub mod timer;

// Re-export core types
pub use vec2::Vec2;
pub use rect::Rect;
pub use rng::{DeterministicRng, TokenSource};
pub use hash::{compute_state_hash, StateHash, StateHasher};
pub use timer::DeltaSmoother;
