//! Session module - workout state machine
//!
//! Re-exports only. All logic in submodules. Pure Rust, no browser types:
//! transitions return effect values and the bridge performs them.

mod effects;
mod state;

pub use effects::Effect;
pub use state::{Status, WorkoutSession, COUNTDOWN_SECONDS, REPS_PER_SET, REST_SECONDS};
