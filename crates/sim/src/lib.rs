//! Simulation driver: ticks the world under a tile rule, on demand or on a playback clock.
//!
//! # Invariants
//! - Every kernel evaluation in a tick reads the previous buffer only.
//! - Buffer commit and chunk reclamation run after all evaluations of a tick.
//! - Edits cannot interleave with a tick: both need `&mut Simulator`.

mod config;
mod seed;
mod simulator;
mod timer;

pub use config::SimConfig;
pub use seed::{Scatter, SplitMix64};
pub use simulator::{SimError, Simulator, TickStats};
pub use timer::TickTimer;

pub fn crate_info() -> &'static str {
    "automata-sim v0.1.0"
}
