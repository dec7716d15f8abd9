//! Developer tooling: read-only world inspection.
//!
//! # Invariants
//! - Tools never mutate the world.

mod inspector;

pub use inspector::{ChunkInfo, WorldInspector, WorldSummary};

pub fn crate_info() -> &'static str {
    "automata-tools v0.1.0"
}
