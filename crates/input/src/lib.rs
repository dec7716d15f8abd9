//! Interaction layer: raw input is mapped to [`Action`]s, which are applied to a simulator.
//!
//! # Invariants
//! - Actions are the only way this layer touches the world.
//! - Edits never interleave with a tick.

pub mod action;
pub mod cursor;

pub use action::{Action, ButtonEdge, InteractButton};
pub use cursor::{Cursor, Outcome, apply};

pub fn crate_info() -> &'static str {
    "automata-input v0.1.0"
}
