//! Automata kernel: chunk storage, the sparse world, and tile transition rules.
//!
//! # Invariants
//! - Reads during a tick observe the previous buffer only; writes go to the current buffer.
//! - A chunk is empty iff its occupancy counter is zero.
//! - An empty chunk is released only when every existing neighbour chunk is empty too.
//! - Tile rules are pure functions of the neighbour colours and the palette size.

pub mod chunk;
pub mod rules;
pub mod world;

pub use chunk::Chunk;
pub use rules::{TileKernel, UnknownKernel};
pub use world::{World, WorldError, chunk_local_to_world, world_to_chunk_local};
