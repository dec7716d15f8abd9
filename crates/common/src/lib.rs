//! Shared value types and world configuration.
//!
//! # Invariants
//! - Colour index `0` is the background.
//! - Configuration is validated once at construction and immutable thereafter.

pub mod config;
pub mod types;

pub use config::{
    ConfigError, MAX_CHUNK_DIMENSION, MAX_PALETTE_SIZE, WorldConfig, moore, von_neumann,
};
pub use types::{BACKGROUND, ChunkCoord, ColorIndex, LocalCoord};
