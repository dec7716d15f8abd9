use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Colour indices are stored as `u8`, so a palette can hold at most 256 entries.
pub const MAX_PALETTE_SIZE: usize = 256;

/// Largest accepted chunk side. Keeps `dimension * dimension` well inside `u32`.
pub const MAX_CHUNK_DIMENSION: u32 = 4096;

/// Errors detected while validating configuration. All are fatal at construction time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("chunk dimension must be positive, got {0}")]
    InvalidChunkDimension(u32),
    #[error("chunk dimension {size} exceeds the maximum of {max}")]
    ChunkDimensionTooLarge { size: u32, max: u32 },
    #[error("palette size must be at least 1, got {0}")]
    InvalidPaletteSize(usize),
    #[error("palette size {size} exceeds the maximum of {max}")]
    PaletteTooLarge { size: usize, max: usize },
    #[error("the mix kernel emits colours up to {required_max}, palette size is {size}")]
    MixPaletteTooSmall { size: usize, required_max: usize },
    #[error("tick interval must be a positive number of seconds, got {0}")]
    InvalidTickInterval(f32),
}

/// Immutable world configuration, supplied once at world construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Tiles per chunk side (`D`).
    pub chunk_dimension: u32,
    /// Number of colour indices including the background (`N`).
    pub palette_size: usize,
    /// Chunk deltas pre-allocated around every write and checked during reclamation.
    pub neighbor_chunk_offsets: Vec<IVec2>,
    /// Tile deltas sampled to build a tile's neighbourhood, in kernel input order.
    pub neighbor_tile_offsets: Vec<IVec2>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_dimension: 16,
            palette_size: 7,
            neighbor_chunk_offsets: moore(),
            neighbor_tile_offsets: moore(),
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_dimension == 0 {
            return Err(ConfigError::InvalidChunkDimension(self.chunk_dimension));
        }
        if self.chunk_dimension > MAX_CHUNK_DIMENSION {
            return Err(ConfigError::ChunkDimensionTooLarge {
                size: self.chunk_dimension,
                max: MAX_CHUNK_DIMENSION,
            });
        }
        if self.palette_size == 0 {
            return Err(ConfigError::InvalidPaletteSize(self.palette_size));
        }
        if self.palette_size > MAX_PALETTE_SIZE {
            return Err(ConfigError::PaletteTooLarge {
                size: self.palette_size,
                max: MAX_PALETTE_SIZE,
            });
        }
        Ok(())
    }

    /// Size of one tile in world units on each axis (`1 / D`).
    pub fn tile_width(&self) -> Vec2 {
        Vec2::splat(1.0 / self.chunk_dimension as f32)
    }

    /// Tiles per chunk.
    pub fn tiles_per_chunk(&self) -> usize {
        let d = self.chunk_dimension as usize;
        d * d
    }
}

/// The 8-connected ring, row by row starting at the bottom-left.
pub fn moore() -> Vec<IVec2> {
    let mut ring = Vec::with_capacity(8);
    for y in -1..=1 {
        for x in -1..=1 {
            if x != 0 || y != 0 {
                ring.push(IVec2::new(x, y));
            }
        }
    }
    ring
}

/// The 4-connected ring: left, right, down, up.
pub fn von_neumann() -> Vec<IVec2> {
    vec![
        IVec2::new(-1, 0),
        IVec2::new(1, 0),
        IVec2::new(0, -1),
        IVec2::new(0, 1),
    ]
}
