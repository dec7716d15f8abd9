use std::collections::HashMap;

use automata_common::{BACKGROUND, ChunkCoord, ColorIndex, ConfigError, LocalCoord, WorldConfig};
use glam::Vec2;

use crate::chunk::Chunk;

/// Errors from world operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    #[error("colour {color} is outside the palette of {palette_size} colours")]
    ColorOutOfRange {
        color: ColorIndex,
        palette_size: usize,
    },
    #[error("position ({x}, {y}) is outside the addressable world")]
    PositionOutOfRange { x: f32, y: f32 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Positions must be finite and lie strictly inside the `i32` chunk range.
fn addressable(pos: Vec2) -> bool {
    pos.is_finite() && pos.abs().max_element() < i32::MAX as f32
}

/// Split a continuous world position into a chunk coordinate and a tile inside it.
///
/// The integer part selects the chunk, the fractional part scaled by
/// `dimension` selects the tile. Rounding can land exactly on `dimension` at
/// a chunk's upper border; that case wraps to tile `0` of the next chunk.
pub fn world_to_chunk_local(pos: Vec2, dimension: u32) -> (ChunkCoord, LocalCoord) {
    let (cx, lx) = split_axis(pos.x, dimension);
    let (cy, ly) = split_axis(pos.y, dimension);
    (ChunkCoord::new(cx, cy), LocalCoord::new(lx, ly))
}

fn split_axis(v: f32, dimension: u32) -> (i32, u32) {
    let floor = v.floor();
    let mut chunk = floor as i32;
    let mut local = ((v - floor) * dimension as f32).round_ties_even() as u32;
    if local >= dimension {
        local = 0;
        chunk = chunk.wrapping_add(1);
    }
    (chunk, local)
}

/// World position of a tile: `chunk + local * tile_width`.
pub fn chunk_local_to_world(chunk: ChunkCoord, local: LocalCoord, dimension: u32) -> Vec2 {
    let tile_width = 1.0 / dimension as f32;
    chunk.origin() + Vec2::new(local.x as f32, local.y as f32) * tile_width
}

/// Sparse, infinite grid of chunks.
///
/// Absent chunks read as background. Chunks are allocated on write (together
/// with their configured neighbour chunks so growth can spill over) and
/// released by [`World::reclaim_empty_chunks`].
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl World {
    /// Create an empty world. Fails if the configuration is invalid.
    pub fn new(config: WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;
        Ok(Self {
            config,
            chunks: HashMap::new(),
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn dimension(&self) -> u32 {
        self.config.chunk_dimension
    }

    pub fn palette_size(&self) -> usize {
        self.config.palette_size
    }

    /// Size of one tile in world units.
    pub fn tile_width(&self) -> Vec2 {
        self.config.tile_width()
    }

    /// Number of allocated chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Snapshot of all allocated chunk coordinates, in no particular order.
    ///
    /// Take this before a tick: writes during the tick may allocate new chunks.
    pub fn chunk_coords(&self) -> Vec<ChunkCoord> {
        self.chunks.keys().copied().collect()
    }

    pub fn contains_chunk(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Iterate all allocated chunks with their coordinates.
    pub fn chunks(&self) -> impl Iterator<Item = (ChunkCoord, &Chunk)> {
        self.chunks.iter().map(|(coord, chunk)| (*coord, chunk))
    }

    /// Resolve a world position to `(chunk, tile)` using this world's dimension.
    pub fn locate(&self, pos: Vec2) -> (ChunkCoord, LocalCoord) {
        world_to_chunk_local(pos, self.config.chunk_dimension)
    }

    /// World position of a tile in this world.
    pub fn tile_position(&self, chunk: ChunkCoord, local: LocalCoord) -> Vec2 {
        chunk_local_to_world(chunk, local, self.config.chunk_dimension)
    }

    /// Write a colour into the current buffer at `pos`.
    ///
    /// Allocates the target chunk and every chunk at a configured neighbour
    /// offset if absent. With `commit_immediately` the tile is also copied to
    /// the previous buffer so reads see it before the next tick commit.
    /// Non-finite positions and positions beyond the `i32` chunk range are
    /// rejected before anything is allocated.
    pub fn set_color(
        &mut self,
        pos: Vec2,
        color: ColorIndex,
        commit_immediately: bool,
    ) -> Result<(), WorldError> {
        if color as usize >= self.config.palette_size {
            return Err(WorldError::ColorOutOfRange {
                color,
                palette_size: self.config.palette_size,
            });
        }

        if !addressable(pos) {
            return Err(WorldError::PositionOutOfRange { x: pos.x, y: pos.y });
        }

        let (coord, local) = self.locate(pos);
        let dimension = self.config.chunk_dimension;
        for offset in &self.config.neighbor_chunk_offsets {
            let neighbor = coord + *offset;
            if !self.chunks.contains_key(&neighbor) {
                tracing::debug!(?neighbor, "allocating neighbour chunk");
                self.chunks.insert(neighbor, Chunk::new(dimension));
            }
        }

        let chunk = self.chunks.entry(coord).or_insert_with(|| {
            tracing::debug!(?coord, "allocating chunk");
            Chunk::new(dimension)
        });
        chunk.set_color(local, color);
        if commit_immediately {
            chunk.commit_tile(local);
        }
        Ok(())
    }

    /// Read the stable (previous-buffer) colour at `pos`. Absent chunks are background.
    pub fn color(&self, pos: Vec2) -> ColorIndex {
        let (coord, local) = self.locate(pos);
        self.chunks
            .get(&coord)
            .map_or(BACKGROUND, |chunk| chunk.color(local))
    }

    /// Colours at each configured neighbour tile offset, in configured order.
    pub fn neighbor_colors(&self, pos: Vec2) -> Vec<ColorIndex> {
        let mut out = Vec::with_capacity(self.config.neighbor_tile_offsets.len());
        self.neighbor_colors_into(pos, &mut out);
        out
    }

    /// Like [`World::neighbor_colors`] but reuses the caller's buffer.
    pub fn neighbor_colors_into(&self, pos: Vec2, out: &mut Vec<ColorIndex>) {
        let tile_width = self.tile_width();
        out.clear();
        out.extend(
            self.config
                .neighbor_tile_offsets
                .iter()
                .map(|offset| self.color(pos + tile_width * offset.as_vec2())),
        );
    }

    /// Copy current to previous in every chunk. The end-of-tick buffer swap.
    pub fn commit_all(&mut self) {
        for chunk in self.chunks.values_mut() {
            chunk.commit_all();
        }
    }

    /// Release every empty chunk whose existing neighbours are all empty too.
    ///
    /// Missing neighbours never keep a chunk alive. Returns the number of
    /// chunks released.
    pub fn reclaim_empty_chunks(&mut self) -> usize {
        let offsets = &self.config.neighbor_chunk_offsets;
        let doomed: Vec<ChunkCoord> = self
            .chunks
            .iter()
            .filter(|(_, chunk)| chunk.is_empty())
            .filter(|(coord, _)| {
                !offsets.iter().any(|offset| {
                    self.chunks
                        .get(&(**coord + *offset))
                        .is_some_and(|neighbor| !neighbor.is_empty())
                })
            })
            .map(|(coord, _)| *coord)
            .collect();

        for coord in &doomed {
            self.chunks.remove(coord);
        }
        if !doomed.is_empty() {
            tracing::debug!(
                released = doomed.len(),
                remaining = self.chunks.len(),
                "reclaimed empty chunks"
            );
        }
        doomed.len()
    }

    /// Drop every chunk.
    pub fn clear(&mut self) {
        let released = self.chunks.len();
        self.chunks.clear();
        tracing::info!(released, "world cleared");
    }

    /// Deterministic hash over both buffers of every chunk, independent of map order.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let mut coords = self.chunk_coords();
        coords.sort();
        for coord in coords {
            let chunk = &self.chunks[&coord];
            mix(&mut h, &coord.x.to_le_bytes());
            mix(&mut h, &coord.y.to_le_bytes());
            mix(&mut h, chunk.current_colors());
            mix(&mut h, chunk.previous_colors());
        }
        h
    }
}
