use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Palette index of a single tile. `0` is the background.
pub type ColorIndex = u8;

/// The background colour. Absent chunks read as all-background.
pub const BACKGROUND: ColorIndex = 0;

/// Integer coordinate of a chunk in the infinite world grid.
///
/// A chunk at `(x, y)` covers world positions `[x, x + 1) x [y, y + 1)`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World position of the chunk's `(0, 0)` tile.
    pub fn origin(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

/// Offsetting wraps at the `i32` bounds.
impl Add<IVec2> for ChunkCoord {
    type Output = ChunkCoord;

    fn add(self, offset: IVec2) -> ChunkCoord {
        ChunkCoord::new(self.x.wrapping_add(offset.x), self.y.wrapping_add(offset.y))
    }
}

impl From<IVec2> for ChunkCoord {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<ChunkCoord> for IVec2 {
    fn from(c: ChunkCoord) -> Self {
        IVec2::new(c.x, c.y)
    }
}

/// Tile coordinate inside a chunk, each axis in `0..dimension`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalCoord {
    pub x: u32,
    pub y: u32,
}

impl LocalCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Row-major index into a `dimension * dimension` buffer.
    ///
    /// # Panics
    ///
    /// Panics if either axis is outside `0..dimension`.
    pub fn index(self, dimension: u32) -> usize {
        assert!(
            self.x < dimension && self.y < dimension,
            "local tile ({}, {}) outside a chunk of dimension {dimension}",
            self.x,
            self.y
        );
        self.x as usize + self.y as usize * dimension as usize
    }

    /// Inverse of [`LocalCoord::index`].
    pub fn from_index(index: usize, dimension: u32) -> Self {
        let d = dimension as usize;
        Self::new((index % d) as u32, (index / d) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_coord_offset() {
        let c = ChunkCoord::new(2, -3) + IVec2::new(-1, 1);
        assert_eq!(c, ChunkCoord::new(1, -2));
    }

    #[test]
    fn chunk_coord_offset_wraps_at_bounds() {
        let c = ChunkCoord::new(i32::MAX, i32::MIN) + IVec2::new(1, -1);
        assert_eq!(c, ChunkCoord::new(i32::MIN, i32::MAX));
    }

    #[test]
    fn chunk_coord_origin() {
        assert_eq!(ChunkCoord::new(-4, 7).origin(), Vec2::new(-4.0, 7.0));
    }

    #[test]
    fn local_index_is_row_major() {
        assert_eq!(LocalCoord::new(3, 0).index(8), 3);
        assert_eq!(LocalCoord::new(0, 1).index(8), 8);
        assert_eq!(LocalCoord::new(7, 7).index(8), 63);
        assert_eq!(LocalCoord::from_index(19, 8), LocalCoord::new(3, 2));
    }

    #[test]
    #[should_panic(expected = "outside a chunk")]
    fn local_index_rejects_column_past_edge() {
        LocalCoord::new(8, 0).index(8);
    }

    #[test]
    fn chunk_coord_ivec_conversion() {
        let c = ChunkCoord::new(5, -6);
        let v: IVec2 = c.into();
        assert_eq!(ChunkCoord::from(v), c);
    }
}
