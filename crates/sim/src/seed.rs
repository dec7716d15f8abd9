use automata_common::ColorIndex;
use automata_kernel::{World, WorldError};
use glam::Vec2;

/// Splitmix64 stream. Fast, deterministic across platforms, no floating point in the state.
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in `0..bound`. `bound` must be non-zero.
    pub fn next_below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }

    /// Uniform in `[0, 1)`.
    pub fn next_unit(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}

/// Paints a square of random colours around a point, committing each tile immediately.
#[derive(Debug, Clone)]
pub struct Scatter {
    pub seed: u64,
    /// World position of the centre tile.
    pub center: Vec2,
    /// Half-width of the square, in tiles.
    pub radius: u32,
    /// Probability that a tile in the square is painted.
    pub fill: f32,
    /// Highest colour to paint; clamped to the palette. Colours start at 1.
    pub max_color: ColorIndex,
}

impl Default for Scatter {
    fn default() -> Self {
        Self {
            seed: 42,
            center: Vec2::ZERO,
            radius: 8,
            fill: 0.5,
            max_color: ColorIndex::MAX,
        }
    }
}

impl Scatter {
    /// Returns the number of tiles painted.
    pub fn apply(&self, world: &mut World) -> Result<usize, WorldError> {
        let highest = (world.palette_size() - 1).min(self.max_color as usize) as u64;
        if highest == 0 {
            return Ok(0);
        }

        let mut rng = SplitMix64::new(self.seed);
        let tile_width = world.tile_width();
        let r = self.radius as i32;
        let mut painted = 0;
        for dy in -r..=r {
            for dx in -r..=r {
                if rng.next_unit() >= self.fill {
                    continue;
                }
                let color = 1 + rng.next_below(highest) as ColorIndex;
                let pos = self.center + tile_width * Vec2::new(dx as f32, dy as f32);
                world.set_color(pos, color, true)?;
                painted += 1;
            }
        }
        tracing::debug!(painted, seed = self.seed, "scattered seed pattern");
        Ok(painted)
    }
}
