use automata_common::{BACKGROUND, ChunkCoord, ColorIndex, LocalCoord};
use automata_kernel::World;
use glam::{IVec2, Vec2};

/// Everything a renderer needs to draw one chunk.
#[derive(Debug, Clone, Copy)]
pub struct ChunkDraw<'a> {
    pub coord: ChunkCoord,
    /// World position of tile `(0, 0)`.
    pub origin: Vec2,
    /// World size of one tile.
    pub tile_width: f32,
    pub dimension: u32,
    /// Current-buffer colours, row-major.
    pub colors: &'a [ColorIndex],
}

impl ChunkDraw<'_> {
    /// World position of every non-background tile together with its colour.
    pub fn occupied_tiles(&self) -> impl Iterator<Item = (Vec2, ColorIndex)> + '_ {
        self.colors
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != BACKGROUND)
            .map(|(i, &c)| {
                let local = LocalCoord::from_index(i, self.dimension);
                let offset = Vec2::new(local.x as f32, local.y as f32) * self.tile_width;
                (self.origin + offset, c)
            })
    }
}

/// One draw batch per allocated chunk, sorted by chunk coordinate.
pub fn draw_batches(world: &World) -> Vec<ChunkDraw<'_>> {
    let tile_width = world.tile_width().x;
    let dimension = world.dimension();
    let mut batches: Vec<ChunkDraw<'_>> = world
        .chunks()
        .map(|(coord, chunk)| ChunkDraw {
            coord,
            origin: coord.origin(),
            tile_width,
            dimension,
            colors: chunk.current_colors(),
        })
        .collect();
    batches.sort_by_key(|b| b.coord);
    batches
}

/// A rectangular window of tiles, in global tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Bottom-left tile of the window.
    pub min_tile: IVec2,
    pub width: u32,
    pub height: u32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            min_tile: IVec2::new(-16, -16),
            width: 32,
            height: 32,
        }
    }
}

impl RenderView {
    /// A `(2 * radius + 1)`-wide square centred on a tile.
    pub fn centered(center: IVec2, radius: u32) -> Self {
        let r = radius as i32;
        Self {
            min_tile: center - IVec2::splat(r),
            width: 2 * radius + 1,
            height: 2 * radius + 1,
        }
    }
}

/// Renderer-agnostic interface. Renderers read world state and never mutate it.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given world state and view.
    fn render(&self, world: &World, view: &RenderView) -> Self::Output;
}

/// Text renderer for the CLI, logs, and tests. One glyph per tile, top row first.
#[derive(Debug, Clone)]
pub struct DebugTextRenderer {
    glyphs: Vec<char>,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self {
            glyphs: ".RGBCMY".chars().collect(),
        }
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom glyphs, indexed by colour. Colours past the end draw as `?`.
    pub fn with_glyphs(glyphs: impl Into<String>) -> Self {
        Self {
            glyphs: glyphs.into().chars().collect(),
        }
    }

    pub fn glyph(&self, color: ColorIndex) -> char {
        self.glyphs.get(color as usize).copied().unwrap_or('?')
    }
}

/// Chunk and local tile for a global tile coordinate.
fn tile_to_chunk_local(tile: IVec2, dimension: u32) -> (ChunkCoord, LocalCoord) {
    let d = dimension as i32;
    (
        ChunkCoord::new(tile.x.div_euclid(d), tile.y.div_euclid(d)),
        LocalCoord::new(tile.x.rem_euclid(d) as u32, tile.y.rem_euclid(d) as u32),
    )
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, world: &World, view: &RenderView) -> String {
        let dimension = world.dimension();
        let mut out = String::new();
        out.push_str(&format!(
            "=== World (chunks={}, view={}x{} at ({}, {})) ===\n",
            world.chunk_count(),
            view.width,
            view.height,
            view.min_tile.x,
            view.min_tile.y
        ));

        for row in (0..view.height as i32).rev() {
            for col in 0..view.width as i32 {
                let tile = view.min_tile + IVec2::new(col, row);
                let (coord, local) = tile_to_chunk_local(tile, dimension);
                let color = world
                    .chunk(coord)
                    .map_or(BACKGROUND, |chunk| chunk.current_color(local));
                out.push(self.glyph(color));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automata_common::WorldConfig;

    fn world() -> World {
        World::new(WorldConfig {
            chunk_dimension: 4,
            ..WorldConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn debug_renderer_empty_world() {
        let view = RenderView::centered(IVec2::ZERO, 1);
        let output = DebugTextRenderer::new().render(&world(), &view);
        assert!(output.contains("chunks=0"));
        assert!(output.ends_with("...\n...\n...\n"));
    }

    #[test]
    fn debug_renderer_draws_current_buffer() {
        let mut w = world();
        // Uncommitted: only the current buffer holds it, which is what renderers see.
        w.set_color(Vec2::new(0.25, 0.0), 1, false).unwrap();
        w.set_color(Vec2::new(-0.25, 0.25), 3, true).unwrap();

        let view = RenderView {
            min_tile: IVec2::new(-1, 0),
            width: 3,
            height: 2,
        };
        let output = DebugTextRenderer::new().render(&w, &view);
        let rows: Vec<&str> = output.lines().skip(1).collect();
        assert_eq!(rows, vec!["B..", "..R"]);
    }

    #[test]
    fn unknown_colours_use_placeholder() {
        let r = DebugTextRenderer::with_glyphs(" #");
        assert_eq!(r.glyph(0), ' ');
        assert_eq!(r.glyph(1), '#');
        assert_eq!(r.glyph(5), '?');
    }

    #[test]
    fn tile_to_chunk_handles_negatives() {
        assert_eq!(
            tile_to_chunk_local(IVec2::new(-1, 4), 4),
            (ChunkCoord::new(-1, 1), LocalCoord::new(3, 0))
        );
    }

    #[test]
    fn draw_batches_cover_every_chunk() {
        let mut w = world();
        w.set_color(Vec2::new(2.5, -1.5), 2, false).unwrap();
        let batches = draw_batches(&w);
        assert_eq!(batches.len(), w.chunk_count());
        assert!(batches.windows(2).all(|p| p[0].coord < p[1].coord));

        let occupied: Vec<(Vec2, ColorIndex)> =
            batches.iter().flat_map(|b| b.occupied_tiles()).collect();
        assert_eq!(occupied, vec![(Vec2::new(2.5, -1.5), 2)]);
        for b in &batches {
            assert_eq!(b.colors.len(), 16);
        }
    }

    #[test]
    fn render_view_centered() {
        let view = RenderView::centered(IVec2::new(5, 5), 2);
        assert_eq!(view.min_tile, IVec2::new(3, 3));
        assert_eq!(view.width, 5);
    }
}
