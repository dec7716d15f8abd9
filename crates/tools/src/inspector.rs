use automata_common::{BACKGROUND, ChunkCoord};
use automata_kernel::{Chunk, TileKernel, World};
use automata_sim::Simulator;

/// World inspector for developer tooling.
///
/// Read-only queries against simulation state for debugging and the CLI.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the simulation state.
    pub fn summary(sim: &Simulator) -> WorldSummary {
        let world = sim.world();
        WorldSummary {
            tick: sim.tick_count(),
            kernel: sim.config().kernel,
            chunk_count: world.chunk_count(),
            empty_chunks: world.chunks().filter(|(_, c)| c.is_empty()).count(),
            occupied_tiles: world.chunks().map(|(_, c)| occupied(c)).sum(),
            playing: sim.is_playing(),
        }
    }

    /// Details of one chunk, if allocated.
    pub fn inspect_chunk(world: &World, coord: ChunkCoord) -> Option<ChunkInfo> {
        world.chunk(coord).map(|chunk| ChunkInfo {
            coord,
            used_tile_count: chunk.used_tile_count(),
            occupied_tiles: occupied(chunk),
            empty: chunk.is_empty(),
        })
    }

    /// All allocated chunk coordinates, sorted.
    pub fn list_chunks(world: &World) -> Vec<ChunkCoord> {
        let mut coords = world.chunk_coords();
        coords.sort();
        coords
    }

    /// Tile count per colour index over every chunk's current buffer.
    ///
    /// Only allocated chunks are counted, so the background entry is a lower bound.
    pub fn color_histogram(world: &World) -> Vec<usize> {
        let mut counts = vec![0; world.palette_size()];
        for (_, chunk) in world.chunks() {
            for &c in chunk.current_colors() {
                if let Some(slot) = counts.get_mut(c as usize) {
                    *slot += 1;
                }
            }
        }
        counts
    }
}

fn occupied(chunk: &Chunk) -> usize {
    chunk
        .current_colors()
        .iter()
        .filter(|&&c| c != BACKGROUND)
        .count()
}

/// Summary of simulation state for the inspector.
#[derive(Debug, Clone)]
pub struct WorldSummary {
    pub tick: u64,
    pub kernel: TileKernel,
    pub chunk_count: usize,
    pub empty_chunks: usize,
    pub occupied_tiles: usize,
    pub playing: bool,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: tick={} kernel={} chunks={} empty_chunks={} occupied_tiles={} playing={}",
            self.tick,
            self.kernel,
            self.chunk_count,
            self.empty_chunks,
            self.occupied_tiles,
            self.playing
        )
    }
}

/// Detailed info about a single chunk.
#[derive(Debug, Clone)]
pub struct ChunkInfo {
    pub coord: ChunkCoord,
    /// Incrementally tracked occupancy counter.
    pub used_tile_count: i32,
    /// Occupancy from a scan of the current buffer.
    pub occupied_tiles: usize,
    pub empty: bool,
}

impl std::fmt::Display for ChunkInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk ({}, {}) used={} occupied={} empty={}",
            self.coord.x, self.coord.y, self.used_tile_count, self.occupied_tiles, self.empty
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automata_sim::SimConfig;
    use glam::Vec2;

    fn sim() -> Simulator {
        Simulator::new(SimConfig::default()).unwrap()
    }

    #[test]
    fn summary_empty_world() {
        let summary = WorldInspector::summary(&sim());
        assert_eq!(summary.tick, 0);
        assert_eq!(summary.chunk_count, 0);
        assert_eq!(summary.occupied_tiles, 0);
    }

    #[test]
    fn summary_after_paint_and_tick() {
        let mut s = sim();
        s.paint(Vec2::ZERO, 1).unwrap();
        let summary = WorldInspector::summary(&s);
        assert_eq!(summary.chunk_count, 9);
        assert_eq!(summary.empty_chunks, 8);
        assert_eq!(summary.occupied_tiles, 1);

        s.tick().unwrap();
        let summary = WorldInspector::summary(&s);
        assert_eq!(summary.tick, 1);
        assert_eq!(summary.occupied_tiles, 8);
    }

    #[test]
    fn inspect_chunk_found() {
        let mut s = sim();
        s.paint(Vec2::new(0.5, 0.5), 2).unwrap();
        let info = WorldInspector::inspect_chunk(s.world(), ChunkCoord::new(0, 0)).unwrap();
        assert_eq!(info.used_tile_count, 1);
        assert_eq!(info.occupied_tiles, 1);
        assert!(!info.empty);
        assert!(format!("{info}").contains("used=1"));
    }

    #[test]
    fn inspect_chunk_not_found() {
        assert!(WorldInspector::inspect_chunk(sim().world(), ChunkCoord::new(3, 3)).is_none());
    }

    #[test]
    fn list_chunks_sorted() {
        let mut s = sim();
        s.paint(Vec2::new(5.0, -5.0), 1).unwrap();
        let coords = WorldInspector::list_chunks(s.world());
        assert_eq!(coords.len(), 9);
        assert!(coords.windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn histogram_counts_current_buffer() {
        let mut s = sim();
        s.paint(Vec2::ZERO, 1).unwrap();
        s.world_mut()
            .set_color(Vec2::new(0.5, 0.0), 3, false)
            .unwrap();
        let h = WorldInspector::color_histogram(s.world());
        assert_eq!(h.len(), 7);
        assert_eq!(h[1], 1);
        assert_eq!(h[3], 1);
        assert_eq!(h.iter().sum::<usize>(), 9 * 256);
    }

    #[test]
    fn summary_display() {
        let s = format!("{}", WorldInspector::summary(&sim()));
        assert!(s.contains("tick=0"));
        assert!(s.contains("kernel=grow"));
    }
}
