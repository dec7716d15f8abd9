use automata_common::{BACKGROUND, ColorIndex, LocalCoord};

/// A square block of `D x D` tiles with a double-buffered colour array.
///
/// Writes land in the *current* buffer; reads come from the *previous*
/// buffer, so every read during a tick observes pre-tick state regardless of
/// write order. The two are reconciled by the commit operations.
#[derive(Debug, Clone)]
pub struct Chunk {
    dimension: u32,
    current: Vec<ColorIndex>,
    previous: Vec<ColorIndex>,
    /// Occupied-tile counter, maintained incrementally against the previous buffer.
    used_tiles: i32,
}

impl Chunk {
    /// Allocate an all-background chunk.
    pub fn new(dimension: u32) -> Self {
        let len = (dimension as usize) * (dimension as usize);
        Self {
            dimension,
            current: vec![BACKGROUND; len],
            previous: vec![BACKGROUND; len],
            used_tiles: 0,
        }
    }

    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    /// Write `color` into the current buffer.
    ///
    /// The occupancy counter compares against the *previous* buffer value, not
    /// the value being overwritten. Writing the same tile more than once
    /// before a commit therefore counts each write. Panics if `local` is
    /// outside the chunk.
    pub fn set_color(&mut self, local: LocalCoord, color: ColorIndex) {
        let index = local.index(self.dimension);
        let baseline = self.previous[index];
        self.current[index] = color;

        if baseline != BACKGROUND && color == BACKGROUND {
            self.used_tiles -= 1;
        } else if baseline == BACKGROUND && color != BACKGROUND {
            self.used_tiles += 1;
        }
    }

    /// Read from the previous buffer.
    pub fn color(&self, local: LocalCoord) -> ColorIndex {
        self.previous[local.index(self.dimension)]
    }

    /// Read the in-progress value from the current buffer.
    pub fn current_color(&self, local: LocalCoord) -> ColorIndex {
        self.current[local.index(self.dimension)]
    }

    /// Copy one tile from current to previous. Used by immediate edits.
    pub fn commit_tile(&mut self, local: LocalCoord) {
        let index = local.index(self.dimension);
        self.previous[index] = self.current[index];
    }

    /// Copy the whole current buffer to previous. The end-of-tick swap.
    pub fn commit_all(&mut self) {
        self.previous.copy_from_slice(&self.current);
    }

    pub fn is_empty(&self) -> bool {
        self.used_tiles == 0
    }

    /// Occupancy counter as tracked incrementally (see [`Chunk::set_color`]).
    pub fn used_tile_count(&self) -> i32 {
        self.used_tiles
    }

    /// Read-only view of the current buffer, row-major. Used for draw submission.
    pub fn current_colors(&self) -> &[ColorIndex] {
        &self.current
    }

    /// Read-only view of the previous buffer, row-major.
    pub fn previous_colors(&self) -> &[ColorIndex] {
        &self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_current_background(chunk: &Chunk) -> bool {
        chunk.current_colors().iter().all(|&c| c == BACKGROUND)
    }

    #[test]
    fn new_chunk_is_empty() {
        let chunk = Chunk::new(4);
        assert!(chunk.is_empty());
        assert_eq!(chunk.current_colors().len(), 16);
        assert_eq!(chunk.previous_colors().len(), 16);
        assert!(all_current_background(&chunk));
    }

    #[test]
    fn write_is_invisible_until_committed() {
        let mut chunk = Chunk::new(4);
        let at = LocalCoord::new(1, 2);
        chunk.set_color(at, 3);
        assert_eq!(chunk.color(at), 0);
        assert_eq!(chunk.current_color(at), 3);

        chunk.commit_tile(at);
        assert_eq!(chunk.color(at), 3);
    }

    #[test]
    fn commit_tile_touches_only_that_tile() {
        let mut chunk = Chunk::new(4);
        chunk.set_color(LocalCoord::new(0, 0), 1);
        chunk.set_color(LocalCoord::new(3, 3), 2);
        chunk.commit_tile(LocalCoord::new(0, 0));
        assert_eq!(chunk.color(LocalCoord::new(0, 0)), 1);
        assert_eq!(chunk.color(LocalCoord::new(3, 3)), 0);
    }

    #[test]
    fn commit_all_copies_every_tile() {
        let mut chunk = Chunk::new(3);
        for i in 0..9 {
            chunk.set_color(LocalCoord::from_index(i, 3), (i % 3) as ColorIndex);
        }
        chunk.commit_all();
        assert_eq!(chunk.previous_colors(), chunk.current_colors());
    }

    #[test]
    fn occupancy_tracks_single_writes_per_tick() {
        let mut chunk = Chunk::new(4);
        chunk.set_color(LocalCoord::new(0, 0), 1);
        chunk.set_color(LocalCoord::new(1, 0), 2);
        assert_eq!(chunk.used_tile_count(), 2);
        assert!(!chunk.is_empty());
        chunk.commit_all();

        chunk.set_color(LocalCoord::new(0, 0), 0);
        chunk.commit_all();
        assert_eq!(chunk.used_tile_count(), 1);

        chunk.set_color(LocalCoord::new(1, 0), 0);
        chunk.commit_all();
        assert!(chunk.is_empty());
        assert!(all_current_background(&chunk));
    }

    #[test]
    fn recolouring_an_occupied_tile_keeps_count() {
        let mut chunk = Chunk::new(2);
        chunk.set_color(LocalCoord::new(0, 0), 1);
        chunk.commit_all();
        chunk.set_color(LocalCoord::new(0, 0), 2);
        assert_eq!(chunk.used_tile_count(), 1);
    }

    #[test]
    fn double_write_in_one_tick_double_counts() {
        // Baseline is the previous buffer, so two writes before a commit both count.
        let mut chunk = Chunk::new(2);
        let at = LocalCoord::new(1, 1);
        chunk.set_color(at, 1);
        chunk.set_color(at, 2);
        assert_eq!(chunk.used_tile_count(), 2);

        // Writing background back does not undo either increment.
        chunk.set_color(at, 0);
        assert_eq!(chunk.used_tile_count(), 2);
        assert!(all_current_background(&chunk));
        assert!(!chunk.is_empty());
    }

    #[test]
    fn double_clear_in_one_tick_undercounts() {
        let mut chunk = Chunk::new(2);
        let at = LocalCoord::new(0, 1);
        chunk.set_color(at, 4);
        chunk.commit_all();

        chunk.set_color(at, 0);
        chunk.set_color(at, 0);
        assert_eq!(chunk.used_tile_count(), -1);
    }

    #[test]
    #[should_panic(expected = "outside a chunk")]
    fn write_past_the_edge_panics() {
        let mut chunk = Chunk::new(4);
        chunk.set_color(LocalCoord::new(4, 0), 1);
    }
}
