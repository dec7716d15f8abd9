use std::time::{Duration, Instant};

use automata_common::{ChunkCoord, ColorIndex, ConfigError, LocalCoord};
use automata_kernel::{World, WorldError};
use glam::Vec2;
use rayon::prelude::*;

use crate::config::SimConfig;
use crate::timer::TickTimer;

/// Errors from driving the simulation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Statistics for a single tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickStats {
    pub tick: u64,
    pub tiles_evaluated: usize,
    pub tiles_changed: usize,
    pub chunks_created: usize,
    pub chunks_reclaimed: usize,
    /// Allocated chunks after reclamation.
    pub chunk_count: usize,
    pub duration: Duration,
}

/// Drives a [`World`] one tick at a time under the configured tile rule.
pub struct Simulator {
    config: SimConfig,
    world: World,
    tick: u64,
    playing: bool,
    time_until_tick: f32,
    elapsed: f32,
    last_stats: TickStats,
    timer: TickTimer,
}

impl Simulator {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let world = World::new(config.world.clone())?;
        Ok(Self {
            config,
            world,
            tick: 0,
            playing: false,
            time_until_tick: 0.0,
            elapsed: 0.0,
            last_stats: TickStats::default(),
            timer: TickTimer::new(64),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for bulk edits between ticks (e.g. seeding).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn last_stats(&self) -> &TickStats {
        &self.last_stats
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    /// Advance the simulation by one tick.
    ///
    /// Evaluates every tile of every chunk allocated at the start of the tick,
    /// writes changed tiles, then commits all buffers and reclaims empty chunks.
    pub fn tick(&mut self) -> Result<TickStats, SimError> {
        let _span = tracing::info_span!("tick", tick = self.tick + 1).entered();
        let start = Instant::now();

        let coords = self.world.chunk_coords();
        let chunks_before = coords.len();

        let (tiles_evaluated, tiles_changed) = if self.config.parallel {
            let (evaluated, changes) = self.evaluate_parallel(&coords);
            for &(pos, color) in &changes {
                self.world.set_color(pos, color, false)?;
            }
            (evaluated, changes.len())
        } else {
            self.evaluate_serial(&coords)?
        };
        let chunks_created = self.world.chunk_count() - chunks_before;

        self.world.commit_all();
        let chunks_reclaimed = self.world.reclaim_empty_chunks();

        self.tick += 1;
        let duration = start.elapsed();
        self.timer.record(duration);
        self.last_stats = TickStats {
            tick: self.tick,
            tiles_evaluated,
            tiles_changed,
            chunks_created,
            chunks_reclaimed,
            chunk_count: self.world.chunk_count(),
            duration,
        };

        tracing::trace!(
            evaluated = tiles_evaluated,
            changed = tiles_changed,
            created = chunks_created,
            reclaimed = chunks_reclaimed,
            chunks = self.last_stats.chunk_count,
            "tick complete"
        );
        Ok(self.last_stats.clone())
    }

    /// Evaluate and write in one pass. Returns `(evaluated, changed)` tile counts.
    fn evaluate_serial(&mut self, coords: &[ChunkCoord]) -> Result<(usize, usize), SimError> {
        let kernel = self.config.kernel;
        let palette_size = self.world.palette_size();
        let dimension = self.world.dimension();
        let mut neighbors = Vec::with_capacity(self.world.config().neighbor_tile_offsets.len());
        let mut evaluated = 0;
        let mut changed = 0;

        for &coord in coords {
            for x in 0..dimension {
                for y in 0..dimension {
                    evaluated += 1;
                    let pos = self.world.tile_position(coord, LocalCoord::new(x, y));
                    let current = self.world.color(pos);
                    self.world.neighbor_colors_into(pos, &mut neighbors);
                    let next = kernel.apply(current, &neighbors, palette_size);
                    if next != current {
                        self.world.set_color(pos, next, false)?;
                        changed += 1;
                    }
                }
            }
        }
        Ok((evaluated, changed))
    }

    /// Evaluate every tile against `&World` on the rayon pool.
    ///
    /// Returns the number of tiles evaluated and the changes to apply.
    fn evaluate_parallel(&self, coords: &[ChunkCoord]) -> (usize, Vec<(Vec2, ColorIndex)>) {
        let world = &self.world;
        let kernel = self.config.kernel;
        let palette_size = world.palette_size();
        let dimension = world.dimension();

        let per_chunk: Vec<(usize, Vec<(Vec2, ColorIndex)>)> = coords
            .par_iter()
            .map(|&coord| {
                let mut neighbors = Vec::new();
                let mut evaluated = 0;
                let mut changes = Vec::new();
                for x in 0..dimension {
                    for y in 0..dimension {
                        evaluated += 1;
                        let pos = world.tile_position(coord, LocalCoord::new(x, y));
                        let current = world.color(pos);
                        world.neighbor_colors_into(pos, &mut neighbors);
                        let next = kernel.apply(current, &neighbors, palette_size);
                        if next != current {
                            changes.push((pos, next));
                        }
                    }
                }
                (evaluated, changes)
            })
            .collect();

        let evaluated = per_chunk.iter().map(|(n, _)| n).sum();
        let changes = per_chunk.into_iter().flat_map(|(_, c)| c).collect();
        (evaluated, changes)
    }

    /// Feed elapsed wall time into the playback clock. Runs at most one tick.
    ///
    /// While paused the countdown is held at one full interval.
    pub fn advance(&mut self, dt: f32) -> Result<Option<TickStats>, SimError> {
        if !self.playing {
            self.time_until_tick = self.config.tick_interval;
            return Ok(None);
        }

        self.time_until_tick -= dt;
        self.elapsed += dt;
        if self.time_until_tick <= 0.0 {
            self.time_until_tick += self.config.tick_interval;
            return self.tick().map(Some);
        }
        Ok(None)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Seconds of playback time accumulated while playing.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn toggle_playing(&mut self) {
        self.set_playing(!self.playing);
    }

    pub fn pause(&mut self) {
        self.set_playing(false);
    }

    pub fn resume(&mut self) {
        self.set_playing(true);
    }

    fn set_playing(&mut self, playing: bool) {
        if self.playing != playing {
            tracing::info!(playing, "playback toggled");
        }
        self.playing = playing;
    }

    /// Paint a tile and make it visible immediately, without waiting for a tick.
    pub fn paint(&mut self, pos: Vec2, color: ColorIndex) -> Result<(), SimError> {
        self.world.set_color(pos, color, true)?;
        Ok(())
    }

    /// Drop every chunk. The tick counter and playback clock are kept.
    pub fn clear_world(&mut self) {
        self.world.clear();
    }
}
