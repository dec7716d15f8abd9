use std::path::{Path, PathBuf};

use anyhow::Context;
use automata_input::{Action, Cursor};
use automata_kernel::TileKernel;
use automata_render::{DebugTextRenderer, RenderView, Renderer};
use automata_sim::{Scatter, SimConfig, Simulator};
use automata_tools::WorldInspector;
use clap::{Parser, Subcommand};
use glam::{IVec2, Vec2};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "automata-cli", about = "Run and inspect the sparse tile automaton")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Print the default simulation config
    Config {
        /// Emit JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
    /// Seed a random pattern, run ticks, and render the result as text
    Run {
        /// Simulation config (.yaml, .yml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Tile rule: grow, mix or dissolve (overrides the config)
        #[arg(short, long)]
        kernel: Option<TileKernel>,
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "20")]
        ticks: u64,
        /// Seed for the initial pattern
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Half-width of the seeded square, in tiles
        #[arg(long, default_value = "8")]
        radius: u32,
        /// Fraction of seeded tiles that get a colour
        #[arg(long, default_value = "0.5")]
        fill: f32,
        /// Highest colour to seed (defaults to the primaries for mix, the full palette otherwise)
        #[arg(long)]
        max_color: Option<u8>,
        /// Evaluate tiles in parallel
        #[arg(long)]
        parallel: bool,
        /// Half-width of the rendered view, in tiles
        #[arg(long, default_value = "16")]
        view: u32,
        /// Render a frame every N ticks (0 renders only the first and last)
        #[arg(long, default_value = "0")]
        every: u64,
    },
}

fn load_config(path: &Path) -> anyhow::Result<SimConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&text)
            .with_context(|| format!("parsing YAML config {}", path.display()))?,
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("parsing JSON config {}", path.display()))?,
        _ => anyhow::bail!(
            "unsupported config extension for {} (expected .yaml, .yml or .json)",
            path.display()
        ),
    };
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("automata-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("sim: {}", automata_sim::crate_info());
            println!("render: {}", automata_render::crate_info());
            println!("input: {}", automata_input::crate_info());
            println!("tools: {}", automata_tools::crate_info());
            let kernels: Vec<&str> = TileKernel::ALL.iter().map(|k| k.name()).collect();
            println!("kernels: {}", kernels.join(", "));
        }
        Commands::Config { json } => {
            let config = SimConfig::default();
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", serde_yaml::to_string(&config)?);
            }
        }
        Commands::Run {
            config,
            kernel,
            ticks,
            seed,
            radius,
            fill,
            max_color,
            parallel,
            view,
            every,
        } => {
            let mut sim_config = match config {
                Some(path) => load_config(&path)?,
                None => SimConfig::default(),
            };
            if let Some(kernel) = kernel {
                sim_config.kernel = kernel;
            }
            sim_config.parallel |= parallel;

            let mut sim = Simulator::new(sim_config).context("building simulator")?;
            let max_color = max_color.unwrap_or(match sim.config().kernel {
                TileKernel::Mix => 3,
                TileKernel::Grow | TileKernel::Dissolve => u8::MAX,
            });
            let painted = Scatter {
                seed,
                center: Vec2::ZERO,
                radius,
                fill,
                max_color,
            }
            .apply(sim.world_mut())?;
            tracing::info!(painted, kernel = %sim.config().kernel, "seeded world");

            let renderer = DebugTextRenderer::new();
            let render_view = RenderView::centered(IVec2::ZERO, view);
            println!("{}", renderer.render(sim.world(), &render_view));

            // Drive the playback clock the way an interactive front end would.
            let mut cursor = Cursor::for_simulator(&sim);
            automata_input::apply(Action::TogglePlaying, &mut cursor, &mut sim)?;
            let interval = sim.config().tick_interval;
            while sim.tick_count() < ticks {
                let Some(stats) = sim.advance(interval)? else {
                    continue;
                };
                tracing::debug!(
                    tick = stats.tick,
                    changed = stats.tiles_changed,
                    chunks = stats.chunk_count,
                    "tick"
                );
                if every > 0 && stats.tick % every == 0 && stats.tick < ticks {
                    println!("{}", renderer.render(sim.world(), &render_view));
                }
            }
            automata_input::apply(Action::TogglePlaying, &mut cursor, &mut sim)?;

            println!("{}", renderer.render(sim.world(), &render_view));
            println!("{}", WorldInspector::summary(&sim));
            let timer = sim.timer();
            println!(
                "Tick time: avg={:?} min={:?} max={:?} over {} ticks",
                timer.average(),
                timer.min(),
                timer.max(),
                timer.count()
            );
        }
    }

    Ok(())
}
