use std::hint::black_box;
use std::time::Instant;

use automata_kernel::TileKernel;
use automata_sim::{Scatter, SimConfig, Simulator};

fn make_sim(kernel: TileKernel, radius: u32, parallel: bool) -> Simulator {
    let config = SimConfig {
        kernel,
        parallel,
        ..SimConfig::default()
    };
    let mut sim = Simulator::new(config).expect("default config is valid");
    Scatter {
        seed: 7,
        radius,
        fill: 0.5,
        max_color: 3,
        ..Scatter::default()
    }
    .apply(sim.world_mut())
    .expect("scatter colours are in the palette");
    sim
}

fn bench_ticks(kernel: TileKernel, radius: u32, parallel: bool, ticks: usize) {
    let mut sim = make_sim(kernel, radius, parallel);

    let start = Instant::now();
    for _ in 0..ticks {
        black_box(sim.tick().expect("tick on a valid world succeeds"));
    }
    let elapsed = start.elapsed();
    let per_tick = elapsed / ticks as u32;
    let mode = if parallel { "parallel" } else { "serial" };
    println!(
        "  {kernel} {mode} (r={radius}, {ticks} ticks, {} chunks at end): {per_tick:?}/tick, total {elapsed:?}",
        sim.world().chunk_count()
    );
}

fn main() {
    println!("=== Tick Benchmarks ===\n");

    for kernel in TileKernel::ALL {
        println!("{kernel}:");
        bench_ticks(kernel, 16, false, 50);
        bench_ticks(kernel, 16, true, 50);
        bench_ticks(kernel, 64, false, 10);
        bench_ticks(kernel, 64, true, 10);
    }

    println!("\n=== Done ===");
}
