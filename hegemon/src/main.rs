use anyhow::Result;
use clap::Parser;
use hegemon_core::{
    step_world, EventLogObserver, GreedyCommander, ObserverRegistry, SimConfig, SimMetrics,
    Snapshot,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

mod loader;
mod scheduler;

use scheduler::Scheduler;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Map width in provinces
    #[arg(long, default_value_t = 7)]
    width: u32,

    /// Map height in provinces
    #[arg(long, default_value_t = 7)]
    height: u32,

    /// Number of nations seated on the map (2-6)
    #[arg(long, default_value_t = 4)]
    nations: usize,

    /// Reserve the first seat for a human player (no orders are issued in
    /// a headless run; this is the UI integration seat)
    #[arg(long, default_value_t = false)]
    human: bool,

    /// Maximum number of ticks to run
    #[arg(short, long, default_value_t = 2000)]
    ticks: u64,

    /// Wait between ticks, in milliseconds (0 = run flat out)
    #[arg(long, default_value_t = 0)]
    interval_ms: u64,

    /// AI random seed; identical seeds replay identically
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Log a state checksum every N ticks (0 = disabled)
    #[arg(long, default_value_t = 0)]
    checksum_every: u32,

    /// Write a JSONL event log to this path
    #[arg(long)]
    event_log: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    log::info!(
        "starting hegemon: {}x{} map, {} nations, seed {}",
        args.width,
        args.height,
        args.nations,
        args.seed
    );

    let mut state = loader::build_scenario(
        args.width,
        args.height,
        args.nations,
        args.human,
        args.seed,
    )?;

    let mut registry = ObserverRegistry::new();
    if let Some(path) = &args.event_log {
        registry.register(Box::new(EventLogObserver::to_file(path)?));
    }

    let config = SimConfig {
        checksum_frequency: args.checksum_every,
        ai_seed: args.seed,
    };
    let mut commander = GreedyCommander::new(config.ai_seed);
    let scheduler = Scheduler::new(Duration::from_millis(args.interval_ms));
    let mut metrics = SimMetrics::default();

    let run_start = Instant::now();
    for _ in 0..args.ticks {
        let step_start = Instant::now();
        state = step_world(&state, &[], &mut commander);
        metrics.step_time += step_start.elapsed();
        metrics.total_ticks += 1;

        let checksum = if config.checksum_frequency > 0
            && state.tick % config.checksum_frequency as u64 == 0
        {
            let checksum = state.checksum();
            log::info!("tick {} checksum {:016x}", state.tick, checksum);
            checksum
        } else {
            0
        };

        if !registry.is_empty() {
            let observe_start = Instant::now();
            registry.notify(&Snapshot::new(state.clone(), checksum));
            metrics.observer_time += observe_start.elapsed();
        }

        if state.game_over {
            break;
        }

        scheduler.wait();
    }
    metrics.wall_time = run_start.elapsed();

    report(&state, &metrics);
    Ok(())
}

/// Final standings on stdout; everything else goes through the logger.
fn report(state: &hegemon_core::WorldState, metrics: &SimMetrics) {
    match &state.winner {
        Some(winner) => println!("winner={winner} tick={}", state.tick),
        None => println!("winner=none tick={}", state.tick),
    }

    let counts = state.owned_province_counts();
    for tag in state.sorted_tags() {
        let nation = &state.nations[&tag];
        println!(
            "nation={tag} provinces={} treasury={} armies={}",
            counts.get(&tag).copied().unwrap_or(0),
            nation.treasury,
            state.armies.values().filter(|a| a.owner == tag).count()
        );
    }
    println!("checksum={:016x}", state.checksum());

    log::info!(
        "{} ticks in {:.1?} ({:.2} ms/tick, {:.0} ticks/s)",
        metrics.total_ticks,
        metrics.wall_time,
        metrics.tick_avg_ms(),
        metrics.ticks_per_second()
    );
}
