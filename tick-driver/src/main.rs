//! Command-line driver for the live k-means engine
//! Builds a random population, initializes the clusters once and runs one
//! reassignment pass per tick until the assignment stops changing or the tick
//! budget runs out, then writes a JSON and SVG snapshot of the final clusters

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use kmeans_live::{Engine, EngineContext, MemberScan};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use config::DriverConfig;
use snapshot::RunSnapshot;

mod config;
mod population;
mod snapshot;

/// Command-line arguments, each one overrides the matching config field
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a RON config file (optional)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Number of points (default: 200)
    #[arg(long)]
    pub population: Option<usize>,
    /// Number of clusters (default: 4)
    #[arg(long)]
    pub k: Option<usize>,
    /// Points are drawn uniformly in [0, extent)² (default: 10.0)
    #[arg(long)]
    pub extent: Option<f64>,
    /// Maximum number of ticks (default: 300)
    #[arg(long)]
    pub max_ticks: Option<usize>,
    /// Random seed for points, seeds and colors (default: 0)
    #[arg(long)]
    pub seed: Option<u64>,
    /// Walk cluster members on the live list instead of a snapshot
    #[arg(long)]
    pub live_cursor: bool,
    /// Output directory for the snapshot (default: out)
    #[arg(long)]
    pub outdir: Option<String>,
    /// Log level: error, warn, info, debug or trace (default: info)
    #[arg(long, default_value = "info")]
    pub log_level: Level,
}

impl Args {
    fn apply(&self, mut config: DriverConfig) -> DriverConfig {
        if let Some(population) = self.population {
            config.population = population;
        }
        if let Some(k) = self.k {
            config.k = k;
        }
        if let Some(extent) = self.extent {
            config.extent = extent;
        }
        if let Some(max_ticks) = self.max_ticks {
            config.max_ticks = max_ticks;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.live_cursor {
            config.member_scan = MemberScan::LiveCursor;
        }
        if let Some(outdir) = &self.outdir {
            config.out_dir = outdir.clone();
        }
        config
    }
}

/// Step the engine until a tick leaves the assignment unchanged
///
/// Returns the number of ticks run and whether the run settled.
fn run(engine: &mut Engine, max_ticks: usize) -> kmeans_live::Result<(usize, bool)> {
    let mut previous = engine.assignment();
    for tick in 1..=max_ticks {
        engine.step()?;
        let current = engine.assignment();
        if current == previous {
            return Ok((tick, true));
        }
        previous = current;
    }
    Ok((max_ticks, false))
}

/// Install the global fmt subscriber, fails if one is already installed
fn init_logging(level: Level) -> Result<(), String> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("failed to install log subscriber: {}", e))
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_level) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let config = match &args.config {
        Some(path) => match DriverConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => DriverConfig::default(),
    };
    let config = args.apply(config);
    info!(?config, "starting run");

    let points = match population::uniform(config.population, config.extent, config.seed) {
        Ok(points) => points,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let context = EngineContext::new(config.seed).with_member_scan(config.member_scan);
    let mut engine = Engine::with_context(points, context);

    if let Err(e) = engine.initialize(config.k) {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    let (ticks, settled) = match run(&mut engine, config.max_ticks) {
        Ok(result) => result,
        Err(e) => {
            error!(fatal = e.is_fatal(), "{}", e);
            return ExitCode::FAILURE;
        }
    };
    if settled {
        info!(ticks, "assignment settled");
    } else {
        info!(ticks, "tick budget exhausted before settling");
    }
    for cluster in engine.clusters() {
        info!(
            id = cluster.id,
            size = cluster.len(),
            centroid = ?cluster.centroid(),
            "cluster"
        );
    }

    let out_dir = Path::new(&config.out_dir);
    if !out_dir.exists() {
        if let Err(e) = fs::create_dir_all(out_dir) {
            error!("failed to create output directory {}: {}", out_dir.display(), e);
            return ExitCode::FAILURE;
        }
        info!("Output directory created: {}", out_dir.display());
    }

    let snapshot = RunSnapshot::capture(&engine, ticks, settled);
    let written = snapshot
        .write_json(&out_dir.join("clusters.json"))
        .and_then(|_| snapshot.write_svg(&out_dir.join("clusters.svg"), config.extent));
    if let Err(e) = written {
        error!("{}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
