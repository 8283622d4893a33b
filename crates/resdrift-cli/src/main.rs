// crates/resdrift-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use anyhow::Result;
use clap::Parser;
use resdrift_sim::{generate_trace_set, SimConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "resdrift",
    about = "Synthetic NVM trace generator with a resistance-drift error model",
    long_about = "Generates aligned clean/drifted/label trace files for training and \
evaluating drift-detection models.\n\nThe workload parameters are fixed by design; \
only run plumbing (output directory, RNG seed) is exposed here.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    /// Output directory for the trace files (created if absent).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Seed the run's RNG for bit-exact reproducibility.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut cfg = SimConfig::default();
    if let Some(dir) = cli.out_dir {
        cfg.output_dir = dir;
    }
    if cli.seed.is_some() {
        cfg.seed = cli.seed;
    }

    info!(
        sets = cfg.num_trace_sets,
        rows = cfg.rows_per_trace,
        out = %cfg.output_dir.display(),
        "generating trace sets"
    );

    for i in 0..cfg.num_trace_sets {
        info!(set = i + 1, of = cfg.num_trace_sets, "generating trace file set");
        let paths = generate_trace_set(&cfg, i)?;
        println!(
            "Set {i}: {} / {} / {}",
            paths.clean.display(),
            paths.drifted.display(),
            paths.labels.display()
        );
    }

    println!(
        "Done: {} set(s), {} cycles each",
        cfg.num_trace_sets, cfg.rows_per_trace
    );
    Ok(())
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_level(true).compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
