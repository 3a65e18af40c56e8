//! VillagerForge Demo — reroll cycles in the terminal
//!
//! Runs the full timed sequence against the console renderer and the
//! log-backed sound player. Point `--data` at a catalog JSON file or
//! let the built-in demo catalog stand in.
//!
//! Usage:
//!   vf-demo                          - one cycle on the demo catalog
//!   vf-demo --cycles 3 --seed 42     - three reproducible cycles
//!   vf-demo --timing turbo           - faster timing profile
//!   vf-demo --trace-json out.json    - dump cycle traces as JSON

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;

use vf_catalog::{Catalog, demo_catalog};
use vf_engine::{
    ConsoleRenderer, CycleReport, LogSoundPlayer, Randomizer, Renderer, SequenceController,
};
use vf_stage::SequenceTiming;

#[derive(Parser)]
#[command(name = "vf-demo", about = "Follower reroll sequence demo")]
struct Cli {
    /// Catalog JSON file (built-in demo catalog if omitted)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Number of reroll cycles to run
    #[arg(short, long, default_value_t = 1)]
    cycles: u32,

    /// Seed for reproducible draws (OS randomness if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Timing profile: normal, turbo or studio
    #[arg(short, long, default_value = "normal")]
    timing: String,

    /// Write the cycle traces to a JSON file
    #[arg(long)]
    trace_json: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let catalog = match &cli.data {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog from {}", path.display()))?,
        None => demo_catalog(),
    };
    log::info!(
        "catalog ready: {} forms across {} categories",
        catalog.form_count(),
        catalog.index().bucket_count()
    );

    let catalog = Arc::new(catalog);
    let randomizer = match cli.seed {
        Some(seed) => Randomizer::seeded(catalog.clone(), seed)?,
        None => Randomizer::new(catalog.clone())?,
    };

    let timing = parse_timing(&cli.timing)?;
    let renderer = Arc::new(ConsoleRenderer::new());
    let sounds = Arc::new(LogSoundPlayer);
    let controller =
        SequenceController::with_timing(randomizer, renderer.clone(), sounds, timing)?;

    renderer.start();
    let initial = controller.present_initial();
    println!("on stage: {}", initial.label(&catalog));

    let mut reports: Vec<CycleReport> = Vec::new();
    for _ in 0..cli.cycles {
        if let Some(report) = controller.reroll().await.into_report() {
            println!(
                "{}: rerolled into {} ({:.0}ms)",
                report.cycle_id,
                report.final_config.label(&catalog),
                report.trace.duration_ms()
            );
            reports.push(report);
        }
    }

    let stats = controller.stats();
    println!(
        "{} cycles, {} configurations applied, {} triggers ignored",
        stats.cycles_completed, stats.configs_applied, stats.triggers_ignored
    );
    for (category, count) in &stats.forms_by_category {
        println!("  category {category}: {count} draws");
    }

    if let Some(path) = &cli.trace_json {
        let traces: Vec<_> = reports.iter().map(|r| &r.trace).collect();
        let json = serde_json::to_string_pretty(&traces)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write traces to {}", path.display()))?;
        println!("wrote {} traces to {}", traces.len(), path.display());
    }

    Ok(())
}

fn parse_timing(name: &str) -> Result<SequenceTiming> {
    let timing = match name {
        "normal" => SequenceTiming::normal(),
        "turbo" => SequenceTiming::turbo(),
        "studio" => SequenceTiming::studio(),
        other => bail!("unknown timing profile '{other}' (expected normal, turbo or studio)"),
    };
    Ok(timing)
}
