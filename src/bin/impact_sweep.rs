use std::path::PathBuf;

use anyhow::Context;
use asteroid_impact_simulator::config::{
    DEFAULT_PRESETS_PATH, find_preset, load_presets,
};
use asteroid_impact_simulator::export::{sweep as sweep_csv, writer_for_path};
use asteroid_impact_simulator::physics::AsteroidParameters;
use asteroid_impact_simulator::physics::sweep::{SweepAxis, sweep};
use clap::Parser;

/// Sweep one impactor parameter and export the effects as CSV (chart data).
#[derive(Parser, Debug)]
#[command(author, version, about = "Impact parameter sweep (CSV)")]
struct Cli {
    /// Parameter to vary: radius, density, speed or angle
    #[arg(long)]
    axis: SweepAxis,

    /// First value of the swept parameter
    #[arg(long)]
    start: f64,

    /// Last value of the swept parameter
    #[arg(long)]
    end: f64,

    /// Number of samples (at least 2)
    #[arg(long, default_value_t = 50)]
    steps: usize,

    /// Base impactor from the preset catalog
    #[arg(long, default_value = "Reference")]
    preset: String,

    /// Preset catalog (YAML file or directory of TOML files)
    #[arg(long, default_value = DEFAULT_PRESETS_PATH)]
    presets: PathBuf,

    /// Output CSV file (use '-' for stdout)
    #[arg(long, default_value = "artifacts/sweep.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let base = base_parameters(&cli)?;
    let points = sweep(&base, cli.axis, cli.start, cli.end, cli.steps)
        .with_context(|| format!("sweep over {} failed", cli.axis))?;

    let mut writer = writer_for_path(&cli.output)?;
    sweep_csv::write_csv(writer.as_mut(), cli.axis, &points)?;
    log::info!(
        "wrote {} samples of {} to {}",
        points.len(),
        cli.axis,
        cli.output.display()
    );
    Ok(())
}

fn base_parameters(cli: &Cli) -> anyhow::Result<AsteroidParameters> {
    let presets = load_presets(&cli.presets)
        .with_context(|| format!("failed to load presets from {}", cli.presets.display()))?;
    let preset = find_preset(&presets, &cli.preset)
        .ok_or_else(|| anyhow::anyhow!("Preset '{}' not found in catalog", cli.preset))?;
    Ok(preset.parameters()?)
}
