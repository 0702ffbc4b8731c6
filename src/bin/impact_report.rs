use std::path::PathBuf;

use anyhow::Context;
use asteroid_impact_simulator::config::{DEFAULT_CONFIG_PATH, load_config_or_default};
use asteroid_impact_simulator::report::{ImpactCoords, ReportGenerator};
use asteroid_impact_simulator::service::{ReportRequest, SimulationResponse, SimulationService};
use clap::Parser;

/// Generate a narrative response report for a simulated impact.
#[derive(Parser, Debug)]
#[command(author, version, about = "Impact narrative report")]
struct Cli {
    /// Simulation response JSON (as printed by `simulate --json`)
    #[arg(long)]
    result: PathBuf,

    /// Impact latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Impact longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lng: f64,

    /// Simulator settings
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    let body = std::fs::read_to_string(&cli.result)
        .with_context(|| format!("failed to read {}", cli.result.display()))?;
    let simulation_result: SimulationResponse =
        serde_json::from_str(&body).context("malformed simulation result")?;

    let service = SimulationService::new(config.defaults)
        .with_reports(ReportGenerator::from_config(&config)?);
    let response = service.generate_report(&ReportRequest {
        simulation_result,
        impact_coords: ImpactCoords {
            lat: cli.lat,
            lng: cli.lng,
        },
    })?;

    println!("{}", response.report.trim());
    Ok(())
}
