use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use asteroid_impact_simulator::config::{
    DEFAULT_CONFIG_PATH, DEFAULT_PRESETS_PATH, find_preset, load_config_or_default, load_presets,
};
use asteroid_impact_simulator::display;
use asteroid_impact_simulator::export::json;
use asteroid_impact_simulator::service::{
    SimulationRequest, SimulationResponse, SimulationService,
};
use clap::Parser;

/// Compute the effects of a single asteroid impact.
#[derive(Parser, Debug)]
#[command(author, version, about = "Asteroid impact calculator")]
struct Cli {
    /// Impactor radius in metres
    #[arg(long, requires_all = ["density", "speed"], conflicts_with_all = ["preset", "request"])]
    radius: Option<f64>,

    /// Bulk density in kg/m³
    #[arg(long)]
    density: Option<f64>,

    /// Impact speed in m/s
    #[arg(long)]
    speed: Option<f64>,

    /// Entry angle from the horizontal in degrees (defaults to the configured angle)
    #[arg(long)]
    angle: Option<f64>,

    /// Named impactor from the preset catalog (case-insensitive)
    #[arg(long, conflicts_with = "request")]
    preset: Option<String>,

    /// Preset catalog (YAML file or directory of TOML files)
    #[arg(long, default_value = DEFAULT_PRESETS_PATH)]
    presets: PathBuf,

    /// JSON simulation request file (`-` for stdin)
    #[arg(long)]
    request: Option<PathBuf>,

    /// Simulator settings
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Print the JSON response body instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Also write a JSON sidecar with parameters, result and damage rings
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    let service = SimulationService::new(config.defaults);

    let request = gather_request(&cli, config.defaults.entry_angle_deg)?;
    let name = request
        .name
        .clone()
        .unwrap_or_else(|| "custom impactor".to_string());
    let params = request.to_parameters();
    let result = service
        .simulate(&request)
        .with_context(|| format!("cannot simulate '{name}'"))?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&SimulationResponse::from(result))?
        );
    } else {
        println!("{}", display::summary(&name, &params, &result));
    }

    if let Some(path) = &cli.output {
        json::write_result(path, &name, &params, &result)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}

fn gather_request(cli: &Cli, default_angle: f64) -> anyhow::Result<SimulationRequest> {
    if let Some(path) = &cli.request {
        let body = read_request(path)?;
        return serde_json::from_str(&body).context("malformed simulation request");
    }

    if let Some(preset_name) = &cli.preset {
        let presets = load_presets(&cli.presets)
            .with_context(|| format!("failed to load presets from {}", cli.presets.display()))?;
        let preset = find_preset(&presets, preset_name)
            .ok_or_else(|| anyhow::anyhow!("Preset '{}' not found in catalog", preset_name))?;
        return Ok(SimulationRequest {
            name: Some(preset.name.clone()),
            radius: preset.radius_m,
            density: preset.density_kg_m3,
            speed: preset.speed_m_s,
            angle: cli.angle.unwrap_or(preset.entry_angle_deg),
        });
    }

    match (cli.radius, cli.density, cli.speed) {
        (Some(radius), Some(density), Some(speed)) => Ok(SimulationRequest {
            name: None,
            radius,
            density,
            speed,
            angle: cli.angle.unwrap_or(default_angle),
        }),
        _ => Err(anyhow::anyhow!(
            "Provide --radius/--density/--speed, --preset, or --request"
        )),
    }
}

fn read_request(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body)?;
        Ok(body)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}
