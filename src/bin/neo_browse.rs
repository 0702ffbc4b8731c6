use std::path::PathBuf;

use anyhow::Context;
use asteroid_impact_simulator::catalog::{ResolvedAsteroid, SavedPage};
use asteroid_impact_simulator::config::{
    DEFAULT_CONFIG_PATH, SimulatorConfig, load_config_or_default,
};
use asteroid_impact_simulator::display::{self, format_distance, format_yield};
use asteroid_impact_simulator::export::{results, writer_for_path};
use asteroid_impact_simulator::physics::compute;
use asteroid_impact_simulator::service::SimulationService;
use chrono::{NaiveDate, Utc};
use clap::Parser;

/// List near-earth objects from the NeoWs catalog as impact candidates.
#[derive(Parser, Debug)]
#[command(author, version, about = "Near-earth-object catalog browser")]
struct Cli {
    /// Catalog page to fetch (0-based)
    #[arg(long, default_value_t = 0)]
    page: u32,

    /// Simulate a single catalog object instead of listing a page
    #[arg(long)]
    id: Option<String>,

    /// Read a saved `browse` response instead of calling the API
    #[arg(long)]
    input: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD) for choosing the close approach; defaults to today
    #[arg(long)]
    date: Option<String>,

    /// Run the impact calculator on every resolved object
    #[arg(long, default_value_t = false)]
    simulate: bool,

    /// Write simulated results as CSV (use '-' for stdout)
    #[arg(long, requires = "simulate", conflicts_with = "id")]
    output: Option<PathBuf>,

    /// Simulator settings
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    let date = match &cli.date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("invalid --date '{raw}' (expected YYYY-MM-DD)"))?,
        None => Utc::now().date_naive(),
    };
    let service = build_service(&cli, &config)?;

    if let Some(id) = &cli.id {
        let (asteroid, result) = service
            .simulate_catalog_entry_at(id, date)
            .with_context(|| format!("cannot simulate catalog object {id}"))?;
        println!(
            "{}",
            display::summary(&asteroid.name, &asteroid.params, &result)
        );
        return Ok(());
    }

    let page = service
        .browse_asteroids_at(cli.page, date)
        .with_context(|| format!("cannot browse catalog page {}", cli.page))?;
    println!(
        "=== Near-earth objects: page {} of {} ({} total) ===",
        page.info.number, page.info.total_pages, page.info.total_elements
    );

    let mut simulated = Vec::new();
    for asteroid in page.asteroids {
        print_candidate(&asteroid);
        if cli.simulate {
            let result = compute(&asteroid.params)?;
            println!(
                "{:>12} yield {}, crater {}, shockwave {}",
                "",
                format_yield(result.energy_equivalent_kt_tnt),
                format_distance(result.crater_diameter_meters),
                format_distance(result.shockwave_radius_meters)
            );
            simulated.push((asteroid, result));
        }
    }

    if let Some(path) = &cli.output {
        let records: Vec<results::Record<'_>> = simulated
            .iter()
            .map(|(asteroid, result)| results::Record {
                name: &asteroid.name,
                params: &asteroid.params,
                result,
            })
            .collect();
        let mut writer = writer_for_path(path)?;
        results::write_csv(writer.as_mut(), &records)?;
    }

    Ok(())
}

fn build_service(cli: &Cli, config: &SimulatorConfig) -> anyhow::Result<SimulationService> {
    if let Some(path) = &cli.input {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let saved = SavedPage::from_json(&body)?;
        return Ok(SimulationService::new(config.defaults).with_catalog(Box::new(saved)));
    }
    Ok(SimulationService::from_config(config)?)
}

fn print_candidate(asteroid: &ResolvedAsteroid) {
    let approach = asteroid
        .approach_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    println!(
        "{:<10} {:<28} r = {:>10}  v = {:>6.2} km/s  approach {}{}",
        asteroid.id,
        asteroid.name,
        format_distance(asteroid.params.radius_m),
        asteroid.params.speed_m_s / 1_000.0,
        approach,
        if asteroid.potentially_hazardous {
            "  [PHA]"
        } else {
            ""
        }
    );
}
