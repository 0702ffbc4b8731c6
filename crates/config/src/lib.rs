//! Configuration models and loaders for the Asteroid Impact Simulator.

use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use impact_physics::{AsteroidParameters, ImpactError};
use serde::Deserialize;
use thiserror::Error;

/// Default location of the simulator settings file.
pub const DEFAULT_CONFIG_PATH: &str = "configs/simulator.toml";
/// Default location of the impactor preset catalog.
pub const DEFAULT_PRESETS_PATH: &str = "data/presets/asteroids.yaml";

/// Top-level simulator settings. Every section may be omitted.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SimulatorConfig {
    pub catalog: CatalogConfig,
    pub defaults: ResolutionDefaults,
    pub report: ReportConfig,
    pub geocoder: GeocoderConfig,
}

/// Near-earth-object catalog endpoint and credentials.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    pub endpoint: String,
    pub api_key_env: String,
    pub fallback_api_key: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.nasa.gov/neo/rest/v1/neo".to_string(),
            api_key_env: "NASA_API_KEY".to_string(),
            fallback_api_key: "DEMO_KEY".to_string(),
        }
    }
}

impl CatalogConfig {
    /// API key from the configured environment variable, else the fallback.
    pub fn api_key(&self) -> String {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| self.fallback_api_key.clone())
    }
}

/// Values substituted when catalog data does not carry them.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ResolutionDefaults {
    pub density_kg_m3: f64,
    pub entry_angle_deg: f64,
}

impl Default for ResolutionDefaults {
    fn default() -> Self {
        Self {
            density_kg_m3: 2_000.0,
            entry_angle_deg: 45.0,
        }
    }
}

/// Language-model settings for narrative reports.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key_env: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

impl ReportConfig {
    /// API key, or `None` when unset or left at the template placeholder.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty() && key != "YOUR_GEMINI_API_KEY")
    }
}

/// Reverse-geocoding service settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GeocoderConfig {
    pub endpoint: String,
    pub user_agent: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org/reverse".to_string(),
            user_agent: "asteroid-simulator".to_string(),
        }
    }
}

/// Named impactor from the preset catalog.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PresetConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub radius_m: f64,
    pub density_kg_m3: f64,
    pub speed_m_s: f64,
    pub entry_angle_deg: f64,
}

impl PresetConfig {
    /// Validated calculator input for this preset.
    pub fn parameters(&self) -> Result<AsteroidParameters, ImpactError> {
        AsteroidParameters::new(
            self.radius_m,
            self.density_kg_m3,
            self.speed_m_s,
            self.entry_angle_deg,
        )
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("preset '{0}' is defined more than once")]
    DuplicatePreset(String),
}

/// Load simulator settings from a TOML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SimulatorConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Load settings from `path` if it exists, otherwise fall back to defaults.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<SimulatorConfig, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        Ok(SimulatorConfig::default())
    }
}

/// Load impactor presets from a YAML list or a directory of TOML files.
pub fn load_presets<P: AsRef<Path>>(path: P) -> Result<Vec<PresetConfig>, ConfigError> {
    let presets: Vec<PresetConfig> = load_records(path)?;
    let mut seen = BTreeSet::new();
    for preset in &presets {
        if !seen.insert(preset.name.to_uppercase()) {
            return Err(ConfigError::DuplicatePreset(preset.name.clone()));
        }
    }
    Ok(presets)
}

/// Case-insensitive preset lookup.
pub fn find_preset<'a>(presets: &'a [PresetConfig], name: &str) -> Option<&'a PresetConfig> {
    let upper = name.to_uppercase();
    presets.iter().find(|p| p.name.to_uppercase() == upper)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
