//! Narrative reports for a computed impact.
//!
//! The generator looks up the country under the impact point, builds a
//! prompt from the impact metrics and asks a language model for a response
//! protocol. Without a configured model it returns [`PLACEHOLDER_REPORT`].

pub mod geocode;
pub mod model;
pub mod prompt;

use impact_config::SimulatorConfig;
use impact_physics::ImpactResult;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use geocode::{CountryLocator, NominatimLocator, UNKNOWN_LOCATION};
pub use model::{GeminiModel, NarrativeModel};
pub use prompt::{PLACEHOLDER_REPORT, build_prompt};

/// Impact point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactCoords {
    pub lat: f64,
    pub lng: f64,
}

/// Finished report text plus the location it was written for.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub country: String,
    pub text: String,
    pub placeholder: bool,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("malformed model response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model returned no text")]
    EmptyResponse,
    #[error("coordinates out of range: lat {lat}, lng {lng}")]
    InvalidCoords { lat: f64, lng: f64 },
}

type BoxedLocator = Box<dyn CountryLocator + Send + Sync>;
type BoxedModel = Box<dyn NarrativeModel + Send + Sync>;

/// Composes a country locator with an optional narrative model.
pub struct ReportGenerator {
    locator: BoxedLocator,
    model: Option<BoxedModel>,
}

impl ReportGenerator {
    pub fn new(locator: BoxedLocator, model: Option<BoxedModel>) -> Self {
        Self { locator, model }
    }

    /// Nominatim for geocoding; Gemini when its API key is set.
    pub fn from_config(config: &SimulatorConfig) -> Result<Self, ReportError> {
        let locator = NominatimLocator::new(
            config.geocoder.endpoint.clone(),
            config.geocoder.user_agent.clone(),
        )?;
        let model: Option<BoxedModel> = match config.report.api_key() {
            Some(key) => Some(Box::new(GeminiModel::new(
                config.report.endpoint.clone(),
                config.report.model.clone(),
                key,
            )?)),
            None => {
                log::warn!(
                    "{} is not set; reports will use the placeholder text",
                    config.report.api_key_env
                );
                None
            }
        };
        Ok(Self::new(Box::new(locator), model))
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Produce a report for `result` at `coords`.
    pub fn generate(
        &self,
        result: &ImpactResult,
        coords: ImpactCoords,
    ) -> Result<Report, ReportError> {
        if !(-90.0..=90.0).contains(&coords.lat) || !(-180.0..=180.0).contains(&coords.lng) {
            return Err(ReportError::InvalidCoords {
                lat: coords.lat,
                lng: coords.lng,
            });
        }
        let country = self.locator.country_at(coords.lat, coords.lng);
        let Some(model) = &self.model else {
            return Ok(Report {
                country,
                text: PLACEHOLDER_REPORT.to_string(),
                placeholder: true,
            });
        };
        let prompt = build_prompt(result, &country);
        let text = model.generate(&prompt)?;
        Ok(Report {
            country,
            text,
            placeholder: false,
        })
    }
}
