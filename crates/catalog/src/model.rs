//! Response model for the NeoWs REST service.
//!
//! Only the fields the simulator reads are modelled; unknown fields are
//! ignored so upstream additions do not break parsing.

use chrono::NaiveDate;
use serde::Deserialize;

/// One page of the `browse` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowsePage {
    #[serde(default)]
    pub links: PageLinks,
    #[serde(default)]
    pub page: PageInfo,
    pub near_earth_objects: Vec<NeoRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
}

/// A single near-earth object.
#[derive(Debug, Clone, Deserialize)]
pub struct NeoRecord {
    pub id: String,
    pub name: String,
    pub estimated_diameter: EstimatedDiameter,
    #[serde(default)]
    pub is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
}

/// Diameter estimates in several units; only metres are used.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimatedDiameter {
    pub meters: DiameterRange,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloseApproach {
    pub close_approach_date: String,
    pub relative_velocity: RelativeVelocity,
    #[serde(default)]
    pub orbiting_body: Option<String>,
}

/// Velocities are published as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct RelativeVelocity {
    pub kilometers_per_second: String,
}

impl CloseApproach {
    /// Calendar date of the approach, when it parses as `YYYY-MM-DD`.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.close_approach_date, "%Y-%m-%d").ok()
    }

    /// True when the approach is to Earth (entries without a body are assumed Earth).
    pub fn is_earth(&self) -> bool {
        self.orbiting_body
            .as_deref()
            .map(|body| body.eq_ignore_ascii_case("earth"))
            .unwrap_or(true)
    }
}

impl NeoRecord {
    /// First Earth approach dated on or after `date`, else the latest Earth approach.
    pub fn approach_for(&self, date: NaiveDate) -> Option<&CloseApproach> {
        let earth: Vec<&CloseApproach> = self
            .close_approach_data
            .iter()
            .filter(|approach| approach.is_earth())
            .collect();
        earth
            .iter()
            .filter(|approach| approach.date().is_some_and(|d| d >= date))
            .min_by_key(|approach| approach.date())
            .or_else(|| earth.iter().max_by_key(|approach| approach.date()))
            .copied()
    }
}
