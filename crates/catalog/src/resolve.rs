//! Mapping from catalog records to calculator input.
//!
//! The catalog measures size and approach velocity only. Radius comes from
//! the upper diameter estimate, speed from the chosen close approach, and
//! density and entry angle from [`ResolutionDefaults`].

use chrono::NaiveDate;
use impact_config::ResolutionDefaults;
use impact_core::units;
use impact_physics::AsteroidParameters;

use crate::CatalogError;
use crate::model::NeoRecord;

/// Catalog object paired with the parameters it resolves to.
#[derive(Debug, Clone)]
pub struct ResolvedAsteroid {
    pub id: String,
    pub name: String,
    pub potentially_hazardous: bool,
    pub approach_date: Option<NaiveDate>,
    pub params: AsteroidParameters,
}

/// Resolve using the first Earth approach on or after `date`.
pub fn resolve_at(
    record: &NeoRecord,
    defaults: &ResolutionDefaults,
    date: NaiveDate,
) -> Result<ResolvedAsteroid, CatalogError> {
    let approach = record
        .approach_for(date)
        .ok_or_else(|| CatalogError::MissingVelocity(record.id.clone()))?;
    let raw_velocity = approach.relative_velocity.kilometers_per_second.trim();
    let speed_km_s: f64 = raw_velocity
        .parse()
        .map_err(|_| CatalogError::InvalidVelocity {
            id: record.id.clone(),
            value: raw_velocity.to_string(),
        })?;

    let radius_m = record.estimated_diameter.meters.estimated_diameter_max / 2.0;
    let params = AsteroidParameters::new(
        radius_m,
        defaults.density_kg_m3,
        units::kms_to_ms(speed_km_s),
        defaults.entry_angle_deg,
    )
    .map_err(|source| CatalogError::Impact {
        id: record.id.clone(),
        source,
    })?;

    Ok(ResolvedAsteroid {
        id: record.id.clone(),
        name: record.name.clone(),
        potentially_hazardous: record.is_potentially_hazardous_asteroid,
        approach_date: approach.date(),
        params,
    })
}
