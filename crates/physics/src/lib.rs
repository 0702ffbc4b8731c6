//! Impact-physics calculation engine.
//!
//! [`compute`] maps an impactor description to the derived effect metrics
//! (mass, entry and delivered energy, TNT yield, crater and shockwave size).
//! The function is pure: no I/O, no logging, no shared state, so it can be
//! called from any thread or service layer without coordination.

pub mod scaling;
pub mod sweep;

use impact_core::{geometry, units};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Physical description of the impactor at the moment it reaches Earth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidParameters {
    /// Effective spherical radius (m).
    pub radius_m: f64,
    /// Bulk density (kg/m³).
    pub density_kg_m3: f64,
    /// Speed relative to Earth at impact (m/s).
    pub speed_m_s: f64,
    /// Entry angle measured from the horizontal; 90 is a vertical impact.
    pub entry_angle_deg: f64,
}

/// Derived impact metrics, as produced by [`compute`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub mass_kg: f64,
    pub kinetic_energy_joules: f64,
    pub impact_energy_joules: f64,
    pub energy_equivalent_kt_tnt: f64,
    pub crater_diameter_meters: f64,
    pub shockwave_radius_meters: f64,
}

/// A labelled circle to draw around the impact point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRing {
    pub label: &'static str,
    pub radius_m: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImpactError {
    #[error("invalid parameter `{field}` = {value}: {reason}")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl AsteroidParameters {
    /// Build a validated parameter set.
    pub fn new(
        radius_m: f64,
        density_kg_m3: f64,
        speed_m_s: f64,
        entry_angle_deg: f64,
    ) -> Result<Self, ImpactError> {
        let params = Self {
            radius_m,
            density_kg_m3,
            speed_m_s,
            entry_angle_deg,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check every field against its documented domain.
    pub fn validate(&self) -> Result<(), ImpactError> {
        require_positive("radius_m", self.radius_m)?;
        require_positive("density_kg_m3", self.density_kg_m3)?;
        require_positive("speed_m_s", self.speed_m_s)?;
        require_positive("entry_angle_deg", self.entry_angle_deg)?;
        if self.entry_angle_deg > 90.0 {
            return Err(ImpactError::InvalidParameter {
                field: "entry_angle_deg",
                value: self.entry_angle_deg,
                reason: "must not exceed 90 degrees",
            });
        }
        Ok(())
    }
}

impl ImpactResult {
    /// Delivered energy in megatons of TNT.
    pub fn energy_equivalent_mt_tnt(&self) -> f64 {
        units::joules_to_mt_tnt(self.impact_energy_joules)
    }

    /// Crater rim radius (m).
    pub fn crater_radius_meters(&self) -> f64 {
        self.crater_diameter_meters * 0.5
    }

    /// Map overlay rings, innermost first.
    pub fn damage_rings(&self) -> Vec<DamageRing> {
        let mut rings = vec![
            DamageRing {
                label: "crater rim",
                radius_m: self.crater_radius_meters(),
            },
            DamageRing {
                label: "severe shockwave",
                radius_m: self.shockwave_radius_meters,
            },
        ];
        rings.sort_by(|a, b| a.radius_m.total_cmp(&b.radius_m));
        rings
    }

    fn fields(&self) -> [f64; 6] {
        [
            self.mass_kg,
            self.kinetic_energy_joules,
            self.impact_energy_joules,
            self.energy_equivalent_kt_tnt,
            self.crater_diameter_meters,
            self.shockwave_radius_meters,
        ]
    }
}

/// Compute the impact effects of a single impactor.
///
/// The impactor is a uniform sphere; ground coupling falls off with the
/// sine of the entry angle. Crater and shockwave sizes follow the scaling
/// laws documented in [`scaling`].
pub fn compute(params: &AsteroidParameters) -> Result<ImpactResult, ImpactError> {
    params.validate()?;

    let mass_kg = geometry::sphere_volume(params.radius_m) * params.density_kg_m3;
    let kinetic_energy_joules = 0.5 * mass_kg * params.speed_m_s * params.speed_m_s;
    let impact_energy_joules =
        kinetic_energy_joules * scaling::angle_coupling(params.entry_angle_deg);

    let result = ImpactResult {
        mass_kg,
        kinetic_energy_joules,
        impact_energy_joules,
        energy_equivalent_kt_tnt: units::joules_to_kt_tnt(impact_energy_joules),
        crater_diameter_meters: scaling::crater_diameter_m(
            impact_energy_joules,
            params.density_kg_m3,
        ),
        shockwave_radius_meters: scaling::shockwave_radius_m(impact_energy_joules),
    };

    // f64 overflow is the only way a validated input reaches a non-finite field.
    if result.fields().iter().any(|v| !v.is_finite()) {
        return Err(ImpactError::InvalidParameter {
            field: "parameters",
            value: kinetic_energy_joules,
            reason: "outside representable range",
        });
    }
    Ok(result)
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ImpactError> {
    if !value.is_finite() {
        return Err(ImpactError::InvalidParameter {
            field,
            value,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(ImpactError::InvalidParameter {
            field,
            value,
            reason: "must be positive",
        });
    }
    Ok(())
}
