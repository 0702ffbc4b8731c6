//! JSON request and response bodies.

use impact_physics::{AsteroidParameters, ImpactResult};
use impact_report::ImpactCoords;
use serde::{Deserialize, Serialize};

/// Body of a `simulate` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub radius: f64,
    pub density: f64,
    pub speed: f64,
    pub angle: f64,
}

impl SimulationRequest {
    /// Calculator input; validated when computed.
    pub fn to_parameters(&self) -> AsteroidParameters {
        AsteroidParameters {
            radius_m: self.radius,
            density_kg_m3: self.density,
            speed_m_s: self.speed,
            entry_angle_deg: self.angle,
        }
    }
}

impl From<&AsteroidParameters> for SimulationRequest {
    fn from(params: &AsteroidParameters) -> Self {
        Self {
            name: None,
            radius: params.radius_m,
            density: params.density_kg_m3,
            speed: params.speed_m_s,
            angle: params.entry_angle_deg,
        }
    }
}

/// Body of a `simulate` response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    pub mass_kg: f64,
    pub kinetic_energy_joules: f64,
    pub impact_energy_joules: f64,
    pub crater_diameter_meters: f64,
    pub shockwave_radius_meters: f64,
    pub energy_equivalent_kt_tnt: f64,
}

impl From<ImpactResult> for SimulationResponse {
    fn from(result: ImpactResult) -> Self {
        Self {
            mass_kg: result.mass_kg,
            kinetic_energy_joules: result.kinetic_energy_joules,
            impact_energy_joules: result.impact_energy_joules,
            crater_diameter_meters: result.crater_diameter_meters,
            shockwave_radius_meters: result.shockwave_radius_meters,
            energy_equivalent_kt_tnt: result.energy_equivalent_kt_tnt,
        }
    }
}

impl From<SimulationResponse> for ImpactResult {
    fn from(response: SimulationResponse) -> Self {
        Self {
            mass_kg: response.mass_kg,
            kinetic_energy_joules: response.kinetic_energy_joules,
            impact_energy_joules: response.impact_energy_joules,
            energy_equivalent_kt_tnt: response.energy_equivalent_kt_tnt,
            crater_diameter_meters: response.crater_diameter_meters,
            shockwave_radius_meters: response.shockwave_radius_meters,
        }
    }
}

/// Body of a `generate-report` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub simulation_result: SimulationResponse,
    pub impact_coords: ImpactCoords,
}

/// Body of a `generate-report` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub report: String,
}
