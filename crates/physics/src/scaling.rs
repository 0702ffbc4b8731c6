//! Empirical scaling laws relating delivered energy to crater and blast size.
//!
//! Crater diameter uses gravity-regime pi-scaling: the transient crater
//! volume scales with the gravity-scaled yield `E / (g·ρ)`, and the
//! diameter with that quantity raised to `1/3.4` (the exponent Schmidt and
//! Housen report for competent rock and dry soil targets). The coefficient
//! is calibrated so a 10 m, 2000 kg/m³, 20 km/s impactor at 45° leaves a
//! crater of roughly 240 m, in line with the simple-crater range cited for
//! ~0.3 Mt strikes.
//!
//! Shockwave radius uses Hopkinson–Cranz cube-root blast scaling: the
//! distance to a given overpressure grows with `E^(1/3)`. The reference
//! point places the severe-damage ring at 1 km for a 10¹² J release.
//!
//! The crater term depends on density and the blast term does not, so the
//! blast ring lies outside the crater rim only for realistic bodies. Below
//! roughly 1 kg/m³ a large fast impactor (10⁶ m, 10⁻⁶ kg/m³, 70 km/s) gives
//! a crater radius several times the shockwave radius.

use impact_core::constants::SURFACE_GRAVITY_M_S2;
use impact_core::units;

/// Crater coefficient (m) applied to `(E / (g·ρ))^(1/3.4)`.
pub const CRATER_COEFFICIENT_M: f64 = 0.16;
/// Crater scaling exponent.
pub const CRATER_EXPONENT: f64 = 1.0 / 3.4;
/// Shockwave radius at [`SHOCKWAVE_REFERENCE_ENERGY_J`] (m).
pub const SHOCKWAVE_REFERENCE_RADIUS_M: f64 = 1_000.0;
/// Energy at which the shockwave radius equals the reference radius (J).
pub const SHOCKWAVE_REFERENCE_ENERGY_J: f64 = 1.0e12;

/// Fraction of entry energy coupled into the ground.
///
/// Equals `sin(angle)`: 1.0 for a vertical impact, falling towards zero for
/// grazing entries. Always within [0, 1]; non-finite angles couple nothing.
pub fn angle_coupling(entry_angle_deg: f64) -> f64 {
    if !entry_angle_deg.is_finite() {
        return 0.0;
    }
    if entry_angle_deg >= 90.0 {
        return 1.0;
    }
    units::deg_to_rad(entry_angle_deg).sin().clamp(0.0, 1.0)
}

/// Final crater diameter (m) for the delivered energy and impactor density.
pub fn crater_diameter_m(impact_energy_j: f64, density_kg_m3: f64) -> f64 {
    let scaled_yield = impact_energy_j / (SURFACE_GRAVITY_M_S2 * density_kg_m3);
    CRATER_COEFFICIENT_M * scaled_yield.powf(CRATER_EXPONENT)
}

/// Radius (m) of severe blast overpressure.
pub fn shockwave_radius_m(impact_energy_j: f64) -> f64 {
    SHOCKWAVE_REFERENCE_RADIUS_M * (impact_energy_j / SHOCKWAVE_REFERENCE_ENERGY_J).cbrt()
}
