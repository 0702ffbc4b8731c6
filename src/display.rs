//! Human-readable formatting shared by the command-line tools.

use impact_physics::{AsteroidParameters, ImpactResult};

/// Distance with a unit suited to its magnitude.
pub fn format_distance(meters: f64) -> String {
    if meters >= 1_000.0 {
        format!("{:.2} km", meters / 1_000.0)
    } else {
        format!("{meters:.1} m")
    }
}

/// TNT yield in kt below one megaton, Mt above.
pub fn format_yield(kilotons: f64) -> String {
    if kilotons >= 1_000.0 {
        format!("{:.2} Mt TNT", kilotons / 1_000.0)
    } else {
        format!("{kilotons:.2} kt TNT")
    }
}

/// Multi-line summary of an impact.
pub fn summary(name: &str, params: &AsteroidParameters, result: &ImpactResult) -> String {
    let mut lines = vec![
        format!("=== Impact: {name} ==="),
        format!(
            "Impactor       : r = {}, ρ = {:.0} kg/m³, v = {:.2} km/s, angle = {:.1}°",
            format_distance(params.radius_m),
            params.density_kg_m3,
            params.speed_m_s / 1_000.0,
            params.entry_angle_deg
        ),
        format!("Mass           : {:.3e} kg", result.mass_kg),
        format!("Kinetic energy : {:.3e} J", result.kinetic_energy_joules),
        format!(
            "Impact energy  : {:.3e} J ({})",
            result.impact_energy_joules,
            format_yield(result.energy_equivalent_kt_tnt)
        ),
        format!(
            "Crater         : {} diameter",
            format_distance(result.crater_diameter_meters)
        ),
        format!(
            "Shockwave      : {} radius",
            format_distance(result.shockwave_radius_meters)
        ),
    ];
    for ring in result.damage_rings() {
        lines.push(format!(
            "  ring {:<16}: {}",
            ring.label,
            format_distance(ring.radius_m)
        ));
    }
    lines.join("\n")
}
