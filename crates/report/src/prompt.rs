//! Prompt text for narrative reports.

use impact_core::units;
use impact_physics::ImpactResult;

/// Report text used when no language model is configured.
pub const PLACEHOLDER_REPORT: &str = "### Placeholder Report

**No language-model API key is configured.**

Set the report API key in the environment to generate a real, location-specific report.

This placeholder shows where the generated analysis would appear. The real report provides a country-specific response protocol based on the impact data and location.";

/// Build the response-protocol prompt for an impact in `country`.
pub fn build_prompt(result: &ImpactResult, country: &str) -> String {
    let megatons = result.energy_equivalent_mt_tnt();
    let crater_km = units::m_to_km(result.crater_diameter_meters);
    let shockwave_km = units::m_to_km(result.shockwave_radius_meters);
    format!(
        "Analyze the following asteroid impact scenario and provide a detailed, country-specific government response protocol.

Scenario Details:
- Impact Location: {country}
- Impact Energy: {megatons:.2} Megatons of TNT equivalent
- Estimated Crater Diameter: {crater_km:.2} km
- Estimated Shockwave Radius (for severe damage): {shockwave_km:.2} km

Based on these details and the specific political, geographical, and economic context of {country}, provide a response protocol that covers only the following:
- **Immediate Threat Assessment:** Briefly explain what the impact energy and damage radii mean in understandable terms.
- **Immediate Pre-Impact Actions:** Evacuation strategies, public warnings, mobilization of resources. Be specific to {country}'s capabilities and infrastructure.
Keep the response concise; prioritize speed over detail."
    )
}
