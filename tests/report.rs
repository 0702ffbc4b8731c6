use asteroid_impact_simulator::config::SimulatorConfig;
use asteroid_impact_simulator::physics::{AsteroidParameters, compute};
use asteroid_impact_simulator::report::geocode::country_from_response;
use asteroid_impact_simulator::report::model::text_from_response;
use asteroid_impact_simulator::report::{
    CountryLocator, ImpactCoords, ReportError, ReportGenerator, UNKNOWN_LOCATION, build_prompt,
};

struct Ocean;

impl CountryLocator for Ocean {
    fn country_at(&self, _lat: f64, _lng: f64) -> String {
        UNKNOWN_LOCATION.to_string()
    }
}

#[test]
fn nominatim_country_is_extracted() {
    let body = r#"{"place_id": 1, "display_name": "Paris, France", "address": {"city": "Paris", "country": "France", "country_code": "fr"}}"#;
    assert_eq!(
        country_from_response(body).unwrap(),
        Some("France".to_string())
    );
}

#[test]
fn nominatim_ocean_has_no_country() {
    assert_eq!(
        country_from_response(r#"{"error": "Unable to geocode"}"#).unwrap(),
        None
    );
    assert_eq!(
        country_from_response(r#"{"address": {"country": "  "}}"#).unwrap(),
        None
    );
}

#[test]
fn model_text_joins_first_candidate_parts() {
    let body = r#"{"candidates": [{"content": {"parts": [{"text": "Part one. "}, {"text": "Part two."}], "role": "model"}}, {"content": {"parts": [{"text": "ignored"}]}}]}"#;
    assert_eq!(text_from_response(body).unwrap(), "Part one. Part two.");
}

#[test]
fn empty_model_response_is_an_error() {
    assert!(matches!(
        text_from_response(r#"{"candidates": []}"#),
        Err(ReportError::EmptyResponse)
    ));
    assert!(matches!(
        text_from_response("not json"),
        Err(ReportError::Parse(_))
    ));
}

#[test]
fn prompt_scales_large_impacts_to_megatons() {
    let params = AsteroidParameters::new(500.0, 3_000.0, 25_000.0, 90.0).unwrap();
    let result = compute(&params).unwrap();
    let prompt = build_prompt(&result, "Chile");
    let expected = format!("{:.2} Megatons", result.impact_energy_joules / 4.184e15);
    assert!(prompt.contains(&expected), "prompt: {prompt}");
    assert!(prompt.contains("context of Chile"));
    assert!(prompt.contains("Immediate Threat Assessment"));
    assert!(prompt.contains("Immediate Pre-Impact Actions"));
}

#[test]
fn placeholder_report_keeps_location() {
    let generator = ReportGenerator::new(Box::new(Ocean), None);
    assert!(!generator.has_model());
    let result = compute(&AsteroidParameters::new(10.0, 2_000.0, 20_000.0, 45.0).unwrap()).unwrap();
    let report = generator
        .generate(&result, ImpactCoords { lat: 0.0, lng: -140.0 })
        .unwrap();
    assert!(report.placeholder);
    assert_eq!(report.country, UNKNOWN_LOCATION);
}

#[test]
fn template_key_configures_no_model() {
    let mut config = SimulatorConfig::default();
    config.report.api_key_env = "IMPACT_TEST_REPORT_GENERATOR_KEY".to_string();
    unsafe { std::env::set_var("IMPACT_TEST_REPORT_GENERATOR_KEY", "YOUR_GEMINI_API_KEY") };
    let generator = ReportGenerator::from_config(&config).unwrap();
    assert!(!generator.has_model());

    config.report.api_key_env = "IMPACT_TEST_REPORT_GENERATOR_REAL".to_string();
    unsafe { std::env::set_var("IMPACT_TEST_REPORT_GENERATOR_REAL", "real-key") };
    let generator = ReportGenerator::from_config(&config).unwrap();
    assert!(generator.has_model());
}
