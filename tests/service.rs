use std::sync::{Arc, Mutex};

use asteroid_impact_simulator::catalog::{
    BrowsePage, CatalogError, NeoRecord, NeoSource, SavedPage, parse_browse,
};
use asteroid_impact_simulator::config::{ResolutionDefaults, SimulatorConfig};
use asteroid_impact_simulator::report::{
    CountryLocator, ImpactCoords, NarrativeModel, PLACEHOLDER_REPORT, ReportError,
    ReportGenerator,
};
use asteroid_impact_simulator::service::{
    ReportRequest, ServiceError, SimulationRequest, SimulationResponse, SimulationService,
};

const FIXTURE: &str = include_str!("fixtures/neo_browse.json");

struct FixtureCatalog;

impl NeoSource for FixtureCatalog {
    fn browse(&self, _page: u32) -> Result<BrowsePage, CatalogError> {
        parse_browse(FIXTURE)
    }

    fn lookup(&self, id: &str) -> Result<NeoRecord, CatalogError> {
        parse_browse(FIXTURE)?
            .near_earth_objects
            .into_iter()
            .find(|record| record.id == id)
            .ok_or_else(|| CatalogError::MissingVelocity(id.to_string()))
    }
}

struct FixedCountry(&'static str);

impl CountryLocator for FixedCountry {
    fn country_at(&self, _lat: f64, _lng: f64) -> String {
        self.0.to_string()
    }
}

#[derive(Clone, Default)]
struct RecordingModel {
    prompts: Arc<Mutex<Vec<String>>>,
}

impl NarrativeModel for RecordingModel {
    fn generate(&self, prompt: &str) -> Result<String, ReportError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("Evacuate the coast.".to_string())
    }
}

struct FailingModel;

impl NarrativeModel for FailingModel {
    fn generate(&self, _prompt: &str) -> Result<String, ReportError> {
        Err(ReportError::EmptyResponse)
    }
}

fn service() -> SimulationService {
    SimulationService::new(ResolutionDefaults::default())
}

#[test]
fn simulate_json_uses_wire_field_names() {
    let body = r#"{"name": "test rock", "radius": 10, "density": 2000, "speed": 20000, "angle": 45}"#;
    let out = service().simulate_json(body).expect("valid request");
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let object = value.as_object().unwrap();
    for key in [
        "mass_kg",
        "kinetic_energy_joules",
        "impact_energy_joules",
        "energy_equivalent_kt_tnt",
        "crater_diameter_meters",
        "shockwave_radius_meters",
    ] {
        assert!(object.contains_key(key), "missing {key}");
    }
    assert_eq!(object.len(), 6);
    assert!(object["energy_equivalent_kt_tnt"].as_f64().unwrap() > 100.0);
}

#[test]
fn name_is_optional() {
    let request: SimulationRequest =
        serde_json::from_str(r#"{"radius": 1.0, "density": 3000.0, "speed": 15000.0, "angle": 90.0}"#)
            .unwrap();
    assert!(request.name.is_none());
    assert!(service().simulate(&request).is_ok());
}

#[test]
fn invalid_payloads_map_to_validation_status() {
    let err = service()
        .simulate_json(r#"{"radius": 0, "density": 2000, "speed": 20000, "angle": 45}"#)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(err.status_code(), 422);

    let err = service().simulate_json(r#"{"radius": 10}"#).unwrap_err();
    assert!(matches!(err, ServiceError::Payload(_)));
    assert_eq!(err.status_code(), 422);
}

#[test]
fn collaborators_must_be_configured() {
    let err = service().browse_asteroids(0).unwrap_err();
    assert!(matches!(err, ServiceError::NotConfigured(_)));
    assert_eq!(err.status_code(), 503);
}

#[test]
fn browse_skips_unresolvable_records() {
    let service = service().with_catalog(Box::new(FixtureCatalog));
    let resolved = service.browse_asteroids(0).unwrap();
    let ids: Vec<&str> = resolved.iter().map(|a| a.id.as_str()).collect();
    assert!(ids.contains(&"2000433"));
    assert!(!ids.contains(&"9999999"));
    assert!(!ids.contains(&"8888888"));
}

#[test]
fn catalog_entry_is_resolved_then_simulated() {
    let service = service().with_catalog(Box::new(FixtureCatalog));
    let (asteroid, result) = service.simulate_catalog_entry("3542519").unwrap();
    assert_eq!(asteroid.params.radius_m, 127.0);
    assert!(result.crater_diameter_meters > 0.0);
    assert!(result.impact_energy_joules < result.kinetic_energy_joules);
}

#[test]
fn browse_at_date_keeps_paging_and_picks_approach() {
    let saved = SavedPage::from_json(FIXTURE).unwrap();
    let service = service().with_catalog(Box::new(saved));
    let date = chrono::NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let page = service.browse_asteroids_at(0, date).unwrap();
    assert_eq!(page.asteroids.len(), 2);
    let eros = page
        .asteroids
        .iter()
        .find(|a| a.id == "2000433")
        .expect("eros resolved");
    assert_eq!(eros.approach_date, chrono::NaiveDate::from_ymd_opt(2056, 1, 24));
}

#[test]
fn saved_page_lookup_reports_unknown_ids() {
    let saved = SavedPage::from_json(FIXTURE).unwrap();
    let service = service().with_catalog(Box::new(saved));
    let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    let (asteroid, _) = service.simulate_catalog_entry_at("3542519", date).unwrap();
    assert_eq!(asteroid.name, "(2010 PK9)");

    let err = service
        .simulate_catalog_entry_at("1234567", date)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Catalog(CatalogError::UnknownObject(ref id)) if id == "1234567"
    ));
    assert_eq!(err.status_code(), 404);
}

#[test]
fn configured_service_reaches_the_catalog_endpoint() {
    let mut config = SimulatorConfig::default();
    // Nothing listens on the discard port, so the request fails fast.
    config.catalog.endpoint = "http://127.0.0.1:9/neo".to_string();
    config.catalog.api_key_env = "IMPACT_TEST_UNSET_CATALOG_KEY".to_string();
    config.report.api_key_env = "IMPACT_TEST_UNSET_REPORT_KEY".to_string();

    let service = SimulationService::from_config(&config).expect("service from config");
    let err = service.simulate_catalog_entry("3542519").unwrap_err();
    assert!(matches!(err, ServiceError::Catalog(CatalogError::Network(_))));
    assert_eq!(err.status_code(), 502);

    let response = service
        .simulate_json(r#"{"radius": 10, "density": 2000, "speed": 20000, "angle": 45}"#)
        .unwrap();
    assert!(response.contains("crater_diameter_meters"));
}

fn report_request() -> ReportRequest {
    let result = service()
        .simulate(&SimulationRequest {
            name: None,
            radius: 10.0,
            density: 2_000.0,
            speed: 20_000.0,
            angle: 45.0,
        })
        .unwrap();
    ReportRequest {
        simulation_result: SimulationResponse::from(result),
        impact_coords: ImpactCoords {
            lat: 48.85,
            lng: 2.35,
        },
    }
}

#[test]
fn report_without_model_is_placeholder() {
    let service = service().with_reports(ReportGenerator::new(Box::new(FixedCountry("France")), None));
    let response = service.generate_report(&report_request()).unwrap();
    assert_eq!(response.report, PLACEHOLDER_REPORT);
}

#[test]
fn report_prompt_carries_location_and_metrics() {
    let model = RecordingModel::default();
    let prompts = model.prompts.clone();
    let service = service().with_reports(ReportGenerator::new(
        Box::new(FixedCountry("France")),
        Some(Box::new(model)),
    ));

    let body = serde_json::to_string(&report_request()).unwrap();
    let out = service.generate_report_json(&body).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["report"], "Evacuate the coast.");

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Impact Location: France"));
    assert!(prompts[0].contains("0.28 Megatons"));
    assert!(prompts[0].contains("Estimated Crater Diameter: 0.24 km"));
    assert!(prompts[0].contains("(for severe damage): 10.58 km"));
}

#[test]
fn report_request_uses_lat_lng_keys() {
    let body = serde_json::to_value(report_request()).unwrap();
    assert_eq!(body["impact_coords"]["lat"], 48.85);
    assert_eq!(body["impact_coords"]["lng"], 2.35);
    assert!(body["simulation_result"]["crater_diameter_meters"].is_number());
}

#[test]
fn model_failures_are_bad_gateway() {
    let service = service().with_reports(ReportGenerator::new(
        Box::new(FixedCountry("France")),
        Some(Box::new(FailingModel)),
    ));
    let err = service.generate_report(&report_request()).unwrap_err();
    assert!(matches!(err, ServiceError::Report(ReportError::EmptyResponse)));
    assert_eq!(err.status_code(), 502);
}

#[test]
fn out_of_range_coordinates_are_rejected() {
    let service = service().with_reports(ReportGenerator::new(Box::new(FixedCountry("France")), None));
    let mut request = report_request();
    request.impact_coords.lat = 123.0;
    let err = service.generate_report(&request).unwrap_err();
    assert_eq!(err.status_code(), 422);
}
