//! Simulation service: payload validation, calculator invocation and
//! delegation to the catalog and report collaborators.
//!
//! The service is transport agnostic. Handlers accept and return the JSON
//! bodies of the `simulate`, `asteroids` and `generate-report` operations;
//! [`ServiceError::status_code`] gives the HTTP status a front end should
//! answer with.

pub mod wire;

use chrono::{NaiveDate, Utc};
use impact_catalog::{
    CatalogClient, CatalogError, NeoSource, PageInfo, ResolvedAsteroid, resolve_at,
};
use impact_config::{ResolutionDefaults, SimulatorConfig};
use impact_physics::{ImpactError, ImpactResult, compute};
use impact_report::{ReportError, ReportGenerator};
use thiserror::Error;

pub use wire::{ReportRequest, ReportResponse, SimulationRequest, SimulationResponse};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(#[from] ImpactError),
    #[error("malformed request body: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("catalog request failed: {0}")]
    Catalog(#[from] CatalogError),
    #[error("report generation failed: {0}")]
    Report(#[from] ReportError),
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl ServiceError {
    /// HTTP status code matching the failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Payload(_) => 422,
            Self::Report(ReportError::InvalidCoords { .. }) => 422,
            Self::Catalog(CatalogError::UnknownObject(_)) => 404,
            Self::Catalog(_) | Self::Report(_) => 502,
            Self::NotConfigured(_) => 503,
        }
    }
}

/// Catalog page after resolution, with the upstream paging metadata.
#[derive(Debug, Clone)]
pub struct ResolvedPage {
    pub info: PageInfo,
    pub asteroids: Vec<ResolvedAsteroid>,
}

type BoxedSource = Box<dyn NeoSource + Send + Sync>;

/// Entry point shared by every front end.
pub struct SimulationService {
    defaults: ResolutionDefaults,
    catalog: Option<BoxedSource>,
    reports: Option<ReportGenerator>,
}

impl SimulationService {
    /// A service with no collaborators; only `simulate` is available.
    pub fn new(defaults: ResolutionDefaults) -> Self {
        Self {
            defaults,
            catalog: None,
            reports: None,
        }
    }

    /// Wire the NeoWs client and the report generator from settings.
    pub fn from_config(config: &SimulatorConfig) -> Result<Self, ServiceError> {
        let catalog = CatalogClient::from_config(&config.catalog)?;
        let reports = ReportGenerator::from_config(config)?;
        Ok(Self::new(config.defaults)
            .with_catalog(Box::new(catalog))
            .with_reports(reports))
    }

    pub fn with_catalog(mut self, catalog: BoxedSource) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_reports(mut self, reports: ReportGenerator) -> Self {
        self.reports = Some(reports);
        self
    }

    /// Validate a request and run the calculator.
    pub fn simulate(&self, request: &SimulationRequest) -> Result<ImpactResult, ServiceError> {
        let params = request.to_parameters();
        match compute(&params) {
            Ok(result) => {
                log::info!(
                    "simulated {}: {:.3} kt TNT, crater {:.1} m, shockwave {:.1} m",
                    request.name.as_deref().unwrap_or("custom impactor"),
                    result.energy_equivalent_kt_tnt,
                    result.crater_diameter_meters,
                    result.shockwave_radius_meters
                );
                Ok(result)
            }
            Err(err) => {
                log::warn!("rejected simulation request: {err}");
                Err(err.into())
            }
        }
    }

    /// JSON in, JSON out variant of [`SimulationService::simulate`].
    pub fn simulate_json(&self, body: &str) -> Result<String, ServiceError> {
        let request: SimulationRequest = serde_json::from_str(body)?;
        let result = self.simulate(&request)?;
        Ok(serde_json::to_string(&SimulationResponse::from(result))?)
    }

    /// One catalog page resolved to calculator input, choosing each
    /// object's next approach from today.
    pub fn browse_asteroids(&self, page: u32) -> Result<Vec<ResolvedAsteroid>, ServiceError> {
        Ok(self
            .browse_asteroids_at(page, Utc::now().date_naive())?
            .asteroids)
    }

    /// Records that cannot be resolved are skipped with a warning.
    pub fn browse_asteroids_at(
        &self,
        page: u32,
        date: NaiveDate,
    ) -> Result<ResolvedPage, ServiceError> {
        let page = self.catalog()?.browse(page)?;
        let asteroids = page
            .near_earth_objects
            .iter()
            .filter_map(|record| match resolve_at(record, &self.defaults, date) {
                Ok(asteroid) => Some(asteroid),
                Err(err) => {
                    log::warn!("skipping {} ({}): {err}", record.name, record.id);
                    None
                }
            })
            .collect();
        Ok(ResolvedPage {
            info: page.page,
            asteroids,
        })
    }

    /// Look up one catalog object, resolve it and run the calculator.
    pub fn simulate_catalog_entry(
        &self,
        id: &str,
    ) -> Result<(ResolvedAsteroid, ImpactResult), ServiceError> {
        self.simulate_catalog_entry_at(id, Utc::now().date_naive())
    }

    pub fn simulate_catalog_entry_at(
        &self,
        id: &str,
        date: NaiveDate,
    ) -> Result<(ResolvedAsteroid, ImpactResult), ServiceError> {
        let record = self.catalog()?.lookup(id)?;
        let asteroid = resolve_at(&record, &self.defaults, date)?;
        let result = compute(&asteroid.params)?;
        log::info!(
            "simulated catalog object {} ({}): {:.3} kt TNT",
            asteroid.name,
            asteroid.id,
            result.energy_equivalent_kt_tnt
        );
        Ok((asteroid, result))
    }

    /// Produce a narrative report for a previously computed result.
    pub fn generate_report(&self, request: &ReportRequest) -> Result<ReportResponse, ServiceError> {
        let reports = self
            .reports
            .as_ref()
            .ok_or(ServiceError::NotConfigured("report generator"))?;
        let result = ImpactResult::from(request.simulation_result);
        let report = reports.generate(&result, request.impact_coords)?;
        log::info!("generated report for impact in {}", report.country);
        Ok(ReportResponse {
            report: report.text,
        })
    }

    /// JSON in, JSON out variant of [`SimulationService::generate_report`].
    pub fn generate_report_json(&self, body: &str) -> Result<String, ServiceError> {
        let request: ReportRequest = serde_json::from_str(body)?;
        let response = self.generate_report(&request)?;
        Ok(serde_json::to_string(&response)?)
    }

    fn catalog(&self) -> Result<&BoxedSource, ServiceError> {
        self.catalog
            .as_ref()
            .ok_or(ServiceError::NotConfigured("asteroid catalog"))
    }
}
