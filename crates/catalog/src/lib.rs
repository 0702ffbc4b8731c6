//! Near-earth-object catalog access.
//!
//! [`CatalogClient`] talks to the NeoWs REST service; [`resolve_at`] turns a
//! catalog record into calculator input, filling in what the catalog does
//! not measure from [`ResolutionDefaults`].

pub mod model;
pub mod resolve;

use impact_config::CatalogConfig;
use impact_physics::ImpactError;
use reqwest::blocking::Client;
use thiserror::Error;

pub use impact_config::ResolutionDefaults;
pub use model::{BrowsePage, CloseApproach, NeoRecord, PageInfo};
pub use resolve::{ResolvedAsteroid, resolve_at};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("malformed catalog response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("object {0} is not in the catalog")]
    UnknownObject(String),
    #[error("object {0} has no close-approach velocity")]
    MissingVelocity(String),
    #[error("object {id} reports unparsable velocity '{value}'")]
    InvalidVelocity { id: String, value: String },
    #[error("object {id} resolves to invalid parameters: {source}")]
    Impact {
        id: String,
        #[source]
        source: ImpactError,
    },
}

/// Blocking client for the NeoWs `browse` and `lookup` endpoints.
pub struct CatalogClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl CatalogClient {
    /// Build a client from settings, reading the API key from the environment.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Ok(Self::new(config.endpoint.clone(), config.api_key())?)
    }

    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Fetch one page of the catalog (pages start at 0).
    pub fn browse(&self, page: u32) -> Result<BrowsePage, CatalogError> {
        let url = format!("{}/browse", self.endpoint);
        log::debug!("fetching catalog page {page} from {url}");
        let page = page.to_string();
        let body = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("page", page.as_str())])
            .send()?
            .error_for_status()?
            .text()?;
        parse_browse(&body)
    }

    /// Fetch a single object by its catalog id.
    pub fn lookup(&self, id: &str) -> Result<NeoRecord, CatalogError> {
        let url = format!("{}/{}", self.endpoint, id);
        log::debug!("looking up catalog object {id}");
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::UnknownObject(id.to_string()));
        }
        let body = response.error_for_status()?.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Source of catalog records; implemented by [`CatalogClient`].
pub trait NeoSource {
    fn browse(&self, page: u32) -> Result<BrowsePage, CatalogError>;
    fn lookup(&self, id: &str) -> Result<NeoRecord, CatalogError>;
}

impl NeoSource for CatalogClient {
    fn browse(&self, page: u32) -> Result<BrowsePage, CatalogError> {
        CatalogClient::browse(self, page)
    }

    fn lookup(&self, id: &str) -> Result<NeoRecord, CatalogError> {
        CatalogClient::lookup(self, id)
    }
}

/// A `browse` response saved to disk, served for every page.
#[derive(Debug, Clone)]
pub struct SavedPage {
    page: BrowsePage,
}

impl SavedPage {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            page: parse_browse(json)?,
        })
    }
}

impl NeoSource for SavedPage {
    fn browse(&self, _page: u32) -> Result<BrowsePage, CatalogError> {
        Ok(self.page.clone())
    }

    fn lookup(&self, id: &str) -> Result<NeoRecord, CatalogError> {
        self.page
            .near_earth_objects
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownObject(id.to_string()))
    }
}

/// Parse a saved `browse` response.
pub fn parse_browse(json: &str) -> Result<BrowsePage, CatalogError> {
    Ok(serde_json::from_str(json)?)
}
