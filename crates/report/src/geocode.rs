//! Reverse geocoding of impact points.

use reqwest::blocking::Client;
use serde::Deserialize;

/// Returned when the point has no country (open ocean) or lookup fails.
pub const UNKNOWN_LOCATION: &str = "an unknown location (likely an ocean)";

/// Resolves a coordinate to a country name. Never fails; falls back to
/// [`UNKNOWN_LOCATION`].
pub trait CountryLocator {
    fn country_at(&self, lat: f64, lng: f64) -> String;
}

/// Nominatim (OpenStreetMap) reverse geocoder.
pub struct NominatimLocator {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<Address>,
}

#[derive(Debug, Deserialize)]
struct Address {
    #[serde(default)]
    country: Option<String>,
}

impl NominatimLocator {
    pub fn new(endpoint: impl Into<String>, user_agent: impl Into<String>) -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder().user_agent(user_agent.into()).build()?,
            endpoint: endpoint.into(),
        })
    }

    fn lookup(&self, lat: f64, lng: f64) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let lat = lat.to_string();
        let lon = lng.to_string();
        let body = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("format", "json"),
                ("accept-language", "en"),
            ])
            .send()?
            .error_for_status()?
            .text()?;
        Ok(country_from_response(&body)?)
    }
}

impl CountryLocator for NominatimLocator {
    fn country_at(&self, lat: f64, lng: f64) -> String {
        match self.lookup(lat, lng) {
            Ok(Some(country)) => country,
            Ok(None) => UNKNOWN_LOCATION.to_string(),
            Err(err) => {
                log::warn!("geocoding failed for ({lat}, {lng}): {err}");
                UNKNOWN_LOCATION.to_string()
            }
        }
    }
}

/// Extract `address.country` from a Nominatim `reverse` response body.
pub fn country_from_response(body: &str) -> Result<Option<String>, serde_json::Error> {
    let response: ReverseResponse = serde_json::from_str(body)?;
    Ok(response
        .address
        .and_then(|address| address.country)
        .filter(|country| !country.trim().is_empty()))
}
