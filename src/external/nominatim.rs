use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    api::GeocodingAPI,
    config::Config,
    entities::{Coordinates, Suggestion},
    error::Error,
};

use super::{check_status, http_client};

/// Client for a Nominatim-compatible geocoding service.
#[derive(Clone, Debug)]
pub struct Nominatim {
    client: Client,
    api_base: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReversePlace {
    pub display_name: Option<String>,
    pub error: Option<String>,
}

impl Place {
    fn into_suggestion(self) -> Option<Suggestion> {
        let latitude: f64 = self.lat.trim().parse().ok()?;
        let longitude: f64 = self.lon.trim().parse().ok()?;
        let coordinates = Coordinates::new(latitude, longitude);

        if !coordinates.is_valid() {
            return None;
        }

        Some(Suggestion::from_label(&self.display_name, coordinates))
    }
}

impl ReversePlace {
    fn into_label(self) -> Option<String> {
        if self.error.is_some() {
            return None;
        }

        self.display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
    }
}

/// Turns a search response into suggestions, dropping entries whose
/// coordinates do not parse.
pub fn parse_search(body: &str) -> Result<Vec<Suggestion>, Error> {
    let places: Vec<Place> = serde_json::from_str(body)?;

    Ok(places
        .into_iter()
        .filter_map(Place::into_suggestion)
        .collect())
}

pub fn parse_reverse(body: &str) -> Result<Option<String>, Error> {
    let place: ReversePlace = serde_json::from_str(body)?;

    Ok(place.into_label())
}

impl Nominatim {
    pub fn new(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            client: http_client(&config.user_agent, config.request_timeout)?,
            api_base: config.geocoding_api_base.clone(),
        })
    }
}

#[async_trait]
impl GeocodingAPI for Nominatim {
    #[tracing::instrument(skip(self))]
    async fn search(&self, query: String, limit: usize) -> Result<Vec<Suggestion>, Error> {
        let url = format!("{}/search", self.api_base);

        let res = self
            .client
            .get(url)
            .query(&[("format", "json")])
            .query(&[("q", query)])
            .query(&[("limit", limit)])
            .send()
            .await?;

        let body = check_status(res)?.text().await?;

        parse_search(&body)
    }

    #[tracing::instrument(skip(self))]
    async fn reverse(&self, coordinates: Coordinates) -> Result<Option<String>, Error> {
        let url = format!("{}/reverse", self.api_base);

        let res = self
            .client
            .get(url)
            .query(&[("format", "json")])
            .query(&[("lat", coordinates.latitude)])
            .query(&[("lon", coordinates.longitude)])
            .send()
            .await?;

        let body = check_status(res)?.text().await?;

        parse_reverse(&body)
    }
}
