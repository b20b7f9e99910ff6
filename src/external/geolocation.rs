use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    api::GeolocationAPI,
    config::Config,
    entities::Coordinates,
    error::{geolocation_unavailable_error, Error},
};

use super::{check_status, http_client};

/// A position supplied up front, e.g. from `GEOLOCATION_FIXED`.
#[derive(Clone, Debug)]
pub struct FixedGeolocation(pub Coordinates);

#[async_trait]
impl GeolocationAPI for FixedGeolocation {
    async fn current_position(&self) -> Result<Coordinates, Error> {
        Ok(self.0)
    }
}

/// Best-effort position derived from the public IP address.
#[derive(Clone, Debug)]
pub struct IpGeolocation {
    client: Client,
    api_base: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

fn parse_position(body: &str) -> Result<Coordinates, Error> {
    let data: Response = serde_json::from_str(body)?;

    if data.error {
        let reason = data.reason.unwrap_or_else(|| "lookup refused".into());
        return Err(geolocation_unavailable_error(&reason));
    }

    match (data.latitude, data.longitude) {
        (Some(latitude), Some(longitude)) => {
            let coordinates = Coordinates::new(latitude, longitude);

            if !coordinates.is_valid() {
                return Err(geolocation_unavailable_error("invalid position"));
            }

            Ok(coordinates)
        }
        _ => Err(geolocation_unavailable_error("no position")),
    }
}

impl IpGeolocation {
    pub fn new(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            client: http_client(&config.user_agent, config.request_timeout)?,
            api_base: config.geolocation_api_base.clone(),
        })
    }
}

#[async_trait]
impl GeolocationAPI for IpGeolocation {
    #[tracing::instrument(skip(self))]
    async fn current_position(&self) -> Result<Coordinates, Error> {
        let url = format!("{}/json/", self.api_base);

        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|_| geolocation_unavailable_error("service unreachable"))?;

        let body = check_status(res)?.text().await?;

        parse_position(&body)
    }
}
