use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    api::RoutingAPI,
    config::Config,
    entities::{Coordinates, RouteResult, TravelMode},
    error::{invalid_input_error, Error},
};

use super::{check_status, http_client};

/// Client for an OSRM-compatible routing service.
#[derive(Clone, Debug)]
pub struct Osrm {
    client: Client,
    api_base: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Route {
    geometry: Geometry,
    distance: f64,
    duration: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Geometry {
    coordinates: Vec<[f64; 2]>,
}

/// `{lon},{lat};{lon},{lat};...` as expected in the request path.
pub fn coordinate_list(waypoints: &[Coordinates]) -> String {
    waypoints
        .iter()
        .map(|c| format!("{},{}", c.longitude, c.latitude))
        .collect::<Vec<_>>()
        .join(";")
}

/// Takes the first route of a response. Geometry arrives as `[lon, lat]` and
/// is swapped into map order.
pub fn parse_route(body: &str) -> Result<Option<RouteResult>, Error> {
    let data: Response = serde_json::from_str(body)?;

    if data.code != "Ok" {
        tracing::info!(code = %data.code, message = ?data.message, "no route");
        return Ok(None);
    }

    let route = match data.routes.into_iter().next() {
        Some(route) => route,
        None => return Ok(None),
    };

    let path = route
        .geometry
        .coordinates
        .into_iter()
        .map(Coordinates::from_lon_lat)
        .collect();

    Ok(Some(RouteResult::new(path, route.distance, route.duration)))
}

impl Osrm {
    pub fn new(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            client: http_client(&config.user_agent, config.request_timeout)?,
            api_base: config.routing_api_base.clone(),
        })
    }

    pub fn route_url(&self, waypoints: &[Coordinates], mode: TravelMode) -> String {
        format!(
            "{}/route/v1/{}/{}",
            self.api_base,
            mode.profile(),
            coordinate_list(waypoints)
        )
    }
}

#[async_trait]
impl RoutingAPI for Osrm {
    #[tracing::instrument(skip(self, waypoints), fields(points = waypoints.len()))]
    async fn route(
        &self,
        waypoints: Vec<Coordinates>,
        mode: TravelMode,
    ) -> Result<Option<RouteResult>, Error> {
        if waypoints.len() < 2 {
            return Err(invalid_input_error());
        }

        let res = self
            .client
            .get(self.route_url(&waypoints, mode))
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;

        // OSRM reports "NoRoute" and friends with a 400 and a JSON body.
        if res.status().as_u16() == 400 {
            let body = res.text().await?;
            return parse_route(&body);
        }

        let body = check_status(res)?.text().await?;

        parse_route(&body)
    }
}
