use std::sync::Arc;

use async_trait::async_trait;

use crate::entities::{Coordinates, RouteResult, Suggestion, TravelMode};
use crate::error::Error;

#[async_trait]
pub trait GeocodingAPI {
    /// Candidates for a free-text query, best match first.
    async fn search(&self, query: String, limit: usize) -> Result<Vec<Suggestion>, Error>;

    /// Label for a point, `None` when the service has nothing usable.
    async fn reverse(&self, coordinates: Coordinates) -> Result<Option<String>, Error>;
}

#[async_trait]
pub trait RoutingAPI {
    /// Route through `waypoints` in order. `Ok(None)` means the service
    /// answered but found no route.
    async fn route(
        &self,
        waypoints: Vec<Coordinates>,
        mode: TravelMode,
    ) -> Result<Option<RouteResult>, Error>;
}

#[async_trait]
pub trait GeolocationAPI {
    async fn current_position(&self) -> Result<Coordinates, Error>;
}

pub type DynGeocodingAPI = Arc<dyn GeocodingAPI + Send + Sync>;
pub type DynRoutingAPI = Arc<dyn RoutingAPI + Send + Sync>;
pub type DynGeolocationAPI = Arc<dyn GeolocationAPI + Send + Sync>;
