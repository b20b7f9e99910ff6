mod address_resolver;
mod route_coordinator;
mod session;
mod waypoint_list;

#[cfg(test)]
pub(crate) mod testing;

pub use address_resolver::{is_searchable, AddressResolver, CURRENT_LOCATION_LABEL, MIN_QUERY_LENGTH};
pub use route_coordinator::RouteCoordinator;
pub use session::{Services, Session, Update};
pub use waypoint_list::WaypointList;

use std::future::Future;
use std::time::Duration;

use crate::{
    entities::{Field, RouteResult, Suggestion},
    error::Error,
};

/// Results of background work, delivered back to the session loop. Each one
/// carries the generation it was started for.
#[derive(Debug)]
pub enum Event {
    RouteFetched {
        generation: u64,
        outcome: Option<RouteResult>,
    },
    SuggestionsFetched {
        field: Field,
        generation: u64,
        suggestions: Vec<Suggestion>,
    },
}

/// Runs a service call under `timeout`. Running out of time is reported as an
/// ordinary [`Error`].
pub(crate) async fn within<T>(
    timeout: Duration,
    call: impl Future<Output = Result<T, Error>>,
) -> Result<T, Error> {
    tokio::time::timeout(timeout, call).await?
}
