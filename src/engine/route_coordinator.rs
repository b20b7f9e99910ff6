use std::time::Duration;

use async_channel::Sender;

use super::{within, Event};

use crate::{
    api::DynRoutingAPI,
    entities::{Coordinates, RouteResult, TravelMode, Waypoint},
    map::{MapSurface, Viewport},
};

/// Maps `(waypoints, travel mode)` to the single current route and owns the
/// map's polyline and markers.
///
/// Every trigger bumps the generation. Fetches run on spawned tasks and report
/// back through the session's event channel tagged with the generation they
/// were started for; [`RouteCoordinator::apply`] drops anything that is not
/// the latest.
pub struct RouteCoordinator {
    routing: DynRoutingAPI,
    map: Box<dyn MapSurface>,
    events: Sender<Event>,
    timeout: Duration,
    padding: u32,
    generation: u64,
    current: Option<RouteResult>,
}

impl RouteCoordinator {
    pub fn new(
        routing: DynRoutingAPI,
        map: Box<dyn MapSurface>,
        events: Sender<Event>,
        timeout: Duration,
        padding: u32,
    ) -> Self {
        Self {
            routing,
            map,
            events,
            timeout,
            padding,
            generation: 0,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&RouteResult> {
        self.current.as_ref()
    }

    /// Drops the current route and starts a fetch for `points` unless there are
    /// fewer than two of them. Returns the new generation.
    #[tracing::instrument(skip(self, points), fields(points = points.len()))]
    pub fn trigger(&mut self, points: &[Coordinates], mode: TravelMode) -> u64 {
        self.invalidate();
        let generation = self.generation;

        if points.len() < 2 {
            tracing::debug!("not enough points to route");
            return generation;
        }

        let routing = self.routing.clone();
        let events = self.events.clone();
        let timeout = self.timeout;
        let points = points.to_vec();

        tokio::spawn(async move {
            let outcome = fetch_route(routing, points, mode, timeout).await;

            // closed channel means the session is gone
            if events
                .send(Event::RouteFetched {
                    generation,
                    outcome,
                })
                .await
                .is_err()
            {
                tracing::debug!(generation, "route result dropped, session closed");
            }
        });

        generation
    }

    /// Applies a fetch outcome. Returns false when the outcome is stale.
    #[tracing::instrument(skip(self, outcome))]
    pub fn apply(&mut self, generation: u64, outcome: Option<RouteResult>) -> bool {
        if generation != self.generation {
            tracing::debug!(current = self.generation, "ignoring stale route");
            return false;
        }

        // a repeated delivery for the same generation must not stack polylines
        self.map.remove_route();
        self.current = None;

        let route = match outcome {
            Some(route) => route,
            None => {
                tracing::info!("no route for current waypoints");
                return true;
            }
        };

        self.map.draw_route(&route.path);

        if let Some(viewport) = Viewport::fit(&route.path, self.padding) {
            self.map.fit_bounds(viewport);
        }

        tracing::info!(
            distance = route.distance_meters,
            duration = route.duration_seconds,
            "route updated"
        );

        self.current = Some(route);
        true
    }

    /// Replaces the marker set and recenters on `focus`, the waypoint that was
    /// just added.
    pub fn show_markers(&mut self, waypoints: &[Waypoint], focus: Coordinates) {
        self.map.set_markers(waypoints);
        self.map.recenter(focus);
    }

    /// Forgets everything on the map, including fetches still in flight.
    pub fn reset(&mut self) {
        self.invalidate();
        self.map.set_markers(&[]);
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.current = None;
        self.map.remove_route();
    }
}

async fn fetch_route(
    routing: DynRoutingAPI,
    points: Vec<Coordinates>,
    mode: TravelMode,
    timeout: Duration,
) -> Option<RouteResult> {
    match within(timeout, routing.route(points, mode)).await {
        Ok(route) => route,
        Err(err) => {
            tracing::warn!("routing failed: {}", err);
            None
        }
    }
}
