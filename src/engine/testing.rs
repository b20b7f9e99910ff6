//! In-memory stand-ins for the external services and the map.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    api::{GeocodingAPI, GeolocationAPI, RoutingAPI},
    entities::{Coordinates, RouteResult, Suggestion, TravelMode, Waypoint},
    error::{upstream_error, Error},
    map::{MapSurface, Viewport},
};

pub struct FakeGeocoder {
    places: Vec<Suggestion>,
    reverse: Option<String>,
    fail: bool,
    delay: Duration,
    search_calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    /// Every search answers with `labels`, placed on a small grid.
    pub fn with_places(labels: &[&str]) -> Self {
        let places = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                Suggestion::from_label(label, Coordinates::new(12.9 + i as f64 * 0.01, 77.6))
            })
            .collect();

        Self {
            places,
            reverse: None,
            fail: false,
            delay: Duration::ZERO,
            search_calls: AtomicUsize::new(0),
            queries: Mutex::new(vec![]),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_places(&[])
        }
    }

    pub fn reverse_label(mut self, label: Option<&str>) -> Self {
        self.reverse = label.map(String::from);
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeocodingAPI for FakeGeocoder {
    async fn search(&self, query: String, limit: usize) -> Result<Vec<Suggestion>, Error> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query);
        tokio::time::sleep(self.delay).await;

        if self.fail {
            return Err(upstream_error());
        }

        Ok(self.places.iter().take(limit).cloned().collect())
    }

    async fn reverse(&self, _: Coordinates) -> Result<Option<String>, Error> {
        tokio::time::sleep(self.delay).await;

        if self.fail {
            return Err(upstream_error());
        }

        Ok(self.reverse.clone())
    }
}

type RouteFn =
    dyn Fn(&[Coordinates], TravelMode) -> (Duration, Result<Option<RouteResult>, Error>)
        + Send
        + Sync;

pub struct FakeRouter {
    respond: Box<RouteFn>,
    requests: Mutex<Vec<(Vec<Coordinates>, TravelMode)>>,
}

impl FakeRouter {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&[Coordinates], TravelMode) -> (Duration, Result<Option<RouteResult>, Error>)
            + Send
            + Sync
            + 'static,
    {
        Self {
            respond: Box::new(respond),
            requests: Mutex::new(vec![]),
        }
    }

    /// Answers immediately with the requested points as the path.
    pub fn fixed(distance: f64, duration: f64) -> Self {
        Self::new(move |points, _| {
            (
                Duration::ZERO,
                Ok(Some(RouteResult::new(points.to_vec(), distance, duration))),
            )
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<(Vec<Coordinates>, TravelMode)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoutingAPI for FakeRouter {
    async fn route(
        &self,
        waypoints: Vec<Coordinates>,
        mode: TravelMode,
    ) -> Result<Option<RouteResult>, Error> {
        let (delay, outcome) = (self.respond)(&waypoints, mode);
        self.requests.lock().unwrap().push((waypoints, mode));
        tokio::time::sleep(delay).await;

        outcome
    }
}

pub struct FakeGeolocation {
    answer: Result<Coordinates, Error>,
    delay: Duration,
}

impl FakeGeolocation {
    pub fn answering(answer: Result<Coordinates, Error>) -> Self {
        Self {
            answer,
            delay: Duration::ZERO,
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl GeolocationAPI for FakeGeolocation {
    async fn current_position(&self) -> Result<Coordinates, Error> {
        tokio::time::sleep(self.delay).await;
        self.answer.clone()
    }
}

#[derive(Debug, Default)]
struct MapState {
    route: Option<Vec<Coordinates>>,
    overlapping_draws: usize,
    markers: Vec<Waypoint>,
    center: Option<Coordinates>,
    viewport: Option<Viewport>,
}

/// Map that remembers what is currently on screen. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct RecordingMap {
    state: Arc<Mutex<MapState>>,
}

impl RecordingMap {
    pub fn visible_route(&self) -> Option<Vec<Coordinates>> {
        self.state.lock().unwrap().route.clone()
    }

    /// Draws that happened while another polyline was still shown.
    pub fn overlapping_draws(&self) -> usize {
        self.state.lock().unwrap().overlapping_draws
    }

    pub fn markers(&self) -> Vec<Waypoint> {
        self.state.lock().unwrap().markers.clone()
    }

    pub fn center(&self) -> Option<Coordinates> {
        self.state.lock().unwrap().center
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.state.lock().unwrap().viewport
    }
}

impl MapSurface for RecordingMap {
    fn draw_route(&mut self, path: &[Coordinates]) {
        let mut state = self.state.lock().unwrap();

        if state.route.is_some() {
            state.overlapping_draws += 1;
        }

        state.route = Some(path.to_vec());
    }

    fn remove_route(&mut self) {
        self.state.lock().unwrap().route = None;
    }

    fn set_markers(&mut self, waypoints: &[Waypoint]) {
        self.state.lock().unwrap().markers = waypoints.to_vec();
    }

    fn recenter(&mut self, center: Coordinates) {
        self.state.lock().unwrap().center = Some(center);
    }

    fn fit_bounds(&mut self, viewport: Viewport) {
        self.state.lock().unwrap().viewport = Some(viewport);
    }
}
