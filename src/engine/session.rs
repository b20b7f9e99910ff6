use std::time::Duration;

use async_channel::{Receiver, Sender};

use super::{is_searchable, within, AddressResolver, Event, RouteCoordinator, WaypointList};

use crate::{
    api::{DynGeocodingAPI, DynGeolocationAPI, DynRoutingAPI},
    config::Config,
    entities::{Coordinates, Field, RouteResult, Suggestion, SuggestionList, TravelMode, Waypoint},
    map::MapSurface,
};

pub struct Services {
    pub geocoding: DynGeocodingAPI,
    pub routing: DynRoutingAPI,
    pub geolocation: Option<DynGeolocationAPI>,
}

/// What changed after an [`Event`] was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Update {
    Route,
    Suggestions(Field),
}

/// All state of one planning session. Mutators re-trigger the route
/// coordinator themselves; nothing watches for changes.
pub struct Session {
    waypoints: WaypointList,
    travel_mode: TravelMode,
    start_suggestions: SuggestionList,
    stop_suggestions: SuggestionList,
    notices: Vec<String>,
    resolver: AddressResolver,
    coordinator: RouteCoordinator,
    geolocation: Option<DynGeolocationAPI>,
    timeout: Duration,
    events: Sender<Event>,
}

impl Session {
    #[tracing::instrument(name = "Session::new", skip_all)]
    pub fn new(
        services: Services,
        map: Box<dyn MapSurface>,
        config: &Config,
    ) -> (Self, Receiver<Event>) {
        let (events, receiver) = async_channel::unbounded();

        let resolver = AddressResolver::new(
            services.geocoding,
            config.suggestion_limit,
            config.request_timeout,
        );

        let coordinator = RouteCoordinator::new(
            services.routing,
            map,
            events.clone(),
            config.request_timeout,
            config.fit_bounds_padding,
        );

        let session = Self {
            waypoints: WaypointList::default(),
            travel_mode: config.travel_mode,
            start_suggestions: SuggestionList::default(),
            stop_suggestions: SuggestionList::default(),
            notices: vec![],
            resolver,
            coordinator,
            geolocation: services.geolocation,
            timeout: config.request_timeout,
            events,
        };

        (session, receiver)
    }

    pub fn waypoints(&self) -> &WaypointList {
        &self.waypoints
    }

    pub fn travel_mode(&self) -> TravelMode {
        self.travel_mode
    }

    pub fn route(&self) -> Option<&RouteResult> {
        self.coordinator.current()
    }

    pub fn suggestions(&self, field: Field) -> &SuggestionList {
        match field {
            Field::Start => &self.start_suggestions,
            Field::Stop => &self.stop_suggestions,
        }
    }

    fn suggestions_mut(&mut self, field: Field) -> &mut SuggestionList {
        match field {
            Field::Start => &mut self.start_suggestions,
            Field::Stop => &mut self.stop_suggestions,
        }
    }

    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, notice: String) {
        tracing::info!("notice: {}", notice);
        self.notices.push(notice);
    }

    #[tracing::instrument(skip(self), fields(id = %waypoint.id))]
    pub fn set_start(&mut self, waypoint: Waypoint) {
        let focus = waypoint.coordinates;
        self.waypoints.set_start(waypoint);
        self.waypoints_changed(focus);
    }

    #[tracing::instrument(skip(self), fields(id = %waypoint.id))]
    pub fn append_stop(&mut self, waypoint: Waypoint) {
        let focus = waypoint.coordinates;
        self.waypoints.append_stop(waypoint);
        self.waypoints_changed(focus);
    }

    /// Returns false when `mode` is already selected.
    pub fn set_travel_mode(&mut self, mode: TravelMode) -> bool {
        if mode == self.travel_mode {
            return false;
        }

        self.travel_mode = mode;
        self.refresh();
        true
    }

    /// Whether the current waypoints are enough for a route: a start plus at
    /// least one stop.
    pub fn is_routable(&self) -> bool {
        self.waypoints.route_points().len() >= 2
    }

    /// Re-runs the route for unchanged inputs.
    pub fn refresh(&mut self) {
        let points = self.waypoints.route_points();
        self.coordinator.trigger(&points, self.travel_mode);
    }

    #[tracing::instrument(skip(self))]
    pub fn clear_all(&mut self) {
        self.waypoints.clear_all();
        self.start_suggestions.invalidate();
        self.stop_suggestions.invalidate();
        self.coordinator.reset();
    }

    fn waypoints_changed(&mut self, focus: Coordinates) {
        let ordered = self.waypoints.ordered();
        self.coordinator.show_markers(&ordered, focus);
        self.refresh();
    }

    fn add(&mut self, field: Field, waypoint: Waypoint) {
        match field {
            Field::Start => self.set_start(waypoint),
            Field::Stop => self.append_stop(waypoint),
        }
    }

    /// Starts a suggestion lookup for `field`. Short queries clear the list
    /// instead. Returns whether a lookup was started.
    #[tracing::instrument(skip(self))]
    pub fn suggest(&mut self, field: Field, query: &str) -> bool {
        if !is_searchable(query) {
            self.suggestions_mut(field).invalidate();
            return false;
        }

        let generation = self.suggestions_mut(field).begin_search();
        let resolver = self.resolver.clone();
        let events = self.events.clone();
        let query = query.to_string();

        tokio::spawn(async move {
            let suggestions = resolver.search(&query).await;

            if events
                .send(Event::SuggestionsFetched {
                    field,
                    generation,
                    suggestions,
                })
                .await
                .is_err()
            {
                tracing::debug!(generation, "suggestions dropped, session closed");
            }
        });

        true
    }

    /// Turns the `index`-th suggestion of `field` into a waypoint.
    pub fn select_suggestion(&mut self, field: Field, index: usize) -> Option<Waypoint> {
        let suggestion = match self.suggestions_mut(field).take(index) {
            Some(suggestion) => suggestion,
            None => {
                self.notify(format!("No {} suggestion #{}", field.name(), index + 1));
                return None;
            }
        };

        let waypoint = Waypoint::from(suggestion);
        self.add(field, waypoint.clone());

        Some(waypoint)
    }

    /// Geocodes free text that was submitted without picking a suggestion.
    #[tracing::instrument(skip(self))]
    pub async fn submit(&mut self, field: Field, text: &str) -> Option<Waypoint> {
        self.suggestions_mut(field).invalidate();

        let best: Option<Suggestion> = self.resolver.geocode(text).await;

        match best {
            Some(suggestion) => {
                let waypoint = Waypoint::from(suggestion);
                self.add(field, waypoint.clone());
                Some(waypoint)
            }
            None => {
                self.notify(format!("No results found for \"{}\"", text.trim()));
                None
            }
        }
    }

    /// Uses the device position as the start.
    #[tracing::instrument(skip(self))]
    pub async fn locate(&mut self) -> Option<Waypoint> {
        let geolocation = match self.geolocation.clone() {
            Some(geolocation) => geolocation,
            None => {
                self.notify("Geolocation is not available".into());
                return None;
            }
        };

        let position = match within(self.timeout, geolocation.current_position()).await {
            Ok(position) => position,
            Err(err) => {
                self.notify(format!("Unable to retrieve your location: {}", err.message));
                return None;
            }
        };

        let label = self.resolver.reverse_geocode(position).await;
        let waypoint = Waypoint::from(Suggestion::from_label(&label, position));
        self.set_start(waypoint.clone());

        Some(waypoint)
    }

    /// Applies background results that are still current.
    pub fn apply(&mut self, event: Event) -> Option<Update> {
        match event {
            Event::RouteFetched {
                generation,
                outcome,
            } => self
                .coordinator
                .apply(generation, outcome)
                .then_some(Update::Route),
            Event::SuggestionsFetched {
                field,
                generation,
                suggestions,
            } => self
                .suggestions_mut(field)
                .fill(generation, suggestions)
                .then_some(Update::Suggestions(field)),
        }
    }
}
