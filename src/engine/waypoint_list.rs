use crate::entities::{Coordinates, Waypoint};

/// Start plus stops in append order. The start, when present, is always the
/// first element of [`WaypointList::ordered`].
#[derive(Clone, Debug, Default)]
pub struct WaypointList {
    start: Option<Waypoint>,
    stops: Vec<Waypoint>,
}

impl WaypointList {
    pub fn start(&self) -> Option<&Waypoint> {
        self.start.as_ref()
    }

    pub fn stops(&self) -> &[Waypoint] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len() + usize::from(self.start.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.stops.is_empty()
    }

    /// Replaces any existing start.
    pub fn set_start(&mut self, waypoint: Waypoint) -> Option<Waypoint> {
        self.start.replace(waypoint)
    }

    pub fn append_stop(&mut self, waypoint: Waypoint) {
        self.stops.push(waypoint);
    }

    pub fn clear_all(&mut self) {
        self.start = None;
        self.stops.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.start.iter().chain(self.stops.iter())
    }

    pub fn ordered(&self) -> Vec<Waypoint> {
        self.iter().cloned().collect()
    }

    /// Points to route through: start first, then stops. Empty without a
    /// start, since stops alone do not make a route.
    pub fn route_points(&self) -> Vec<Coordinates> {
        match &self.start {
            Some(_) => self.iter().map(|w| w.coordinates).collect(),
            None => vec![],
        }
    }
}
