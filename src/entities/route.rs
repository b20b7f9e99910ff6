use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

/// Outcome of the last successful routing call. The path is in map order
/// (latitude, longitude).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub path: Vec<Coordinates>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance: String,
    pub duration: String,
}

impl RouteResult {
    pub fn new(path: Vec<Coordinates>, distance_meters: f64, duration_seconds: f64) -> Self {
        Self {
            path,
            distance_meters,
            duration_seconds,
        }
    }

    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            distance: format_distance(self.distance_meters),
            duration: format_duration(self.duration_seconds),
        }
    }
}

pub fn format_distance(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}

pub fn format_duration(seconds: f64) -> String {
    let minutes = (seconds / 60.0).round() as u64;

    if minutes < 60 {
        return format!("{} min", minutes);
    }

    format!("{} h {} min", minutes / 60, minutes % 60)
}
