mod location;
mod place;
mod route;
mod travel_mode;

pub use location::Coordinates;
pub use place::{Field, Suggestion, SuggestionList, Waypoint};
pub use route::{format_distance, format_duration, RouteResult, RouteSummary};
pub use travel_mode::TravelMode;
