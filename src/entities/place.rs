use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;

/// A resolved point that takes part in the route, either the start or a stop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: Uuid,
    pub display_name: String,
    pub full_address: String,
    pub coordinates: Coordinates,
}

impl Waypoint {
    pub fn new(display_name: String, full_address: String, coordinates: Coordinates) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name,
            full_address,
            coordinates,
        }
    }
}

impl From<Suggestion> for Waypoint {
    fn from(suggestion: Suggestion) -> Self {
        Waypoint::new(
            suggestion.display_name,
            suggestion.full_address,
            suggestion.coordinates,
        )
    }
}

/// A geocoding candidate awaiting selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub display_name: String,
    pub full_address: String,
    pub coordinates: Coordinates,
}

impl Suggestion {
    /// Splits a service label such as `"Koramangala, Bengaluru, Karnataka"`
    /// into a short display name and the full address.
    pub fn from_label(label: &str, coordinates: Coordinates) -> Self {
        let full_address = label.trim().to_string();
        let display_name = full_address
            .split(',')
            .next()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(full_address.as_str())
            .to_string();

        Self {
            display_name,
            full_address,
            coordinates,
        }
    }
}

/// Which input a suggestion list belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Start,
    Stop,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

/// Candidates for one field. The generation is bumped every time the list is
/// invalidated so late search results can be recognised and dropped.
#[derive(Clone, Debug, Default)]
pub struct SuggestionList {
    generation: u64,
    items: Vec<Suggestion>,
}

impl SuggestionList {
    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clears the list and invalidates any search still in flight. Returns the
    /// new generation.
    pub fn invalidate(&mut self) -> u64 {
        self.generation += 1;
        self.items.clear();
        self.generation
    }

    /// Starts a new search without clearing what is shown. Results of earlier
    /// searches are dropped from now on.
    pub fn begin_search(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Replaces the items if `generation` is still current.
    pub fn fill(&mut self, generation: u64, items: Vec<Suggestion>) -> bool {
        if generation != self.generation {
            return false;
        }

        self.items = items;
        true
    }

    pub fn take(&mut self, index: usize) -> Option<Suggestion> {
        let suggestion = self.items.get(index).cloned()?;
        self.invalidate();
        Some(suggestion)
    }
}
