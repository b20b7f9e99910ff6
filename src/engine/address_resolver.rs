use std::time::Duration;

use super::within;

use crate::{
    api::DynGeocodingAPI,
    entities::{Coordinates, Suggestion},
};

pub const MIN_QUERY_LENGTH: usize = 3;
pub const CURRENT_LOCATION_LABEL: &str = "Current Location";

/// Free text to coordinates. Every failure ends up as an empty list, `None`
/// or the fallback label; nothing here returns an error.
#[derive(Clone)]
pub struct AddressResolver {
    geocoding: DynGeocodingAPI,
    limit: usize,
    timeout: Duration,
}

pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_LENGTH
}

impl AddressResolver {
    pub fn new(geocoding: DynGeocodingAPI, limit: usize, timeout: Duration) -> Self {
        Self {
            geocoding,
            limit,
            timeout,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Vec<Suggestion> {
        if !is_searchable(query) {
            return vec![];
        }

        let lookup = self.geocoding.search(query.trim().to_string(), self.limit);

        match within(self.timeout, lookup).await {
            Ok(suggestions) => suggestions,
            Err(err) => {
                tracing::warn!("search failed: {}", err);
                vec![]
            }
        }
    }

    /// Best match for an address typed without picking a suggestion.
    #[tracing::instrument(skip(self))]
    pub async fn geocode(&self, address: &str) -> Option<Suggestion> {
        self.search(address).await.into_iter().next()
    }

    #[tracing::instrument(skip(self))]
    pub async fn reverse_geocode(&self, coordinates: Coordinates) -> String {
        let lookup = self.geocoding.reverse(coordinates);

        match within(self.timeout, lookup).await {
            Ok(Some(label)) if !label.trim().is_empty() => label,
            Ok(_) => CURRENT_LOCATION_LABEL.into(),
            Err(err) => {
                tracing::warn!("reverse geocode failed: {}", err);
                CURRENT_LOCATION_LABEL.into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::FakeGeocoder;
    use std::sync::Arc;
    use tokio_test::block_on;

    fn resolver(geocoder: &Arc<FakeGeocoder>) -> AddressResolver {
        AddressResolver::new(geocoder.clone(), 5, Duration::from_secs(1))
    }

    #[test]
    fn short_queries_never_hit_the_network() {
        let geocoder = Arc::new(FakeGeocoder::with_places(&["Malleshwaram, Bengaluru"]));
        let resolver = resolver(&geocoder);

        for query in ["", "M", "Ma", "  Ma  ", "é"] {
            assert!(block_on(resolver.search(query)).is_empty());
        }

        assert_eq!(geocoder.search_calls(), 0);
    }

    #[test]
    fn three_characters_trigger_a_lookup() {
        let geocoder = Arc::new(FakeGeocoder::with_places(&["Malleshwaram, Bengaluru"]));
        let resolver = resolver(&geocoder);

        let suggestions = block_on(resolver.search("Mal"));

        assert_eq!(geocoder.search_calls(), 1);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(geocoder.queries(), vec!["Mal".to_string()]);
    }

    #[test]
    fn failures_become_empty() {
        let geocoder = Arc::new(FakeGeocoder::failing());
        let resolver = resolver(&geocoder);

        assert!(block_on(resolver.search("Malleshwaram")).is_empty());
        assert!(block_on(resolver.geocode("Malleshwaram")).is_none());
    }

    #[test]
    fn geocode_takes_first_result() {
        let geocoder = Arc::new(FakeGeocoder::with_places(&[
            "Indiranagar, Bengaluru",
            "Indiranagar, Lucknow",
        ]));
        let resolver = resolver(&geocoder);

        let best = block_on(resolver.geocode("Indiranagar")).unwrap();

        assert_eq!(best.full_address, "Indiranagar, Bengaluru");
    }

    #[test]
    fn reverse_geocode_falls_back() {
        let geocoder = Arc::new(FakeGeocoder::failing());
        let label = block_on(resolver(&geocoder).reverse_geocode(Coordinates::new(1.0, 2.0)));
        assert_eq!(label, CURRENT_LOCATION_LABEL);

        let geocoder = Arc::new(FakeGeocoder::with_places(&[]).reverse_label(Some("   ")));
        let label = block_on(resolver(&geocoder).reverse_geocode(Coordinates::new(1.0, 2.0)));
        assert_eq!(label, CURRENT_LOCATION_LABEL);

        let geocoder = Arc::new(FakeGeocoder::with_places(&[]).reverse_label(Some("MG Road")));
        let label = block_on(resolver(&geocoder).reverse_geocode(Coordinates::new(1.0, 2.0)));
        assert_eq!(label, "MG Road");
    }

    #[test]
    fn slow_lookups_time_out() {
        let geocoder = Arc::new(
            FakeGeocoder::with_places(&["Malleshwaram"]).delay(Duration::from_millis(200)),
        );
        let resolver = AddressResolver::new(geocoder.clone(), 5, Duration::from_millis(20));

        assert!(block_on(resolver.search("Malleshwaram")).is_empty());
    }

    #[test]
    fn slow_reverse_geocode_falls_back() {
        let geocoder = Arc::new(
            FakeGeocoder::with_places(&[])
                .reverse_label(Some("MG Road, Bengaluru"))
                .delay(Duration::from_millis(200)),
        );
        let resolver = AddressResolver::new(geocoder.clone(), 5, Duration::from_millis(20));

        let label = block_on(resolver.reverse_geocode(Coordinates::new(12.97, 77.6)));

        assert_eq!(label, CURRENT_LOCATION_LABEL);
    }
}
