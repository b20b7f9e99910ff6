use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::entities::{Coordinates, TravelMode};
use crate::error::{invalid_config_error, Error};

const DEFAULT_GEOCODING_API_BASE: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_ROUTING_API_BASE: &str = "https://router.project-osrm.org";
const DEFAULT_GEOLOCATION_API_BASE: &str = "https://ipapi.co";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub geocoding_api_base: String,
    pub routing_api_base: String,
    pub geolocation_api_base: String,
    pub fixed_position: Option<Coordinates>,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub suggestion_limit: usize,
    pub fit_bounds_padding: u32,
    pub travel_mode: TravelMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_api_base: DEFAULT_GEOCODING_API_BASE.into(),
            routing_api_base: DEFAULT_ROUTING_API_BASE.into(),
            geolocation_api_base: DEFAULT_GEOLOCATION_API_BASE.into(),
            fixed_position: None,
            user_agent: format!("waypoint/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: Duration::from_secs(10),
            suggestion_limit: 5,
            fit_bounds_padding: 50,
            travel_mode: TravelMode::default(),
        }
    }
}

impl Config {
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any key lookup, falling back to defaults for
    /// missing keys. Present but malformed values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let fixed_position = match lookup("GEOLOCATION_FIXED") {
            Some(value) => Some(parse_position(&value)?),
            None => None,
        };

        Ok(Self {
            geocoding_api_base: base_url(lookup("GEOCODING_API_BASE"), defaults.geocoding_api_base),
            routing_api_base: base_url(lookup("ROUTING_API_BASE"), defaults.routing_api_base),
            geolocation_api_base: base_url(
                lookup("GEOLOCATION_API_BASE"),
                defaults.geolocation_api_base,
            ),
            fixed_position,
            user_agent: lookup("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
            request_timeout: parse_or("REQUEST_TIMEOUT_SECS", &lookup)?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            suggestion_limit: parse_or("SUGGESTION_LIMIT", &lookup)?
                .unwrap_or(defaults.suggestion_limit),
            fit_bounds_padding: parse_or("FIT_BOUNDS_PADDING", &lookup)?
                .unwrap_or(defaults.fit_bounds_padding),
            travel_mode: parse_or("TRAVEL_MODE", &lookup)?.unwrap_or(defaults.travel_mode),
        })
    }
}

fn base_url(value: Option<String>, default: String) -> String {
    value
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or(default)
}

fn parse_or<T, F>(name: &str, lookup: &F) -> Result<Option<T>, Error>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid_config_error(name)),
        None => Ok(None),
    }
}

fn parse_position(value: &str) -> Result<Coordinates, Error> {
    let (latitude, longitude) = value
        .split_once(',')
        .ok_or_else(|| invalid_config_error("GEOLOCATION_FIXED"))?;

    let coordinates = Coordinates::new(latitude.trim().parse()?, longitude.trim().parse()?);

    if !coordinates.is_valid() {
        return Err(invalid_config_error("GEOLOCATION_FIXED"));
    }

    Ok(coordinates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, Error> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.travel_mode, TravelMode::Car);
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("ROUTING_API_BASE", "http://localhost:5000/"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("TRAVEL_MODE", "foot"),
            ("GEOLOCATION_FIXED", "12.97, 77.59"),
        ])
        .unwrap();

        assert_eq!(config.routing_api_base, "http://localhost:5000");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.travel_mode, TravelMode::Foot);
        assert_eq!(config.fixed_position, Some(Coordinates::new(12.97, 77.59)));
    }

    #[test]
    fn malformed_values() {
        assert!(config_from(&[("SUGGESTION_LIMIT", "many")]).is_err());
        assert!(config_from(&[("TRAVEL_MODE", "teleport")]).is_err());
        assert!(config_from(&[("GEOLOCATION_FIXED", "12.97")]).is_err());
        assert!(config_from(&[("GEOLOCATION_FIXED", "120.0,0.0")]).is_err());
    }
}
