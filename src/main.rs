use std::sync::Arc;

use waypoint::api::DynGeolocationAPI;
use waypoint::config::Config;
use waypoint::console::serve;
use waypoint::engine::{Services, Session};
use waypoint::error::Error;
use waypoint::external::geolocation::{FixedGeolocation, IpGeolocation};
use waypoint::external::{nominatim::Nominatim, osrm::Osrm};
use waypoint::map::TerminalMap;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    let geolocation: DynGeolocationAPI = match config.fixed_position {
        Some(position) => Arc::new(FixedGeolocation(position)),
        None => Arc::new(IpGeolocation::new(&config)?),
    };

    let services = Services {
        geocoding: Arc::new(Nominatim::new(&config)?),
        routing: Arc::new(Osrm::new(&config)?),
        geolocation: Some(geolocation),
    };

    tracing::info!(
        geocoding = %config.geocoding_api_base,
        routing = %config.routing_api_base,
        mode = %config.travel_mode,
        "starting session"
    );

    let (session, events) = Session::new(services, Box::new(TerminalMap::default()), &config);

    serve(session, events).await
}
