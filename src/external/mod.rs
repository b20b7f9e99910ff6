pub mod geolocation;
pub mod nominatim;
pub mod osrm;

use std::time::Duration;

use reqwest::{Client, Response};

use crate::error::{invalid_input_error, upstream_error, Error};

pub(crate) fn http_client(user_agent: &str, timeout: Duration) -> Result<Client, Error> {
    let client = Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()?;

    Ok(client)
}

pub(crate) fn check_status(res: Response) -> Result<Response, Error> {
    let status_code = res.status().as_u16();

    if (400..500).contains(&status_code) {
        tracing::warn!(status_code, "request rejected by upstream");
        return Err(invalid_input_error());
    } else if status_code != 200 {
        tracing::warn!(status_code, "upstream failure");
        return Err(upstream_error());
    }

    Ok(res)
}
