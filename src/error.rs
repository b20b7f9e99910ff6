use std::fmt::{self, Debug, Display};
use std::io;
use std::num::ParseFloatError;

use tokio::time::error::Elapsed;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        parse_error(err)
    }
}

impl From<ParseFloatError> for Error {
    fn from(err: ParseFloatError) -> Self {
        parse_error(err)
    }
}

impl From<Elapsed> for Error {
    fn from(_: Elapsed) -> Self {
        timeout_error()
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        io_error(err)
    }
}

pub fn parse_error<T: Debug>(err: T) -> Error {
    tracing::debug!("parse error: {:?}", err);

    Error {
        code: 2,
        message: "parse error".into(),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    tracing::debug!("reqwest error: {:?}", err);

    Error {
        code: 3,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn timeout_error() -> Error {
    Error {
        code: 6,
        message: "timed out".into(),
    }
}

pub fn io_error(err: io::Error) -> Error {
    Error {
        code: 7,
        message: format!("io error: {}", err),
    }
}

pub fn invalid_config_error(name: &str) -> Error {
    Error {
        code: 8,
        message: format!("invalid value for {}", name),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 100,
        message: "invalid input".into(),
    }
}

pub fn geolocation_unavailable_error(reason: &str) -> Error {
    Error {
        code: 102,
        message: format!("geolocation unavailable: {}", reason),
    }
}

pub fn unknown_travel_mode_error(mode: &str) -> Error {
    Error {
        code: 103,
        message: format!("unknown travel mode \"{}\"", mode),
    }
}
