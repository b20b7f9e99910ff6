use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{unknown_travel_mode_error, Error};

/// Profile selector passed verbatim to the routing service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Car,
    Truck,
    Bike,
    MountainBike,
    RacingBike,
    Foot,
    Motorcycle,
    Bus,
    Scooter,
}

impl TravelMode {
    pub const ALL: [TravelMode; 9] = [
        Self::Car,
        Self::Truck,
        Self::Bike,
        Self::MountainBike,
        Self::RacingBike,
        Self::Foot,
        Self::Motorcycle,
        Self::Bus,
        Self::Scooter,
    ];

    pub fn profile(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Truck => "truck",
            Self::Bike => "bike",
            Self::MountainBike => "mtb",
            Self::RacingBike => "racingbike",
            Self::Foot => "foot",
            Self::Motorcycle => "motorcycle",
            Self::Bus => "bus",
            Self::Scooter => "scooter",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Car => "Car",
            Self::Truck => "Truck",
            Self::Bike => "Bicycle",
            Self::MountainBike => "Mountain bike",
            Self::RacingBike => "Racing bike",
            Self::Foot => "Walking",
            Self::Motorcycle => "Motorcycle",
            Self::Bus => "Bus",
            Self::Scooter => "Scooter",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile())
    }
}

impl FromStr for TravelMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s.trim().to_ascii_lowercase().as_str() {
            "car" | "driving" => Self::Car,
            "truck" => Self::Truck,
            "bike" | "bicycle" | "cycling" => Self::Bike,
            "mtb" => Self::MountainBike,
            "racingbike" => Self::RacingBike,
            "foot" | "walking" => Self::Foot,
            "motorcycle" => Self::Motorcycle,
            "bus" => Self::Bus,
            "scooter" => Self::Scooter,
            other => return Err(unknown_travel_mode_error(other)),
        };

        Ok(mode)
    }
}
