//! Travel mode and route priority.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// How the traveller moves. `Car` is the default and the fallback mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Car,
    Bike,
}

impl TravelMode {
    /// Name understood by the routing API's `travelMode` parameter.
    pub fn api_name(&self) -> &'static str {
        match self {
            TravelMode::Car => "car",
            TravelMode::Bike => "bicycle",
        }
    }

    /// Short lowercase label, as stored in history.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Car => "car",
            TravelMode::Bike => "bike",
        }
    }

    /// Whether this is the mode used when another yields no route.
    pub fn is_default(&self) -> bool {
        *self == TravelMode::default()
    }
}

impl FromStr for TravelMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(TravelMode::Car),
            "bike" | "bicycle" => Ok(TravelMode::Bike),
            _ => Err(DomainError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optimisation objective requested from the routing API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutePriority {
    #[default]
    Fastest,
    Shortest,
    #[serde(rename = "eco-friendly", alias = "eco")]
    Eco,
}

impl RoutePriority {
    pub const ALL: [RoutePriority; 3] = [
        RoutePriority::Fastest,
        RoutePriority::Shortest,
        RoutePriority::Eco,
    ];

    /// Name understood by the routing API's `routeType` parameter.
    pub fn api_name(&self) -> &'static str {
        match self {
            RoutePriority::Fastest => "fastest",
            RoutePriority::Shortest => "shortest",
            RoutePriority::Eco => "eco",
        }
    }

    /// Lowercase label stored in history (`eco-friendly` rather than `eco`).
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutePriority::Fastest => "fastest",
            RoutePriority::Shortest => "shortest",
            RoutePriority::Eco => "eco-friendly",
        }
    }

    /// Title-cased label for display, e.g. "Eco Friendly".
    pub fn title(&self) -> &'static str {
        match self {
            RoutePriority::Fastest => "Fastest",
            RoutePriority::Shortest => "Shortest",
            RoutePriority::Eco => "Eco Friendly",
        }
    }
}

impl FromStr for RoutePriority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fastest" => Ok(RoutePriority::Fastest),
            "shortest" => Ok(RoutePriority::Shortest),
            "eco" | "eco-friendly" | "eco friendly" => Ok(RoutePriority::Eco),
            _ => Err(DomainError::UnknownPriority(s.to_string())),
        }
    }
}

impl fmt::Display for RoutePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
