//! Traffic severity classification used for colouring routes and cards.

use serde::Serialize;

/// Delay below this is smooth traffic.
const MODERATE_FROM_SECS: u32 = 5 * 60;

/// Delay at or above this is heavy traffic.
const HEAVY_FROM_SECS: u32 = 15 * 60;

/// Coarse traffic level derived from a route's traffic delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLevel {
    Smooth,
    Moderate,
    Heavy,
}

impl TrafficLevel {
    pub fn from_delay_secs(delay_secs: u32) -> Self {
        if delay_secs < MODERATE_FROM_SECS {
            TrafficLevel::Smooth
        } else if delay_secs < HEAVY_FROM_SECS {
            TrafficLevel::Moderate
        } else {
            TrafficLevel::Heavy
        }
    }

    /// Polyline colour on the traffic overview map.
    pub fn map_color(&self) -> &'static str {
        match self {
            TrafficLevel::Smooth => "blue",
            TrafficLevel::Moderate => "orange",
            TrafficLevel::Heavy => "darkred",
        }
    }

    /// Card label, e.g. "🟠 Moderate Traffic".
    pub fn label(&self) -> &'static str {
        match self {
            TrafficLevel::Smooth => "🟢 Smooth Traffic",
            TrafficLevel::Moderate => "🟠 Moderate Traffic",
            TrafficLevel::Heavy => "🔴 Heavy Traffic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(TrafficLevel::from_delay_secs(0), TrafficLevel::Smooth);
        assert_eq!(TrafficLevel::from_delay_secs(299), TrafficLevel::Smooth);
        assert_eq!(TrafficLevel::from_delay_secs(300), TrafficLevel::Moderate);
        assert_eq!(TrafficLevel::from_delay_secs(899), TrafficLevel::Moderate);
        assert_eq!(TrafficLevel::from_delay_secs(900), TrafficLevel::Heavy);
        assert_eq!(TrafficLevel::from_delay_secs(3600), TrafficLevel::Heavy);
    }

    #[test]
    fn colors() {
        assert_eq!(TrafficLevel::Smooth.map_color(), "blue");
        assert_eq!(TrafficLevel::Moderate.map_color(), "orange");
        assert_eq!(TrafficLevel::Heavy.map_color(), "darkred");
    }
}
