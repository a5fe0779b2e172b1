//! Geographic coordinate type.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A (latitude, longitude) pair in floating-point degrees.
///
/// Coordinates come from the geocoder or from route polylines and are never
/// mutated afterwards. Equality and hashing use the exact bit patterns so a
/// coordinate can be part of a cache key.
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude in degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Format as `lat,lon`, the form used in routing request paths.
    pub fn to_path_segment(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }

    /// `[lat, lon]` array, the form Leaflet expects.
    pub fn to_lat_lon(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lon.to_bits() == other.lon.to_bits()
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat.to_bits().hash(state);
        self.lon.to_bits().hash(state);
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn path_segment() {
        let c = Coordinate::new(17.385, 78.4867);
        assert_eq!(c.to_path_segment(), "17.385,78.4867");
    }

    #[test]
    fn equality_is_exact() {
        let a = Coordinate::new(17.385, 78.4867);
        let b = Coordinate::new(17.385, 78.4867);
        let c = Coordinate::new(17.385, 78.4868);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn hash_consistent_with_eq() {
        let mut set = HashSet::new();
        set.insert(Coordinate::new(12.97, 77.59));
        assert!(set.contains(&Coordinate::new(12.97, 77.59)));
        assert!(!set.contains(&Coordinate::new(12.97, 77.6)));
    }

    #[test]
    fn display_rounds() {
        let c = Coordinate::new(17.3850123456, 78.4867);
        assert_eq!(c.to_string(), "(17.38501, 78.48670)");
    }
}
