//! Named points on the globe.

use std::fmt;
use std::hash::{Hash, Hasher};

use searcher::Spatial;

use crate::Degrees;

/// A named place with a latitude and longitude.
///
/// Locations are identified by name alone: two locations with the same
/// name are equal, wherever they claim to be.
#[derive(Debug, Clone)]
pub struct Location {
    name: String,
    latitude: Degrees,
    longitude: Degrees,
}

impl Location {
    pub fn new<S: Into<String>>(name: S, latitude: Degrees, longitude: Degrees) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> Degrees {
        self.latitude
    }

    pub fn longitude(&self) -> Degrees {
        self.longitude
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state)
    }
}

impl Spatial for Location {
    /// Straight line distance in degrees, treating longitude and
    /// latitude as flat x and y coordinates.
    fn straight_line_distance(&self, other: &Self) -> f64 {
        (self.longitude - other.longitude).hypot(self.latitude - other.latitude)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.latitude, self.longitude)
    }
}
