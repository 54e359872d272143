//! The geographic extent of a set of locations.

use itertools::{Itertools, MinMaxResult};

use crate::location::Location;
use crate::Degrees;

/// A box aligned with lines of latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    west: Degrees,
    east: Degrees,
    south: Degrees,
    north: Degrees,
}

fn extent(values: impl Iterator<Item = Degrees>) -> Option<(Degrees, Degrees)> {
    match values.minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some((v, v)),
        MinMaxResult::MinMax(lo, hi) => Some((lo, hi)),
    }
}

impl Bounds {
    pub fn new(west: Degrees, east: Degrees, south: Degrees, north: Degrees) -> Self {
        Self {
            west,
            east,
            south,
            north,
        }
    }

    /// Smallest bounds which cover every location given.
    ///
    /// Returns `None` when there are no locations.
    pub fn from_locations<'a>(locations: impl Iterator<Item = &'a Location> + Clone) -> Option<Self> {
        let (west, east) = extent(locations.clone().map(|l| l.longitude()))?;
        let (south, north) = extent(locations.map(|l| l.latitude()))?;
        Some(Self::new(west, east, south, north))
    }

    /// Smallest longitude.
    pub fn west(&self) -> Degrees {
        self.west
    }

    /// Largest longitude.
    pub fn east(&self) -> Degrees {
        self.east
    }

    /// Smallest latitude.
    pub fn south(&self) -> Degrees {
        self.south
    }

    /// Largest latitude.
    pub fn north(&self) -> Degrees {
        self.north
    }

    pub fn width(&self) -> Degrees {
        self.east - self.west
    }

    pub fn height(&self) -> Degrees {
        self.north - self.south
    }

    /// Check if a location falls within (or on the edge of) these bounds.
    pub fn contains(&self, location: &Location) -> bool {
        (self.west..=self.east).contains(&location.longitude())
            && (self.south..=self.north).contains(&location.latitude())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bounds() {
        let locations = vec![
            Location::new("A", 33.0, -118.0),
            Location::new("B", 34.5, -117.0),
            Location::new("C", 33.5, -117.5),
        ];

        let bounds = Bounds::from_locations(locations.iter()).unwrap();
        assert_eq!(bounds, Bounds::new(-118.0, -117.0, 33.0, 34.5));
        assert_eq!(bounds.width(), 1.0);
        assert_eq!(bounds.height(), 1.5);

        for l in &locations {
            assert!(bounds.contains(l));
        }
        assert!(!bounds.contains(&Location::new("D", 35.0, -117.5)));
    }

    #[test]
    fn single() {
        let locations = vec![Location::new("A", 10.0, 20.0)];
        let bounds = Bounds::from_locations(locations.iter()).unwrap();
        assert_eq!(bounds.width(), 0.0);
        assert_eq!(bounds.north(), 10.0);
        assert_eq!(bounds.east(), 20.0);
    }

    #[test]
    fn empty() {
        let locations: Vec<Location> = Vec::new();
        assert_eq!(Bounds::from_locations(locations.iter()), None);
    }
}
