//! Street maps: locations joined by one-way roads.
//!
//! Maps are written one record per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! location <name> <latitude> <longitude>
//! road <road-name> <origin> <destination> <cost>
//! ```
//!
//! A two-way street is written as two roads.

use std::io::{self, Read};
use std::num::ParseFloatError;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use searcher::graph::Graph;
use searcher::{Cost, SearchSpace};

use crate::bounds::Bounds;
use crate::location::Location;

/// Error when building or reading a street map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Road {0} has an invalid cost: {1}")]
    InvalidCost(String, Cost),

    #[error("Line {0}: unrecognized record: {1}")]
    InvalidRecord(usize, String),

    #[error("Line {0}: invalid number")]
    InvalidNumber(usize, #[source] ParseFloatError),

    #[error("Line {0}: location {1} is already on the map")]
    DuplicateLocation(usize, String),

    #[error("Line {0}: {1}")]
    InvalidRoad(usize, #[source] Box<MapError>),

    #[error("Unable to read map")]
    Io(#[from] io::Error),
}

type Result<T> = std::result::Result<T, MapError>;

/// A one-way road between two locations.
#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub cost: Cost,
}

impl Road {
    pub fn new<S: Into<String>>(name: S, origin: S, destination: S, cost: Cost) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
            destination: destination.into(),
            cost,
        }
    }
}

/// A set of locations and the roads between them.
#[derive(Debug, Clone, Default)]
pub struct StreetMap {
    graph: Graph<Location>,
    roads: Vec<Road>,
}

impl StreetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a map in the line format described in the module docs.
    pub fn read(mut reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        text.parse()
    }

    /// Add a location to the map.
    ///
    /// Returns false when a location with the same name is already present,
    /// in which case the map is unchanged.
    pub fn record_location(&mut self, location: Location) -> bool {
        let name = location.name().to_string();
        self.graph.insert_node(name, location)
    }

    /// Add a road between two locations which are already on the map.
    pub fn record_road(&mut self, road: Road) -> Result<()> {
        if !(road.cost.is_finite() && road.cost >= 0.0) {
            return Err(MapError::InvalidCost(road.name, road.cost));
        }
        for endpoint in &[&road.origin, &road.destination] {
            if self.graph.get(endpoint).is_none() {
                return Err(MapError::UnknownLocation(endpoint.to_string()));
            }
        }

        self.graph
            .insert_edge(&road.origin, &road.destination, road.cost)
            .map_err(|_| MapError::UnknownLocation(road.origin.clone()))?;
        self.roads.push(road);
        Ok(())
    }

    pub fn find_location(&self, name: &str) -> Option<&Location> {
        self.graph.get(name)
    }

    /// Locations in the order they were recorded.
    pub fn locations(&self) -> impl Iterator<Item = &Location> + Clone {
        self.graph.nodes()
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    /// Roads leaving a location.
    pub fn roads_from<'m>(&'m self, name: &'m str) -> impl Iterator<Item = &'m Road> {
        self.roads.iter().filter(move |r| r.origin == name)
    }

    /// The extent of every location on the map.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_locations(self.graph.nodes())
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }
}

impl SearchSpace for StreetMap {
    type Location = Location;

    fn resolve(&self, name: &str) -> Option<Location> {
        self.find_location(name).cloned()
    }

    fn neighbors(&self, location: &Location) -> Vec<(Location, Cost)> {
        self.graph.neighbors(location)
    }

    fn locations(&self) -> Box<dyn Iterator<Item = &Location> + '_> {
        Box::new(self.graph.nodes())
    }
}

fn number(line: usize, text: &str) -> Result<f64> {
    text.parse().map_err(|e| MapError::InvalidNumber(line, e))
}

impl FromStr for StreetMap {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        lazy_static! {
            static ref LOCATION: Regex =
                Regex::new(r"^location\s+(?P<name>\S+)\s+(?P<lat>\S+)\s+(?P<lon>\S+)$").unwrap();
            static ref ROAD: Regex = Regex::new(
                r"^road\s+(?P<road>\S+)\s+(?P<origin>\S+)\s+(?P<destination>\S+)\s+(?P<cost>\S+)$"
            )
            .unwrap();
        };

        let mut map = StreetMap::new();
        for (i, line) in s.lines().enumerate() {
            let n = i + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(cap) = LOCATION.captures(line) {
                let location = Location::new(
                    &cap["name"],
                    number(n, &cap["lat"])?,
                    number(n, &cap["lon"])?,
                );
                if !map.record_location(location) {
                    return Err(MapError::DuplicateLocation(n, cap["name"].to_string()));
                }
            } else if let Some(cap) = ROAD.captures(line) {
                let road = Road::new(
                    &cap["road"],
                    &cap["origin"],
                    &cap["destination"],
                    number(n, &cap["cost"])?,
                );
                map.record_road(road)
                    .map_err(|e| MapError::InvalidRoad(n, Box::new(e)))?;
            } else {
                return Err(MapError::InvalidRecord(n, line.to_string()));
            }
        }

        debug!(
            locations = map.len(),
            roads = map.roads.len(),
            "loaded street map"
        );
        Ok(map)
    }
}
