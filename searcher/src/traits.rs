use std::fmt::Debug;
use std::hash::Hash;

use crate::node::NodeRef;

/// Cost of traversing an edge, or an accumulated path cost.
pub type Cost = f64;

/// Provides the graph which a search explores.
///
/// Implementors own the locations and their connections, the
/// search engine only ever reads from them.
pub trait SearchSpace {
    type Location: Debug + Clone + Eq + Hash;

    /// Find the location with this name, if there is one.
    fn resolve(&self, name: &str) -> Option<Self::Location>;

    /// Outgoing edges from a location, along with the cost
    /// to traverse each one. Costs must be non-negative.
    fn neighbors(&self, location: &Self::Location) -> Vec<(Self::Location, Cost)>;

    /// Every location known to this space.
    fn locations(&self) -> Box<dyn Iterator<Item = &Self::Location> + '_>;
}

/// Locations which can measure how far apart they are.
pub trait Spatial {
    fn straight_line_distance(&self, other: &Self) -> f64;
}

/// An estimate of the remaining cost from a node to a fixed destination.
///
/// Heuristics may keep running statistics, so a fresh heuristic
/// should be built for each search. The node is only available
/// through a read-only view.
pub trait SearchHeuristic<L> {
    fn estimate(&mut self, node: NodeRef<'_, L>) -> Cost;
}
