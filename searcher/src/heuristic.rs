//! Heuristics for informed search.

use crate::node::NodeRef;
use crate::traits::{Cost, SearchHeuristic, Spatial};

/// Estimates nothing remains. Admissible, but gives no guidance,
/// so a priority search degrades to uniform cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<L> SearchHeuristic<L> for ZeroHeuristic {
    fn estimate(&mut self, _node: NodeRef<'_, L>) -> Cost {
        0.0
    }
}

/// Straight line distance to the destination, scaled by a fixed
/// cost per unit distance.
///
/// Admissible as long as no edge is cheaper per unit distance than
/// `cost_per_distance`.
#[derive(Debug, Clone)]
pub struct StraightLineHeuristic<L> {
    destination: L,
    cost_per_distance: f64,
}

impl<L> StraightLineHeuristic<L> {
    pub fn new(destination: L, cost_per_distance: f64) -> Self {
        Self {
            destination,
            cost_per_distance,
        }
    }
}

impl<L> SearchHeuristic<L> for StraightLineHeuristic<L>
where
    L: Spatial,
{
    fn estimate(&mut self, node: NodeRef<'_, L>) -> Cost {
        node.location().straight_line_distance(&self.destination) * self.cost_per_distance
    }
}

const INITIAL_DAMPING: u32 = 10;

/// Learns the cheapest cost per unit distance from the roads it sees.
///
/// Every time a node is evaluated, the edge from its parent is sampled
/// and the smallest ratio of edge cost to straight line edge length is
/// kept. The estimate is the straight line distance to the destination
/// times that ratio, divided by a damping factor which starts at 10 and
/// drops by one per evaluation until it reaches 1. Early estimates are
/// therefore deliberately low, until enough roads have been seen for the
/// ratio to be trusted.
///
/// The running ratio belongs to this instance, so build a new one for
/// every search.
#[derive(Debug, Clone)]
pub struct RoadRatioHeuristic<L> {
    destination: L,
    best_ratio: Option<f64>,
    damping: u32,
}

impl<L> RoadRatioHeuristic<L> {
    pub fn new(destination: L) -> Self {
        Self {
            destination,
            best_ratio: None,
            damping: INITIAL_DAMPING,
        }
    }

    /// Smallest cost per unit distance observed so far.
    pub fn best_ratio(&self) -> Option<f64> {
        self.best_ratio
    }

    pub fn damping(&self) -> u32 {
        self.damping
    }

    fn sample(&mut self, cost: Cost, distance: f64) {
        // Zero length edges say nothing about cost per distance.
        if distance <= 0.0 {
            return;
        }
        let ratio = cost / distance;
        self.best_ratio = Some(match self.best_ratio {
            Some(best) => best.min(ratio),
            None => ratio,
        });
    }
}

impl<L> SearchHeuristic<L> for RoadRatioHeuristic<L>
where
    L: Spatial,
{
    fn estimate(&mut self, node: NodeRef<'_, L>) -> Cost {
        let parent = match node.parent() {
            Some(parent) => parent,
            None => return 0.0,
        };

        let edge_cost = node.path_cost() - parent.path_cost();
        let edge_distance = parent.location().straight_line_distance(node.location());
        self.sample(edge_cost, edge_distance);

        let remaining = node.location().straight_line_distance(&self.destination);
        let estimate = match self.best_ratio {
            Some(ratio) => remaining * ratio / f64::from(self.damping),
            None => 0.0,
        };

        if self.damping > 1 {
            self.damping -= 1;
        }

        estimate
    }
}
