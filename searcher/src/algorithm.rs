//! The search loop shared by every strategy.
//!
//! Breadth-first, depth-first and A* differ only in the [Discipline]
//! of the frontier and in whether a heuristic is supplied.

use std::collections::HashSet;
use std::default::Default;

use tracing::{debug, trace};

use crate::errors::{Result, SearchError};
use crate::frontier::{Discipline, Frontier};
use crate::heuristic::ZeroHeuristic;
use crate::node::{NodeId, NodeRef, SearchTree};
use crate::traits::{Cost, SearchHeuristic, SearchSpace};

pub(crate) mod astar;
pub(crate) mod basic;

/// Expansion limit used when none is given.
pub const DEFAULT_EXPANSION_LIMIT: usize = 10_000;

const PROGRESS_INTERVAL: usize = 10_000;

/// Settings which control a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// The most nodes which may be expanded before giving up.
    pub expansion_limit: usize,

    /// Skip locations which have already been expanded or
    /// are already waiting in the frontier.
    pub repeated_state_checking: bool,

    pub discipline: Discipline,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new(Discipline::default())
    }
}

impl SearchOptions {
    pub fn new(discipline: Discipline) -> Self {
        Self {
            expansion_limit: DEFAULT_EXPANSION_LIMIT,
            repeated_state_checking: true,
            discipline,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.expansion_limit = limit;
        self
    }

    pub fn with_repeated_state_checking(mut self, enabled: bool) -> Self {
        self.repeated_state_checking = enabled;
        self
    }
}

/// How a search came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The goal was popped from the frontier.
    Succeeded,

    /// The frontier ran out of nodes.
    Exhausted,

    /// The expansion limit was reached first.
    LimitReached,
}

#[derive(Debug)]
struct ExpansionLimit {
    current: usize,
    maximum: usize,
}

impl ExpansionLimit {
    fn new(limit: usize) -> Self {
        Self {
            current: 0,
            maximum: limit,
        }
    }

    fn increment(&mut self) {
        self.current += 1;
    }

    fn is_reached(&self) -> bool {
        self.current >= self.maximum
    }
}

/// Everything a finished search knows.
///
/// Owns the search tree, so the solution path stays available
/// for as long as the outcome is kept.
#[derive(Debug)]
pub struct SearchOutcome<L> {
    tree: SearchTree<L>,
    goal: Option<NodeId>,
    expansions: usize,
    termination: Termination,
    high_water: usize,
}

impl<L> SearchOutcome<L> {
    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn is_success(&self) -> bool {
        self.goal.is_some()
    }

    /// Number of nodes expanded during the search.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// The goal node, when one was found.
    pub fn solution(&self) -> Option<NodeRef<'_, L>> {
        self.goal.map(|id| self.tree.get(id))
    }

    /// Locations from start to goal.
    pub fn path(&self) -> Option<Vec<&L>> {
        self.solution().map(|n| n.path())
    }

    pub fn path_cost(&self) -> Option<Cost> {
        self.solution().map(|n| n.path_cost())
    }

    pub fn tree(&self) -> &SearchTree<L> {
        &self.tree
    }

    /// Largest number of nodes waiting in the frontier at once.
    pub fn frontier_high_water(&self) -> usize {
        self.high_water
    }
}

/// Search without a heuristic.
pub fn search<S>(
    space: &S,
    start: &str,
    goal: &str,
    options: &SearchOptions,
) -> Result<SearchOutcome<S::Location>>
where
    S: SearchSpace,
{
    run(space, start, goal, options, None::<&mut ZeroHeuristic>)
}

/// Search with a heuristic, which is evaluated once for every node created.
///
/// The heuristic should be fresh: any running state it keeps carries
/// over between searches.
pub fn informed_search<S, H>(
    space: &S,
    start: &str,
    goal: &str,
    options: &SearchOptions,
    heuristic: &mut H,
) -> Result<SearchOutcome<S::Location>>
where
    S: SearchSpace,
    H: SearchHeuristic<S::Location> + ?Sized,
{
    run(space, start, goal, options, Some(heuristic))
}

fn resolve<S: SearchSpace>(space: &S, name: &str) -> Result<S::Location> {
    space
        .resolve(name)
        .ok_or_else(|| SearchError::UnknownLocation(name.to_string()))
}

fn run<S, H>(
    space: &S,
    start: &str,
    goal: &str,
    options: &SearchOptions,
    mut heuristic: Option<&mut H>,
) -> Result<SearchOutcome<S::Location>>
where
    S: SearchSpace,
    H: SearchHeuristic<S::Location> + ?Sized,
{
    let origin = resolve(space, start)?;
    let destination = resolve(space, goal)?;

    let mut tree = SearchTree::with_root(origin, heuristic.as_deref_mut());
    let mut frontier = Frontier::new(options.discipline);
    frontier.push(tree.get(tree.root()));

    let mut visited = HashSet::new();
    let mut limit = ExpansionLimit::new(options.expansion_limit);

    let termination = loop {
        if frontier.is_empty() {
            break Termination::Exhausted;
        }
        if limit.is_reached() {
            break Termination::LimitReached;
        }

        let id = frontier.pop_front()?;
        let node = tree.get(id);

        // A cheaper copy of this location was already expanded, the
        // stale one left behind in the frontier is skipped.
        if !visited.insert(node.location().clone()) && options.repeated_state_checking {
            trace!(node = %id, "skipping already expanded location");
            continue;
        }

        if node.location() == &destination {
            debug!(
                strategy = %options.discipline,
                expansions = limit.current,
                cost = node.path_cost(),
                "found goal"
            );
            return Ok(SearchOutcome {
                high_water: frontier.high_water(),
                tree,
                goal: Some(id),
                expansions: limit.current,
                termination: Termination::Succeeded,
            });
        }

        let children = tree.expand(id, space, heuristic.as_deref_mut()).to_vec();
        limit.increment();
        trace!(node = %id, children = children.len(), "expanded");

        if limit.current % PROGRESS_INTERVAL == 0 {
            debug!(
                expansions = limit.current,
                frontier = frontier.len(),
                visited = visited.len(),
                "searching"
            );
        }

        for child in children {
            if admit(&tree, &frontier, &visited, options, child) {
                frontier.push(tree.get(child));
            }
        }
    };

    debug!(
        strategy = %options.discipline,
        expansions = limit.current,
        ?termination,
        "no path found"
    );
    Ok(SearchOutcome {
        high_water: frontier.high_water(),
        tree,
        goal: None,
        expansions: limit.current,
        termination,
    })
}

/// Should this freshly created child go into the frontier?
fn admit<L>(
    tree: &SearchTree<L>,
    frontier: &Frontier<L>,
    visited: &HashSet<L>,
    options: &SearchOptions,
    child: NodeId,
) -> bool
where
    L: Clone + Eq + std::hash::Hash,
{
    if !options.repeated_state_checking {
        return true;
    }

    let node = tree.get(child);
    if visited.contains(node.location()) {
        return false;
    }

    match frontier.find(node.location()) {
        None => true,

        // Only a priority frontier can make use of a cheaper path to a
        // pending location. The worse entry is left where it is.
        Some(existing) => {
            options.discipline == Discipline::Priority
                && node.f_cost() <= tree.get(existing).f_cost()
        }
    }
}
