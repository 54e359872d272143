//! Frontiers hold the nodes which are waiting to be expanded.

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::errors::{Result, SearchError};
use crate::node::{NodeId, NodeRef};
use crate::traits::Cost;

/// The order in which a [Frontier] releases its nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discipline {
    /// First in, first out. Gives a breadth-first search.
    Fifo,

    /// Last in, first out. Gives a depth-first search.
    Lifo,

    /// Lowest estimated total cost first. Gives A* when
    /// paired with a heuristic.
    Priority,
}

impl Default for Discipline {
    fn default() -> Self {
        Discipline::Fifo
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Discipline::Fifo => write!(f, "breadth-first"),
            Discipline::Lifo => write!(f, "depth-first"),
            Discipline::Priority => write!(f, "A*"),
        }
    }
}

/// Error when parsing a discipline from a string.
#[derive(Debug, thiserror::Error)]
#[error("Unknown search strategy: {0}")]
pub struct ParseDisciplineError(String);

impl FromStr for Discipline {
    type Err = ParseDisciplineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "fifo" | "breadth-first" => Ok(Discipline::Fifo),
            "dfs" | "lifo" | "depth-first" => Ok(Discipline::Lifo),
            "astar" | "a*" | "priority" => Ok(Discipline::Priority),
            _ => Err(ParseDisciplineError(s.to_string())),
        }
    }
}

#[derive(Debug)]
struct FrontierEntry<L> {
    node: NodeId,
    location: L,
    f_cost: Cost,
}

/// Pending search nodes, along with the locations they represent.
///
/// Nodes always leave from the front. The discipline decides where
/// they go in: FIFO pushes to the back, LIFO pushes to the front,
/// and priority keeps the entries sorted by f, with equal keys
/// kept in the order they were inserted.
#[derive(Debug)]
pub struct Frontier<L> {
    discipline: Discipline,
    entries: VecDeque<FrontierEntry<L>>,
    members: HashMap<L, usize>,
    high_water: usize,
}

impl<L> Frontier<L>
where
    L: Clone + Eq + Hash,
{
    pub fn new(discipline: Discipline) -> Self {
        Self {
            discipline,
            entries: VecDeque::new(),
            members: HashMap::new(),
            high_water: 0,
        }
    }

    /// Insert a node where this frontier's discipline puts it.
    pub fn push(&mut self, node: NodeRef<'_, L>) {
        match self.discipline {
            Discipline::Fifo => self.push_bottom(node),
            Discipline::Lifo => self.push_top(node),
            Discipline::Priority => self.push_sorted(node),
        }
    }

    /// Insert at the back, to be released last.
    pub fn push_bottom(&mut self, node: NodeRef<'_, L>) {
        let entry = self.entry(node);
        self.entries.push_back(entry);
        self.grew();
    }

    /// Insert at the front, to be released next.
    pub fn push_top(&mut self, node: NodeRef<'_, L>) {
        let entry = self.entry(node);
        self.entries.push_front(entry);
        self.grew();
    }

    /// Insert after every entry whose f is less than or equal to this one.
    pub fn push_sorted(&mut self, node: NodeRef<'_, L>) {
        let entry = self.entry(node);
        let index = self
            .entries
            .partition_point(|e| e.f_cost.total_cmp(&entry.f_cost) != Ordering::Greater);
        self.entries.insert(index, entry);
        self.grew();
    }

    /// Remove the node at the front.
    pub fn pop_front(&mut self) -> Result<NodeId> {
        let entry = self.entries.pop_front().ok_or(SearchError::EmptyFrontier)?;

        if let Some(count) = self.members.get_mut(&entry.location) {
            *count -= 1;
            if *count == 0 {
                self.members.remove(&entry.location);
            }
        }

        Ok(entry.node)
    }

    /// Is there a node for this location waiting in the frontier?
    pub fn contains(&self, location: &L) -> bool {
        self.members.contains_key(location)
    }

    /// The node for this location nearest the front, if any.
    pub fn find(&self, location: &L) -> Option<NodeId> {
        if !self.contains(location) {
            return None;
        }
        self.entries
            .iter()
            .find(|e| &e.location == location)
            .map(|e| e.node)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Largest number of nodes held at once.
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    fn entry(&mut self, node: NodeRef<'_, L>) -> FrontierEntry<L> {
        let location = node.location().clone();
        *self.members.entry(location.clone()).or_insert(0) += 1;
        FrontierEntry {
            node: node.id(),
            location,
            f_cost: node.f_cost(),
        }
    }

    fn grew(&mut self) {
        self.high_water = self.high_water.max(self.entries.len());
    }
}
