//! An in-memory weighted, directed graph of named nodes.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::errors::{Result, SearchError};
use crate::traits::{Cost, SearchSpace};

#[derive(Debug, Clone, Copy)]
struct WeightedEdge {
    destination: usize,
    cost: Cost,
}

/// Adjacency list graph, where each node is known by a unique name.
///
/// Outgoing edges are reported in the order they were inserted.
#[derive(Debug, Clone)]
pub struct Graph<N> {
    nodes: Vec<N>,
    names: HashMap<String, usize>,
    index: HashMap<N, usize>,
    edges: Vec<Vec<WeightedEdge>>,
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            names: HashMap::new(),
            index: HashMap::new(),
            edges: Vec::new(),
        }
    }
}

impl<N> Graph<N>
where
    N: Debug + Clone + Hash + Eq,
{
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node under this name.
    ///
    /// Returns false, leaving the graph unchanged, when the name or
    /// the node is already present.
    pub fn insert_node<S: Into<String>>(&mut self, name: S, node: N) -> bool {
        let name = name.into();
        if self.names.contains_key(&name) || self.index.contains_key(&node) {
            return false;
        }

        let i = self.nodes.len();
        self.names.insert(name, i);
        self.index.insert(node.clone(), i);
        self.nodes.push(node);
        self.edges.push(Vec::new());
        true
    }

    /// Add a one-way edge between two named nodes.
    ///
    /// Costs must be finite and non-negative.
    pub fn insert_edge(&mut self, origin: &str, destination: &str, cost: Cost) -> Result<()> {
        let o = self.lookup(origin)?;
        let d = self.lookup(destination)?;
        if !(cost.is_finite() && cost >= 0.0) {
            return Err(SearchError::InvalidCost(
                origin.to_string(),
                destination.to_string(),
                cost,
            ));
        }
        self.edges[o].push(WeightedEdge {
            destination: d,
            cost,
        });
        Ok(())
    }

    /// Add edges in both directions between two named nodes.
    pub fn insert_undirected_edge(
        &mut self,
        origin: &str,
        destination: &str,
        cost: Cost,
    ) -> Result<()> {
        self.insert_edge(origin, destination, cost)?;
        self.insert_edge(destination, origin, cost)
    }

    fn lookup(&self, name: &str) -> Result<usize> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| SearchError::UnknownLocation(name.to_string()))
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    pub fn get(&self, name: &str) -> Option<&N> {
        self.names.get(name).map(|&i| &self.nodes[i])
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + Clone {
        self.nodes.iter()
    }

    /// Total number of one-way edges.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(|e| e.len()).sum()
    }

    /// Iterate through the edges leaving this node.
    ///
    /// Nodes which are not in the graph have no edges.
    pub fn edges<'g>(&'g self, node: &N) -> impl Iterator<Item = (&'g N, Cost)> + 'g {
        self.index
            .get(node)
            .map(|&i| self.edges[i].as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |e| (&self.nodes[e.destination], e.cost))
    }
}

impl<N> SearchSpace for Graph<N>
where
    N: Debug + Clone + Hash + Eq,
{
    type Location = N;

    fn resolve(&self, name: &str) -> Option<N> {
        self.get(name).cloned()
    }

    fn neighbors(&self, location: &N) -> Vec<(N, Cost)> {
        self.edges(location).map(|(n, c)| (n.clone(), c)).collect()
    }

    fn locations(&self) -> Box<dyn Iterator<Item = &N> + '_> {
        Box::new(self.nodes())
    }
}


#[cfg(test)]
mod test {
    use super::helpers::*;
    use super::*;

    #[test]
    fn insert() {
        let mut graph = Graph::new();
        assert!(graph.insert_node("A", Town::new("A", 0.0, 0.0)));
        assert!(!graph.insert_node("A", Town::new("A", 1.0, 1.0)));
        assert!(graph.insert_node("B", Town::new("B", 1.0, 0.0)));
        assert_eq!(graph.len(), 2);

        graph.insert_edge("A", "B", 3.0).unwrap();
        assert_eq!(
            graph.insert_edge("A", "Q", 1.0),
            Err(SearchError::UnknownLocation("Q".to_string()))
        );
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn invalid_costs() {
        let mut graph = line(&[1.0]);
        assert_eq!(
            graph.insert_edge("A", "B", -1.0),
            Err(SearchError::InvalidCost(
                "A".to_string(),
                "B".to_string(),
                -1.0
            ))
        );
        assert!(matches!(
            graph.insert_edge("B", "A", f64::NAN),
            Err(SearchError::InvalidCost(_, _, _))
        ));
        assert!(graph.insert_undirected_edge("A", "B", f64::INFINITY).is_err());
        assert_eq!(graph.edge_count(), 2);

        graph.insert_edge("A", "B", 0.0).unwrap();
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn neighbors() {
        let graph = line(&[1.0, 2.0]);
        let b = graph.resolve("B").unwrap();
        let neighbors: Vec<_> = graph
            .neighbors(&b)
            .into_iter()
            .map(|(t, c)| (t.name, c))
            .collect();
        assert_eq!(
            neighbors,
            vec![("A".to_string(), 1.0), ("C".to_string(), 2.0)]
        );

        let stranger = Town::new("Z", 0.0, 0.0);
        assert!(graph.neighbors(&stranger).is_empty());
        assert!(!graph.contains_node(&stranger));
    }

    #[test]
    fn locations() {
        let graph = line(&[1.0, 1.0]);
        let names: Vec<_> = graph.locations().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(graph.resolve("D").is_none());
    }
}
