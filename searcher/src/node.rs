//! Search tree nodes.
//!
//! The tree is stored as an arena owned by a single search run. Parents
//! are referenced by [NodeId], so ownership only flows from the tree to
//! its nodes and there are no reference cycles between parents and children.

use std::fmt;

use crate::traits::{Cost, SearchHeuristic, SearchSpace};

/// Index of a node within its [SearchTree].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct SearchNode<L> {
    location: L,
    parent: Option<NodeId>,

    // None until the node has been expanded.
    children: Option<Vec<NodeId>>,
    path_cost: Cost,
    heuristic_value: Option<Cost>,
    depth: usize,
}

/// All of the nodes created during one search.
#[derive(Debug, Clone)]
pub struct SearchTree<L> {
    nodes: Vec<SearchNode<L>>,
}

impl<L> SearchTree<L>
where
    L: Clone,
{
    /// Start a new tree at this location.
    ///
    /// When a heuristic is given, the root is evaluated immediately.
    pub fn with_root<H>(location: L, heuristic: Option<&mut H>) -> Self
    where
        H: SearchHeuristic<L> + ?Sized,
    {
        let mut tree = SearchTree { nodes: Vec::new() };
        tree.insert(location, None, 0.0, heuristic);
        tree
    }

    fn insert<H>(
        &mut self,
        location: L,
        parent: Option<NodeId>,
        path_cost: Cost,
        heuristic: Option<&mut H>,
    ) -> NodeId
    where
        H: SearchHeuristic<L> + ?Sized,
    {
        let id = NodeId(self.nodes.len());
        let depth = parent.map(|p| self.nodes[p.0].depth + 1).unwrap_or(0);
        self.nodes.push(SearchNode {
            location,
            parent,
            children: None,
            path_cost,
            heuristic_value: None,
            depth,
        });

        // The heuristic only ever sees a read-only view, and each node
        // is evaluated exactly once.
        if let Some(h) = heuristic {
            let value = h.estimate(self.get(id));
            self.nodes[id.0].heuristic_value = Some(value);
        }
        id
    }

    /// Materialize the children of a node from the outgoing edges
    /// of its location.
    ///
    /// # Panics
    ///
    /// A node may only be expanded once per search.
    pub fn expand<S, H>(&mut self, id: NodeId, space: &S, mut heuristic: Option<&mut H>) -> &[NodeId]
    where
        S: SearchSpace<Location = L>,
        H: SearchHeuristic<L> + ?Sized,
    {
        let node = &self.nodes[id.0];
        assert!(node.children.is_none(), "{} has already been expanded", id);

        let location = node.location.clone();
        let path_cost = node.path_cost;

        let mut children = Vec::new();
        for (neighbor, cost) in space.neighbors(&location) {
            debug_assert!(cost >= 0.0, "negative edge cost {}", cost);
            children.push(self.insert(
                neighbor,
                Some(id),
                path_cost + cost,
                heuristic.as_deref_mut(),
            ));
        }

        self.nodes[id.0].children.insert(children)
    }
}

impl<L> SearchTree<L> {
    /// The node every other node descends from.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> NodeRef<'_, L> {
        assert!(id.0 < self.nodes.len(), "{} is not in this tree", id);
        NodeRef { tree: self, id }
    }

    /// Locations from the root down to this node.
    pub fn path(&self, id: NodeId) -> Vec<&L> {
        let mut path: Vec<&L> = self.ancestry(id).map(|n| n.location()).collect();
        path.reverse();
        path
    }

    /// Walk from a node back up to the root.
    pub fn ancestry(&self, id: NodeId) -> Ancestry<'_, L> {
        Ancestry {
            tree: self,
            next: Some(id),
        }
    }
}

/// Read-only view of a single node in a [SearchTree].
pub struct NodeRef<'t, L> {
    tree: &'t SearchTree<L>,
    id: NodeId,
}

impl<'t, L> Clone for NodeRef<'t, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'t, L> Copy for NodeRef<'t, L> {}

impl<'t, L> NodeRef<'t, L> {
    fn node(&self) -> &'t SearchNode<L> {
        &self.tree.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn location(&self) -> &'t L {
        &self.node().location
    }

    /// Accumulated edge cost from the root (g).
    pub fn path_cost(&self) -> Cost {
        self.node().path_cost
    }

    /// Heuristic estimate of the remaining cost (h), when one was used.
    pub fn heuristic_value(&self) -> Option<Cost> {
        self.node().heuristic_value
    }

    /// Estimated total cost through this node (f = g + h).
    pub fn f_cost(&self) -> Cost {
        self.path_cost() + self.heuristic_value().unwrap_or(0.0)
    }

    /// Number of edges between the root and this node.
    pub fn depth(&self) -> usize {
        self.node().depth
    }

    pub fn parent(&self) -> Option<NodeRef<'t, L>> {
        self.node().parent.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    /// Children created by expansion. Empty until the node is expanded.
    pub fn children(&self) -> &'t [NodeId] {
        self.node().children.as_deref().unwrap_or(&[])
    }

    pub fn is_expanded(&self) -> bool {
        self.node().children.is_some()
    }

    /// Locations from the root down to this node.
    pub fn path(&self) -> Vec<&'t L> {
        self.tree.path(self.id)
    }
}

impl<'t, L> fmt::Debug for NodeRef<'t, L>
where
    L: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("location", self.location())
            .field("path_cost", &self.path_cost())
            .field("heuristic_value", &self.heuristic_value())
            .finish()
    }
}

/// Iterator from a node up through its parents.
pub struct Ancestry<'t, L> {
    tree: &'t SearchTree<L>,
    next: Option<NodeId>,
}

impl<'t, L> Iterator for Ancestry<'t, L> {
    type Item = NodeRef<'t, L>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.get(self.next?);
        self.next = node.node().parent;
        Some(node)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::helpers::{line, Town};
    use crate::heuristic::ZeroHeuristic;
    use crate::SearchSpace;

    struct Recorder {
        seen: Vec<(String, Cost, Option<String>)>,
    }

    impl SearchHeuristic<Town> for Recorder {
        fn estimate(&mut self, node: NodeRef<'_, Town>) -> Cost {
            self.seen.push((
                node.location().name.clone(),
                node.path_cost(),
                node.parent().map(|p| p.location().name.clone()),
            ));
            1.5
        }
    }

    #[test]
    fn root() {
        let graph = line(&[1.0, 1.0]);
        let a = graph.resolve("A").unwrap();
        let tree = SearchTree::with_root(a.clone(), None::<&mut ZeroHeuristic>);

        let root = tree.get(tree.root());
        assert_eq!(root.location(), &a);
        assert_eq!(root.path_cost(), 0.0);
        assert_eq!(root.heuristic_value(), None);
        assert_eq!(root.depth(), 0);
        assert!(root.parent().is_none());
        assert!(root.children().is_empty());
        assert!(!root.is_expanded());
    }

    #[test]
    fn expand_accumulates_cost() {
        let graph = line(&[2.0, 3.0]);
        let mut tree = SearchTree::with_root(graph.resolve("A").unwrap(), None::<&mut ZeroHeuristic>);

        let b = tree.expand(tree.root(), &graph, None::<&mut ZeroHeuristic>)[0];
        let children = tree.expand(b, &graph, None::<&mut ZeroHeuristic>).to_vec();

        // B connects back to A and on to C
        assert_eq!(children.len(), 2);
        let c = children
            .iter()
            .map(|&id| tree.get(id))
            .find(|n| n.location().name == "C")
            .unwrap();
        assert_eq!(c.path_cost(), 5.0);
        assert_eq!(c.depth(), 2);
        assert_eq!(
            c.path().iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            vec!["A", "B", "C"]
        );
        assert!(tree.get(tree.root()).is_expanded());
    }

    #[test]
    fn heuristic_sees_parent_once() {
        let graph = line(&[1.0, 1.0]);
        let mut recorder = Recorder { seen: Vec::new() };
        let mut tree = SearchTree::with_root(graph.resolve("A").unwrap(), Some(&mut recorder));
        let children = tree
            .expand(tree.root(), &graph, Some(&mut recorder))
            .to_vec();

        assert_eq!(
            recorder.seen,
            vec![
                ("A".to_string(), 0.0, None),
                ("B".to_string(), 1.0, Some("A".to_string()))
            ]
        );
        let b = tree.get(children[0]);
        assert_eq!(b.heuristic_value(), Some(1.5));
        assert_eq!(b.f_cost(), 2.5);
    }

    #[test]
    #[should_panic]
    fn expand_twice() {
        let graph = line(&[1.0]);
        let mut tree = SearchTree::with_root(graph.resolve("A").unwrap(), None::<&mut ZeroHeuristic>);
        tree.expand(tree.root(), &graph, None::<&mut ZeroHeuristic>);
        tree.expand(tree.root(), &graph, None::<&mut ZeroHeuristic>);
    }

    #[test]
    fn ancestry() {
        let graph = line(&[1.0, 1.0, 1.0]);
        let mut tree = SearchTree::with_root(graph.resolve("A").unwrap(), None::<&mut ZeroHeuristic>);
        let b = tree.expand(tree.root(), &graph, None::<&mut ZeroHeuristic>)[0];
        let c = tree.expand(b, &graph, None::<&mut ZeroHeuristic>)[1];

        let names: Vec<_> = tree
            .ancestry(c)
            .map(|n| n.location().name.clone())
            .collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }
}
