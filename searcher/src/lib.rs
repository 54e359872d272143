//! Generalized state-space search, for finding routes between named
//! locations in a weighted graph.
//!
//! A single search loop drives breadth-first, depth-first and A* search.
//! Provide the graph by implementing [SearchSpace], and optionally guide
//! the search with a [SearchHeuristic].

pub mod algorithm;
mod errors;
pub mod frontier;
pub mod graph;
pub mod heuristic;
pub mod node;
mod traits;

pub use errors::Result as SearchResult;
pub use errors::SearchError;
pub use traits::Cost;
pub use traits::SearchHeuristic;
pub use traits::SearchSpace;
pub use traits::Spatial;

pub use algorithm::astar::astar;
pub use algorithm::basic::bfs;
pub use algorithm::basic::dfs;
pub use algorithm::{informed_search, search};
pub use algorithm::{SearchOptions, SearchOutcome, Termination};
pub use frontier::{Discipline, Frontier};
pub use node::{NodeId, NodeRef, SearchTree};
