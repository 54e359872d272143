//! A* search, guided by a heuristic learned from the roads explored.

use crate::algorithm::{informed_search, resolve, SearchOptions, SearchOutcome};
use crate::errors::Result;
use crate::frontier::Discipline;
use crate::heuristic::RoadRatioHeuristic;
use crate::traits::{SearchSpace, Spatial};

/// Perform an A* search using a fresh [RoadRatioHeuristic] aimed at the goal.
pub fn astar<S>(
    space: &S,
    start: &str,
    goal: &str,
    options: &SearchOptions,
) -> Result<SearchOutcome<S::Location>>
where
    S: SearchSpace,
    S::Location: Spatial,
{
    resolve(space, start)?;
    let destination = resolve(space, goal)?;
    let mut heuristic = RoadRatioHeuristic::new(destination);

    let options = SearchOptions {
        discipline: Discipline::Priority,
        ..*options
    };
    informed_search(space, start, goal, &options, &mut heuristic)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::search;
    use crate::errors::SearchError;
    use crate::graph::helpers::{name, Town};
    use crate::graph::Graph;

    /// A grid of towns, with horizontal roads costing 3 per unit and
    /// vertical roads costing 1 per unit.
    fn grid(size: usize) -> Graph<Town> {
        let mut graph = Graph::new();
        let id = |x: usize, y: usize| format!("{}{}", name(x), y);
        for x in 0..size {
            for y in 0..size {
                graph.insert_node(id(x, y), Town::new(id(x, y), x as f64, y as f64));
            }
        }
        for x in 0..size {
            for y in 0..size {
                if x + 1 < size {
                    graph
                        .insert_undirected_edge(&id(x, y), &id(x + 1, y), 3.0)
                        .unwrap();
                }
                if y + 1 < size {
                    graph
                        .insert_undirected_edge(&id(x, y), &id(x, y + 1), 1.0)
                        .unwrap();
                }
            }
        }
        graph
    }

    #[test]
    fn matches_uniform_cost() {
        let graph = grid(6);
        let options = SearchOptions::new(Discipline::Priority);

        for goal in &["F5", "C4", "A5", "E0"] {
            let guided = astar(&graph, "A0", goal, &options).unwrap();
            let uniform = search(&graph, "A0", goal, &options).unwrap();
            assert_eq!(guided.path_cost(), uniform.path_cost(), "to {}", goal);
        }
    }

    #[test]
    fn cost_matches_path() {
        let graph = grid(5);
        let outcome = astar(&graph, "A0", "E4", &SearchOptions::default()).unwrap();
        assert_eq!(outcome.path_cost(), Some(16.0));

        let path = outcome.path().unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(path[0].name, "A0");
        assert_eq!(path[8].name, "E4");
    }

    #[test]
    fn unknown_goal() {
        let graph = grid(2);
        assert_eq!(
            astar(&graph, "A0", "Z9", &SearchOptions::default()).unwrap_err(),
            SearchError::UnknownLocation("Z9".to_string())
        );
    }

    #[test]
    fn unknown_start_reported_first() {
        let graph = grid(2);
        let options = SearchOptions::default();
        let expected = SearchError::UnknownLocation("Y8".to_string());
        assert_eq!(astar(&graph, "Y8", "Z9", &options).unwrap_err(), expected);
        assert_eq!(search(&graph, "Y8", "Z9", &options).unwrap_err(), expected);
    }
}
