pub use bfs::bfs;
pub use dfs::dfs;

mod bfs {
    use crate::algorithm::{search, SearchOptions, SearchOutcome};
    use crate::errors::Result;
    use crate::frontier::Discipline;
    use crate::SearchSpace;

    /// Breadth-first search, where siblings are visited in the order
    /// reported by [SearchSpace::neighbors].
    pub fn bfs<S>(
        space: &S,
        start: &str,
        goal: &str,
        limit: usize,
    ) -> Result<SearchOutcome<S::Location>>
    where
        S: SearchSpace,
    {
        let options = SearchOptions::new(Discipline::Fifo).with_limit(limit);
        search(space, start, goal, &options)
    }
}

mod dfs {
    use crate::algorithm::{search, SearchOptions, SearchOutcome};
    use crate::errors::Result;
    use crate::frontier::Discipline;
    use crate::SearchSpace;

    /// Depth-first search. The last neighbor reported by
    /// [SearchSpace::neighbors] is explored first.
    pub fn dfs<S>(
        space: &S,
        start: &str,
        goal: &str,
        limit: usize,
    ) -> Result<SearchOutcome<S::Location>>
    where
        S: SearchSpace,
    {
        let options = SearchOptions::new(Discipline::Lifo).with_limit(limit);
        search(space, start, goal, &options)
    }
}
