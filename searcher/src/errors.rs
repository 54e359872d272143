use thiserror::Error;

use crate::traits::Cost;

/// Error produced when a search cannot be carried out.
///
/// Running out of expansions or emptying the frontier is not an error,
/// see [crate::Termination].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Edge from {0} to {1} has an invalid cost: {2}")]
    InvalidCost(String, String, Cost),

    #[error("Attempted to pop from an empty frontier")]
    EmptyFrontier,
}

/// Result when a search method might fail.
pub type Result<T> = std::result::Result<T, SearchError>;
