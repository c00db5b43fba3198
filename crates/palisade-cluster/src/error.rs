//! Error types for the clustering protocol.

use thiserror::Error;

/// Result type for clustering operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a clustering round.
///
/// Both variants are fatal to the run. They are raised before any roster
/// mutation, so the roster is unchanged when one is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Requested head count is outside `[1, nodes]`.
    #[error("invalid configuration: {heads} cluster heads requested for {nodes} nodes")]
    InvalidConfiguration { heads: usize, nodes: usize },

    /// Follower assignment ran with zero cluster heads - head selection
    /// must run first each round.
    #[error("no cluster heads available; head selection must run first")]
    NoClusterHeads,
}
