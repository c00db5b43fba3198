//! Error types for the simulator.

use thiserror::Error;

/// Result type for simulator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running a simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// A clustering round failed.
    #[error("clustering error: {0}")]
    Cluster(#[from] palisade_cluster::Error),

    /// Configuration is unusable (bad values, or a derived head count of
    /// zero). Fatal: there is no sensible degraded mode.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Report serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error from a report sink.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
