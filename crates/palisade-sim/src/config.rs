//! Simulation configuration.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for a simulation run.
///
/// Read once at startup; the core components only ever see the resolved
/// values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Total node population.
    pub total_nodes: u32,

    /// Number of rounds to run.
    pub round_count: u32,

    /// Cluster heads per round. `None` derives `total_nodes / 20`
    /// (integer floor).
    pub heads_per_round: Option<u32>,

    /// RNG seed for a reproducible run. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_nodes: 100,
            round_count: 10,
            heads_per_round: None,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Create config from environment variables, with defaults for anything
    /// unset: `PALISADE_NODES`, `PALISADE_ROUNDS`, `PALISADE_HEADS`,
    /// `PALISADE_SEED`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            total_nodes: env_var("PALISADE_NODES")?.unwrap_or(defaults.total_nodes),
            round_count: env_var("PALISADE_ROUNDS")?.unwrap_or(defaults.round_count),
            heads_per_round: env_var("PALISADE_HEADS")?,
            seed: env_var("PALISADE_SEED")?,
        })
    }

    /// Resolve the per-round head count, applying the default 1-in-20
    /// derivation and validating the result.
    ///
    /// A derived count of zero (population under 20 with no explicit head
    /// count) is rejected rather than silently selecting zero heads, which
    /// would break follower assignment in round one.
    pub fn resolved_heads(&self) -> Result<u32> {
        if self.total_nodes < 1 {
            return Err(Error::InvalidConfiguration(
                "total node count must be at least 1".into(),
            ));
        }

        let heads = self.heads_per_round.unwrap_or(self.total_nodes / 20);
        if heads < 1 {
            return Err(Error::InvalidConfiguration(format!(
                "derived head count is 0 for {} nodes; \
                 set an explicit head count or use at least 20 nodes",
                self.total_nodes
            )));
        }
        if heads > self.total_nodes {
            return Err(Error::InvalidConfiguration(format!(
                "{} cluster heads requested for {} nodes",
                heads, self.total_nodes
            )));
        }

        Ok(heads)
    }

    /// Validate the whole configuration without resolving anything.
    pub fn validate(&self) -> Result<()> {
        self.resolved_heads().map(|_| ())
    }
}

/// Read and parse one environment variable, `Ok(None)` when unset.
fn env_var<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_field(key, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_field<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e| {
        Error::InvalidConfiguration(format!("{key}={raw:?} cannot be parsed: {e}"))
    })
}
