//! Palisade Clustering Simulator
//!
//! Round driver for the clustering protocol: owns the node roster, runs
//! head selection and follower assignment the configured number of times,
//! and hands a [`RoundReport`] to a [`RoundSink`] after each round.
//!
//! # Architecture
//!
//! - **Config**: node population, round count, heads per round (default
//!   1-in-20), RNG seed
//! - **Simulation**: the round loop; single-threaded, roster lent `&mut`
//!   to one phase at a time
//! - **Reports**: roster snapshot plus follower counts grouped by cluster;
//!   formatting belongs to the sink, never the core
//!
//! # Usage
//!
//! ```
//! use palisade_sim::{MemorySink, SimConfig, Simulation};
//!
//! let config = SimConfig {
//!     seed: Some(42),
//!     ..SimConfig::default()
//! };
//! let mut sink = MemorySink::default();
//! let mut sim = Simulation::new(config)?;
//! sim.run(&mut sink)?;
//!
//! assert_eq!(sink.reports.len(), 10);
//! # Ok::<(), palisade_sim::Error>(())
//! ```

mod config;
mod error;
mod report;
mod simulation;

pub use config::SimConfig;
pub use error::{Error, Result};
pub use report::{JsonLinesSink, MemorySink, RoundReport, RoundSink};
pub use simulation::Simulation;
