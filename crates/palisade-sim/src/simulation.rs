//! Round driver: owns the roster and runs the two-phase rounds.

use palisade_cluster::{assign_followers, select_heads};
use palisade_roster::NodeRoster;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SimConfig;
use crate::error::Result;
use crate::report::{RoundReport, RoundSink};

/// Drives the clustering protocol over a single roster, round by round.
///
/// The simulation owns the roster and the random source. Each round lends
/// the roster `&mut` to head selection, then to follower assignment; no
/// component retains a reference between calls. A parallel batch run needs
/// one `Simulation` - and therefore one roster - per run.
pub struct Simulation {
    config: SimConfig,
    heads_per_round: u32,
    roster: NodeRoster,
    rng: StdRng,
    rounds_run: u32,
}

impl Simulation {
    /// Create a simulation from a validated configuration.
    ///
    /// Resolves the per-round head count up front so a bad configuration
    /// fails here instead of in round one.
    pub fn new(config: SimConfig) -> Result<Self> {
        let heads_per_round = config.resolved_heads()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        tracing::info!(
            nodes = config.total_nodes,
            rounds = config.round_count,
            heads = heads_per_round,
            seed = ?config.seed,
            "simulation configured"
        );

        Ok(Self {
            heads_per_round,
            roster: NodeRoster::new(config.total_nodes),
            rng,
            rounds_run: 0,
            config,
        })
    }

    /// The configuration this simulation was built from.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Resolved cluster heads per round.
    pub fn heads_per_round(&self) -> u32 {
        self.heads_per_round
    }

    /// Current roster state.
    pub fn roster(&self) -> &NodeRoster {
        &self.roster
    }

    /// Number of rounds completed so far.
    pub fn rounds_run(&self) -> u32 {
        self.rounds_run
    }

    /// Run one complete round and return its report.
    pub fn step(&mut self) -> Result<RoundReport> {
        let round = self.rounds_run + 1;
        tracing::debug!(round, heads = self.heads_per_round, "starting round");

        select_heads(&mut self.roster, self.heads_per_round as usize, &mut self.rng)?;
        assign_followers(&mut self.roster, &mut self.rng)?;

        debug_assert_eq!(
            self.roster.check_clustered(self.heads_per_round as usize),
            Ok(())
        );

        self.rounds_run = round;
        let report = RoundReport::from_roster(round, &self.roster);
        tracing::info!(
            round,
            clusters = report.cluster_sizes.len(),
            followers = report.follower_total(),
            "round complete"
        );

        Ok(report)
    }

    /// Run the configured number of rounds, handing each report to `sink`.
    ///
    /// Any error aborts the run immediately: continuing would let later
    /// rounds inherit a roster whose invariants no longer hold.
    pub fn run(&mut self, sink: &mut dyn RoundSink) -> Result<()> {
        for _ in 0..self.config.round_count {
            let report = self.step()?;
            sink.on_round(&report)?;
        }
        Ok(())
    }
}
