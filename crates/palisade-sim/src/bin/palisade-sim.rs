//! Clustering simulator binary.
//!
//! Runs the configured number of clustering rounds and prints each round's
//! roster and cluster sizes. Configuration comes from `PALISADE_*`
//! environment variables, overridden by positional arguments:
//!
//! ```text
//! palisade-sim [nodes] [rounds] [heads] [seed]
//! ```

use std::env;

use palisade_roster::NodeState;
use palisade_sim::{Result, RoundReport, RoundSink, SimConfig, Simulation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Sink that prints each round as a text table. Display only - the core
/// never formats anything itself.
struct TextSink;

impl RoundSink for TextSink {
    fn on_round(&mut self, report: &RoundReport) -> Result<()> {
        println!("Round {}:", report.round);
        for record in &report.nodes {
            let state = match record.state {
                NodeState::Follower => "Follower",
                NodeState::ClusterHead => "ClusterHead",
            };
            println!(
                "  node {:>4}  {:<11}  cluster {}",
                record.id.value(),
                state,
                record.cluster
            );
        }

        println!("  followers by cluster:");
        for (head, size) in &report.cluster_sizes {
            println!("    head {:>4}  {:>4} members", head.value(), size);
        }
        println!();
        Ok(())
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "palisade_sim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = SimConfig::from_env()?;

    // Positional overrides: [nodes] [rounds] [heads] [seed]
    let args: Vec<String> = env::args().skip(1).collect();
    if let Some(nodes) = args.first() {
        config.total_nodes = nodes.parse()?;
    }
    if let Some(rounds) = args.get(1) {
        config.round_count = rounds.parse()?;
    }
    if let Some(heads) = args.get(2) {
        config.heads_per_round = Some(heads.parse()?);
    }
    if let Some(seed) = args.get(3) {
        config.seed = Some(seed.parse()?);
    }

    let mut sim = Simulation::new(config)?;
    println!(
        "Palisade clustering: {} nodes, {} rounds, {} heads per round",
        sim.config().total_nodes,
        sim.config().round_count,
        sim.heads_per_round()
    );
    println!();

    sim.run(&mut TextSink)?;

    Ok(())
}
