//! Per-round reports for the external display layer.
//!
//! The core never formats or prints anything itself. After each round it
//! builds a [`RoundReport`] - the full roster plus the follower-count
//! aggregate - and hands it to whatever [`RoundSink`] the caller supplied.

use std::collections::BTreeMap;
use std::io::Write;

use palisade_roster::{ClusterId, NodeId, NodeRecord, NodeRoster, NodeState};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Snapshot of one completed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    /// 1-based round number.
    pub round: u32,

    /// Copy of every node record at the end of the round, in ID order.
    pub nodes: Vec<NodeRecord>,

    /// Member count per cluster head, the head itself included. BTreeMap
    /// keeps the grouping deterministically ordered by head ID.
    pub cluster_sizes: BTreeMap<NodeId, usize>,
}

impl RoundReport {
    /// Build a report from the roster state at the end of a round.
    pub fn from_roster(round: u32, roster: &NodeRoster) -> Self {
        let mut cluster_sizes = BTreeMap::new();
        for record in roster.iter() {
            if let ClusterId::Head(head) = record.cluster {
                *cluster_sizes.entry(head).or_insert(0) += 1;
            }
        }

        Self {
            round,
            nodes: roster.records().to_vec(),
            cluster_sizes,
        }
    }

    /// Number of followers this round.
    pub fn follower_total(&self) -> usize {
        self.nodes
            .iter()
            .filter(|r| r.state == NodeState::Follower)
            .count()
    }

    /// IDs of every member of `head`'s cluster, the head first, followers
    /// in ID order. Empty if `head` led no cluster this round.
    pub fn members_of(&self, head: NodeId) -> Vec<NodeId> {
        let mut members: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|r| r.cluster == ClusterId::Head(head))
            .map(|r| r.id)
            .collect();
        members.sort_by_key(|&id| (id != head, id));
        members
    }
}

/// Consumer of per-round reports - the seam between the core and any
/// display or logging layer.
pub trait RoundSink {
    /// Called once after each completed round.
    fn on_round(&mut self, report: &RoundReport) -> Result<()>;
}

/// Sink that keeps every report in memory. Mostly useful in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// All reports received so far, in round order.
    pub reports: Vec<RoundReport>,
}

impl RoundSink for MemorySink {
    fn on_round(&mut self, report: &RoundReport) -> Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }
}

/// Sink that writes one JSON object per round to a writer.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer. Each round becomes one newline-terminated JSON line.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RoundSink for JsonLinesSink<W> {
    fn on_round(&mut self, report: &RoundReport) -> Result<()> {
        serde_json::to_writer(&mut self.writer, report)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palisade_cluster::run_round;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn clustered_roster(n: u32, k: usize, seed: u64) -> NodeRoster {
        let mut roster = NodeRoster::new(n);
        run_round(&mut roster, k, &mut StdRng::seed_from_u64(seed)).unwrap();
        roster
    }

    #[test]
    fn cluster_sizes_cover_population() {
        let roster = clustered_roster(100, 5, 31);
        let report = RoundReport::from_roster(1, &roster);

        assert_eq!(report.cluster_sizes.len(), 5);
        assert_eq!(report.cluster_sizes.values().sum::<usize>(), 100);
        assert_eq!(report.follower_total(), 95);

        // Every group key is a head, and every size counts the head itself.
        for (&head, &size) in &report.cluster_sizes {
            assert!(roster[head].is_head());
            assert!(size >= 1);
        }
    }

    #[test]
    fn members_listed_head_first() {
        let roster = clustered_roster(30, 2, 32);
        let report = RoundReport::from_roster(1, &roster);

        for &head in report.cluster_sizes.keys() {
            let members = report.members_of(head);
            assert_eq!(members.len(), report.cluster_sizes[&head]);
            assert_eq!(members[0], head);
            // Followers in ascending ID order after the head.
            assert!(members[1..].windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn members_of_unknown_head_is_empty() {
        let roster = clustered_roster(10, 2, 33);
        let report = RoundReport::from_roster(1, &roster);

        let non_head = report
            .nodes
            .iter()
            .find(|r| !r.is_head())
            .map(|r| r.id)
            .unwrap();
        assert!(report.members_of(non_head).is_empty());
    }

    #[test]
    fn report_serialization_roundtrip() {
        let roster = clustered_roster(10, 2, 34);
        let report = RoundReport::from_roster(3, &roster);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"round\":3"));

        let parsed: RoundReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn json_lines_sink_writes_one_line_per_round() {
        let mut sink = JsonLinesSink::new(Vec::new());
        for round in 1..=3 {
            let roster = clustered_roster(20, 1, round as u64);
            sink.on_round(&RoundReport::from_roster(round, &roster))
                .unwrap();
        }

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);

        for (i, line) in lines.iter().enumerate() {
            let report: RoundReport = serde_json::from_str(line).unwrap();
            assert_eq!(report.round, i as u32 + 1);
        }
    }
}
