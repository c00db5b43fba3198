//! Palisade Clustering Protocol
//!
//! The per-round clustering algorithm for a fixed sensor-node population:
//! elect a subset of nodes as cluster heads, then attach every remaining
//! node to exactly one head.
//!
//! # Round Structure
//!
//! One round is two phases run back to back against a shared
//! [`NodeRoster`](palisade_roster::NodeRoster):
//!
//! 1. **Head selection** ([`select_heads`]): unconditionally reset every
//!    node, then draw exactly `k` heads uniformly without replacement.
//! 2. **Follower assignment** ([`assign_followers`]): attach every follower
//!    to one head, drawn uniformly and independently per follower.
//!
//! Rounds are fully independent - selection has no memory, and the reset
//! phase discards every prior-round assignment.
//!
//! # Randomness
//!
//! Both phases take `&mut impl Rng`. Callers own the random source; a
//! seeded `StdRng` makes a whole run reproducible, which is how the tests
//! pin down outcomes.
//!
//! # Failure
//!
//! Both phases validate their preconditions before touching the roster, so
//! a failed call leaves the roster exactly as it was. Errors mean the run
//! is misconfigured or mis-sequenced and should abort; skipping a failed
//! round would let later rounds run against a roster whose invariants no
//! longer hold.

mod assign;
mod error;
mod select;

pub use assign::assign_followers;
pub use error::{Error, Result};
pub use select::select_heads;

use palisade_roster::NodeRoster;
use rand::Rng;

/// Run one complete round: head selection followed by follower assignment.
pub fn run_round<R: Rng + ?Sized>(roster: &mut NodeRoster, k: usize, rng: &mut R) -> Result<()> {
    select_heads(roster, k, rng)?;
    assign_followers(roster, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use palisade_roster::{ClusterId, NodeRoster, NodeState};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn round_produces_valid_clustering() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut roster = NodeRoster::new(100);

        for k in [1, 5, 50, 100] {
            run_round(&mut roster, k, &mut rng).unwrap();
            roster.check_clustered(k).unwrap();
        }
    }

    #[test]
    fn round_fails_fast_on_bad_head_count() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut roster = NodeRoster::new(10);

        assert_eq!(
            run_round(&mut roster, 11, &mut rng),
            Err(Error::InvalidConfiguration {
                heads: 11,
                nodes: 10
            })
        );
    }

    #[test]
    fn scenario_ten_nodes_two_heads() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut roster = NodeRoster::new(10);
        run_round(&mut roster, 2, &mut rng).unwrap();

        let heads = roster.head_ids();
        assert_eq!(heads.len(), 2);
        assert_eq!(roster.follower_count(), 8);

        // Every follower is attached to one of the two heads; each head is
        // attached to itself.
        for record in roster.iter() {
            match record.state {
                NodeState::ClusterHead => {
                    assert_eq!(record.cluster, ClusterId::Head(record.id));
                }
                NodeState::Follower => {
                    let head = record.cluster.head().unwrap();
                    assert!(heads.contains(&head));
                    assert_ne!(head, record.id);
                }
            }
        }
    }

    #[test]
    fn rounds_are_reproducible_with_same_seed() {
        let mut a = NodeRoster::new(60);
        let mut b = NodeRoster::new(60);

        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);

        for _ in 0..5 {
            run_round(&mut a, 3, &mut rng_a).unwrap();
            run_round(&mut b, 3, &mut rng_b).unwrap();
            assert_eq!(a, b);
        }
    }
}
