//! Cluster head selection.
//!
//! Each round starts from a clean slate: every node is reset to an
//! unattached follower, then exactly `k` distinct nodes are drawn uniformly
//! without replacement and promoted to cluster heads. Selection has no
//! memory - a node's chance of heading a cluster is the same every round.

use palisade_roster::{ClusterId, NodeId, NodeRoster, NodeState};
use rand::Rng;

use crate::error::{Error, Result};

/// Reset every node and elect exactly `k` cluster heads for the round.
///
/// Requires `1 <= k <= roster.len()`. Validation happens before any
/// mutation: on [`Error::InvalidConfiguration`] the roster is exactly as it
/// was before the call.
///
/// Each elected head becomes the head of its own cluster
/// (`cluster = Head(own id)`); everyone else is left an unattached
/// follower for [`assign_followers`](crate::assign_followers) to place.
pub fn select_heads<R: Rng + ?Sized>(
    roster: &mut NodeRoster,
    k: usize,
    rng: &mut R,
) -> Result<()> {
    let n = roster.len();
    if k < 1 || k > n {
        return Err(Error::InvalidConfiguration { heads: k, nodes: n });
    }

    // Reset: prior-round state carries no meaning into this round.
    for record in roster.iter_mut() {
        record.state = NodeState::Follower;
        record.cluster = ClusterId::Unassigned;
    }

    // Draw k distinct IDs from the full population.
    for index in rand::seq::index::sample(rng, n, k) {
        let id = NodeId::new(index as u32);
        let record = &mut roster[id];
        record.state = NodeState::ClusterHead;
        record.cluster = ClusterId::Head(id);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn selects_exactly_k_heads() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut roster = NodeRoster::new(30);

        for k in 1..=30 {
            select_heads(&mut roster, k, &mut rng).unwrap();
            assert_eq!(roster.head_count(), k, "k = {k}");
            assert_eq!(roster.follower_count(), 30 - k, "k = {k}");
        }
    }

    #[test]
    fn heads_are_self_referential() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut roster = NodeRoster::new(50);
        select_heads(&mut roster, 5, &mut rng).unwrap();

        for record in roster.iter().filter(|r| r.is_head()) {
            assert_eq!(record.cluster, ClusterId::Head(record.id));
        }
    }

    #[test]
    fn non_heads_left_unassigned() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut roster = NodeRoster::new(50);
        select_heads(&mut roster, 5, &mut rng).unwrap();

        for record in roster.iter().filter(|r| !r.is_head()) {
            assert_eq!(record.state, NodeState::Follower);
            assert!(record.cluster.is_unassigned());
        }
    }

    #[test]
    fn reselection_discards_prior_round() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut roster = NodeRoster::new(40);

        // First round, fully clustered.
        crate::run_round(&mut roster, 4, &mut rng).unwrap();

        // Second selection must wipe every prior assignment: the only
        // non-unassigned nodes are the new heads themselves.
        select_heads(&mut roster, 4, &mut rng).unwrap();
        for record in roster.iter() {
            match record.state {
                NodeState::ClusterHead => {
                    assert_eq!(record.cluster, ClusterId::Head(record.id));
                }
                NodeState::Follower => assert!(record.cluster.is_unassigned()),
            }
        }
    }

    #[test]
    fn full_population_can_be_heads() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut roster = NodeRoster::new(8);
        select_heads(&mut roster, 8, &mut rng).unwrap();

        assert_eq!(roster.head_count(), 8);
        assert_eq!(roster.follower_count(), 0);
    }

    #[test]
    fn rejects_zero_heads_without_mutating() {
        let mut rng = StdRng::seed_from_u64(16);
        let mut roster = NodeRoster::new(10);
        crate::run_round(&mut roster, 3, &mut rng).unwrap();

        let before = roster.clone();
        assert_eq!(
            select_heads(&mut roster, 0, &mut rng),
            Err(Error::InvalidConfiguration { heads: 0, nodes: 10 })
        );
        assert_eq!(roster, before);
    }

    #[test]
    fn rejects_more_heads_than_nodes_without_mutating() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut roster = NodeRoster::new(10);
        crate::run_round(&mut roster, 3, &mut rng).unwrap();

        let before = roster.clone();
        assert_eq!(
            select_heads(&mut roster, 11, &mut rng),
            Err(Error::InvalidConfiguration {
                heads: 11,
                nodes: 10
            })
        );
        assert_eq!(roster, before);
    }

    #[test]
    fn same_seed_selects_same_heads() {
        let mut roster_a = NodeRoster::new(100);
        let mut roster_b = NodeRoster::new(100);

        select_heads(&mut roster_a, 5, &mut StdRng::seed_from_u64(42)).unwrap();
        select_heads(&mut roster_b, 5, &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(roster_a.head_ids(), roster_b.head_ids());
    }
}
