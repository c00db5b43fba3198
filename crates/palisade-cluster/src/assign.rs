//! Follower assignment.
//!
//! After head selection, every follower draws one cluster head uniformly at
//! random and attaches to it. Draws are independent per follower: several
//! followers will usually land on the same head, and there is no per-head
//! capacity or load balancing.

use palisade_roster::{ClusterId, NodeRoster, NodeState};
use rand::Rng;

use crate::error::{Error, Result};

/// Attach every follower to a uniformly drawn cluster head.
///
/// Heads are never touched - a head's cluster stays self-referential.
/// Fails with [`Error::NoClusterHeads`] (roster untouched) if no head
/// exists, which means head selection did not run this round.
///
/// Not idempotent by design: calling this twice in the same round re-draws
/// every attachment, so assignments may change. That is expected behavior,
/// not a bug.
pub fn assign_followers<R: Rng + ?Sized>(roster: &mut NodeRoster, rng: &mut R) -> Result<()> {
    let heads = roster.head_ids();
    if heads.is_empty() {
        return Err(Error::NoClusterHeads);
    }

    for record in roster
        .iter_mut()
        .filter(|r| r.state == NodeState::Follower)
    {
        let head = heads[rng.gen_range(0..heads.len())];
        record.cluster = ClusterId::Head(head);
    }

    Ok(())
}
