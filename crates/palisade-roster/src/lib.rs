//! Palisade Node Roster
//!
//! The shared data model for the round-based clustering protocol: a fixed
//! population of sensor nodes, each either a cluster head or a follower
//! attached to one head.
//!
//! # Structure
//!
//! A [`NodeRoster`] is an ordered collection of [`NodeRecord`]s indexed by a
//! dense [`NodeId`] (`0..n`, assigned at creation, immutable afterwards).
//! Nodes are never added or removed; each round mutates the roster in place.
//!
//! # Invariants
//!
//! After a round completes:
//!
//! - Exactly `k` nodes are cluster heads, all others followers
//! - Every head's cluster points at itself
//! - Every follower's cluster points at a node that is a head this round
//!
//! [`NodeRoster::check_clustered`] verifies all three and reports the first
//! violation found.

mod node;
mod roster;

pub use node::{ClusterId, NodeId, NodeRecord, NodeState};
pub use roster::{InvariantViolation, NodeRoster};
