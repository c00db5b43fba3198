//! The node roster - the single shared mutable resource of a simulation run.

use std::ops::{Index, IndexMut};

use thiserror::Error;

use crate::node::{ClusterId, NodeId, NodeRecord, NodeState};

/// A clustering invariant that does not hold, as reported by
/// [`NodeRoster::check_clustered`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Wrong number of cluster heads.
    #[error("expected {expected} cluster heads, found {actual}")]
    HeadCount { expected: usize, actual: usize },

    /// A head whose own cluster is not itself.
    #[error("node {id} is a cluster head but not the head of its own cluster")]
    HeadNotSelfReferential { id: NodeId },

    /// A follower left unattached.
    #[error("follower node {id} has no cluster")]
    FollowerUnassigned { id: NodeId },

    /// A follower attached to a node that is not a head this round.
    #[error("follower node {id} is attached to node {head}, which is not a cluster head")]
    FollowerAttachedToNonHead { id: NodeId, head: NodeId },
}

/// An ordered, fixed-size collection of [`NodeRecord`]s indexed by [`NodeId`].
///
/// Created once at startup with every node a follower; mutated in place each
/// round by head selection and follower assignment. The roster is owned by
/// the round driver and lent `&mut` to each phase in turn - no component
/// keeps a reference across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRoster {
    records: Vec<NodeRecord>,
}

impl NodeRoster {
    /// Create a roster of `n` nodes, all followers, none attached.
    ///
    /// IDs are assigned densely: `0..n`.
    pub fn new(n: u32) -> Self {
        Self {
            records: (0..n).map(|i| NodeRecord::new(NodeId::new(i))).collect(),
        }
    }

    /// Number of nodes. Fixed for the life of the roster.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the roster holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by ID.
    pub fn get(&self, id: NodeId) -> Option<&NodeRecord> {
        self.records.get(id.value() as usize)
    }

    /// Look up a record by ID, mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeRecord> {
        self.records.get_mut(id.value() as usize)
    }

    /// Iterate over all records in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeRecord> {
        self.records.iter()
    }

    /// Iterate over all records in ID order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut NodeRecord> {
        self.records.iter_mut()
    }

    /// All records as a slice, in ID order.
    pub fn records(&self) -> &[NodeRecord] {
        &self.records
    }

    /// IDs of the nodes currently marked as cluster heads, in ID order.
    pub fn head_ids(&self) -> Vec<NodeId> {
        self.records
            .iter()
            .filter(|r| r.is_head())
            .map(|r| r.id)
            .collect()
    }

    /// Number of cluster heads this round.
    pub fn head_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_head()).count()
    }

    /// Number of followers this round.
    pub fn follower_count(&self) -> usize {
        self.records.len() - self.head_count()
    }

    /// Verify the post-round clustering invariants for an expected head
    /// count, reporting the first violation found.
    ///
    /// - exactly `expected_heads` nodes are heads
    /// - every head's cluster is itself
    /// - every follower is attached to a current head
    pub fn check_clustered(&self, expected_heads: usize) -> Result<(), InvariantViolation> {
        let actual = self.head_count();
        if actual != expected_heads {
            return Err(InvariantViolation::HeadCount {
                expected: expected_heads,
                actual,
            });
        }

        for record in &self.records {
            match (record.state, record.cluster) {
                (NodeState::ClusterHead, ClusterId::Head(head)) if head == record.id => {}
                (NodeState::ClusterHead, _) => {
                    return Err(InvariantViolation::HeadNotSelfReferential { id: record.id });
                }
                (NodeState::Follower, ClusterId::Unassigned) => {
                    return Err(InvariantViolation::FollowerUnassigned { id: record.id });
                }
                (NodeState::Follower, ClusterId::Head(head)) => {
                    // A follower attached to itself also fails here: its own
                    // state is Follower, not ClusterHead.
                    let attached_to_head =
                        self.get(head).map_or(false, |r| r.is_head());
                    if !attached_to_head {
                        return Err(InvariantViolation::FollowerAttachedToNonHead {
                            id: record.id,
                            head,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

impl Index<NodeId> for NodeRoster {
    type Output = NodeRecord;

    fn index(&self, id: NodeId) -> &NodeRecord {
        &self.records[id.value() as usize]
    }
}

impl IndexMut<NodeId> for NodeRoster {
    fn index_mut(&mut self, id: NodeId) -> &mut NodeRecord {
        &mut self.records[id.value() as usize]
    }
}
