//! Per-node records: identity, role, and cluster membership.

use std::fmt;

/// A unique node identifier.
///
/// IDs are dense integers `0..n`, assigned once at roster creation. They are
/// the identity key for the whole simulation: a head's cluster is named by
/// the head's own `NodeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create from a raw index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<NodeId> for u32 {
    fn from(value: NodeId) -> Self {
        value.0
    }
}

/// Role of a node within the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeState {
    /// Attached (or waiting to be attached) to a cluster head.
    #[default]
    Follower,
    /// Aggregation point for one cluster this round.
    ClusterHead,
}

/// Cluster membership of a node.
///
/// `Unassigned` is the reset state at roster creation and between rounds.
/// A clustered node points at its head's [`NodeId`]; a head points at itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClusterId {
    /// Not attached to any cluster.
    #[default]
    Unassigned,
    /// Attached to the cluster headed by this node.
    Head(NodeId),
}

impl ClusterId {
    /// Whether this node currently belongs to no cluster.
    #[inline]
    pub const fn is_unassigned(&self) -> bool {
        matches!(self, ClusterId::Unassigned)
    }

    /// The head this node is attached to, if any.
    #[inline]
    pub const fn head(&self) -> Option<NodeId> {
        match self {
            ClusterId::Unassigned => None,
            ClusterId::Head(id) => Some(*id),
        }
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterId::Unassigned => write!(f, "-"),
            ClusterId::Head(id) => write!(f, "{id}"),
        }
    }
}

/// One node's complete per-round state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRecord {
    /// Immutable identity key.
    pub id: NodeId,
    /// Role this round.
    pub state: NodeState,
    /// Cluster membership this round.
    pub cluster: ClusterId,
}

impl NodeRecord {
    /// A fresh record: follower, not attached to anything.
    pub const fn new(id: NodeId) -> Self {
        Self {
            id,
            state: NodeState::Follower,
            cluster: ClusterId::Unassigned,
        }
    }

    /// Whether this node is a cluster head this round.
    #[inline]
    pub fn is_head(&self) -> bool {
        self.state == NodeState::ClusterHead
    }
}
