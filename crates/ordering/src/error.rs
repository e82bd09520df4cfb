//! Error types for ordering construction and classification.

use thiserror::Error;

/// Errors that can occur when building orderings, encoding constraints, or
/// classifying realized orderings.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderingError {
    /// Relation pattern length must be one less than the permutation length.
    #[error("Relation pattern has {relations} entries for {policies} policies (expected {})", policies.saturating_sub(1))]
    RelationLength { policies: usize, relations: usize },

    /// Not enough epsilon slots for the permutation's adjacent relations.
    #[error("Need at least {required} epsilon slots, got {got}")]
    EpsilonCount { required: usize, got: usize },

    /// Set representations are only defined for fully specified patterns.
    #[error("Relation pattern contains an unspecified entry")]
    UnspecifiedRelation,

    /// Searches need at least one policy to rank.
    #[error("Policy set cannot be empty")]
    EmptyPolicySet,

    /// A policy was expected in some partition group but is in none.
    #[error("Policy {policy} not found in any partition group")]
    PolicyNotFound { policy: String },
}
