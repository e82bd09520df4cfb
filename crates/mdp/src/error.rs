//! Error types for environment construction and evaluation.

use thiserror::Error;

/// Errors that can occur when building or querying an environment.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MdpError {
    /// Discount factor outside `[0, 1]`.
    #[error("Invalid discount factor {discount} (expected a value in [0, 1])")]
    InvalidDiscount { discount: f64 },

    /// An environment needs at least one state.
    #[error("State space cannot be empty")]
    EmptyStateSpace,
}
