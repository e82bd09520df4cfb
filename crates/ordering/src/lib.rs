//! # Reward Ordering - Policy Ordering Feasibility
//!
//! Which rankings of a policy set can a reward function induce? This crate
//! answers that by constrained numerical search: each candidate
//! (permutation, relation pattern) pair is encoded as equality and
//! inequality constraints over the reward family's decision variables, and
//! a penalty-method solver looks for a satisfying reward.
//!
//! ## Pipeline
//!
//! ```text
//!   policies ──▶ permutations × {=, <} patterns
//!                      │
//!                      ▼
//!               ┌──────────────┐    ┌──────────┐
//!               │ ConstraintSet │──▶│  solver  │──▶ realizable?
//!               └──────────────┘    └──────────┘
//!                      │
//!                      ▼
//!        equivalence / ungameability / simplification / graph
//! ```
//!
//! ## Core Components
//!
//! - [`PolicyOrdering`]: A permutation of policies plus adjacent relations
//! - [`ConstraintSet`]: The ordering as numerical constraints with epsilon gaps
//! - [`solve_feasibility`]: Penalty-method feasibility search
//! - [`full_ordering_search`]: Every permutation crossed with every pattern
//! - [`check_ungameable`] / [`check_simplification`]: Post-hoc classification
//!
//! ## Example
//!
//! ```rust
//! use reward_ordering::{PolicyOrdering, Relation};
//! use reward_mdp::Policy;
//!
//! let ordering = PolicyOrdering::new(
//!     vec![
//!         Policy::tabular(&[0, 0]),
//!         Policy::tabular(&[0, 1]),
//!         Policy::tabular(&[1, 0]),
//!     ],
//!     vec![Relation::Equal, Relation::Less],
//! )
//! .unwrap();
//!
//! assert_eq!(ordering.label(), "p00 = p01 < p10");
//! assert_eq!(ordering.set_representation().unwrap().len(), 2);
//! ```

pub mod constraints;
mod error;
pub mod gameability;
pub mod graph;
pub mod ordering;
pub mod search;
pub mod simplification;
pub mod solver;

pub use constraints::{ConstraintSet, EPS_FLOOR, EPS_SUM_FLOOR};
pub use error::OrderingError;
pub use gameability::{check_gameable, check_ungameable, reward_pair_ungameable, ungameable_pairs};
pub use graph::{EdgeKind, OrderingGraph};
pub use ordering::{
    check_equivalent, group_index, remove_equivalent, OrderingRecord, PolicyOrdering, Relation,
};
pub use search::{
    full_ordering_search, permutations, random_ordering_search, realize_ordering, relation_search,
    Realized, SearchOptions,
};
pub use simplification::{check_simplification, simplification_pairs};
pub use solver::{solve_feasibility, solve_with_slack, FeasibilityOptions, FeasibilityReport};
