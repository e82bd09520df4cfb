//! # Reward-MDP - Reward-Free Markov Decision Processes
//!
//! This crate provides the building blocks for reward-design experiments on
//! tiny, enumerable MDPs:
//!
//! - [`Policy`]: an immutable named decision rule (`state -> action`)
//! - [`MdpEnv`]: dynamics + discount, *without* a reward function (an MDP\R)
//! - [`RewardFamily`]: a parametrized family of reward functions, built from
//!   a decision-variable vector
//!
//! ## Core Idea
//!
//! The reward function is the object under search, not a fixed part of the
//! environment. An [`MdpEnv`] evaluates any policy against any candidate
//! reward function:
//!
//! ```text
//!          ┌──────────┐
//! Policy ─▶│          │
//!          │  MdpEnv  │─▶ average value (f64)
//! Reward ─▶│          │
//!          └──────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use reward_mdp::{MdpEnv, Policy, RewardFamily, TabularRewardFamily};
//!
//! // Two states, two actions, deterministic dynamics: action = next state.
//! let env = MdpEnv::new(|_state, action: &usize| *action, 0.5, 2, 2).unwrap();
//! let policy = Policy::tabular(&[1, 1]); // always move to state 1
//!
//! let family = TabularRewardFamily::new(2, 2);
//! let reward = family.build(&[0.0, 0.0, 1.0, 1.0]); // reward 1 in state 1
//!
//! let value = env.average_value(&policy, reward.as_ref());
//! assert!((value - 1.5).abs() < 1e-9);
//! ```

pub mod env;
pub mod error;
pub mod policy;
pub mod reward;

pub use env::MdpEnv;
pub use error::MdpError;
pub use policy::{Policy, PolicyName};
pub use reward::{LinearRewardFamily, RewardFamily, RewardFun, TabularRewardFamily};
