//! The reward-free environment (MDP\R): dynamics + discount, no reward.
//!
//! An [`MdpEnv`] owns the transition dynamics and a discount factor, and
//! evaluates policies against externally supplied reward functions. It is
//! constructed once and used read-only for the lifetime of a search.
//!
//! # Evaluation Semantics
//!
//! - `discount == 0`: exact single-step (bandit) value, `r(s, π(s))`.
//! - `discount > 0`: fixed-horizon rollout
//!   `Σ_{k<H} discount^k · r(s_k, π(s_k))`, an *approximation* of the
//!   infinite-horizon value. The default horizon (200) keeps the truncation
//!   error of the small test domains far below solver tolerance
//!   (`0.5^200 ≈ 6e-61`); this is a deliberate design approximation.

use crate::error::MdpError;
use crate::policy::Policy;

/// Default rollout horizon. Large enough that `discount^HORIZON` is
/// negligible relative to the 1e-6 solver tolerance for any discount the
/// test domains use.
pub const DEFAULT_HORIZON: usize = 200;

/// A tiny enumerable MDP without a reward function.
pub struct MdpEnv<A> {
    dynamics: Box<dyn Fn(usize, &A) -> usize + Send + Sync>,
    discount: f64,
    num_states: usize,
    num_actions: usize,
    horizon: usize,
    require_nonnegative_reward: bool,
}

impl<A> MdpEnv<A> {
    /// Create an environment from deterministic dynamics and a discount.
    ///
    /// Fails fast on a discount outside `[0, 1]` or an empty state space.
    pub fn new(
        dynamics: impl Fn(usize, &A) -> usize + Send + Sync + 'static,
        discount: f64,
        num_states: usize,
        num_actions: usize,
    ) -> Result<Self, MdpError> {
        if !(0.0..=1.0).contains(&discount) || discount.is_nan() {
            return Err(MdpError::InvalidDiscount { discount });
        }
        if num_states == 0 {
            return Err(MdpError::EmptyStateSpace);
        }
        Ok(Self {
            dynamics: Box::new(dynamics),
            discount,
            num_states,
            num_actions,
            horizon: DEFAULT_HORIZON,
            require_nonnegative_reward: false,
        })
    }

    /// Override the rollout horizon.
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Mark this environment as only admitting non-negative reward
    /// components (the constraint encoding reads this flag).
    pub fn with_nonnegative_reward(mut self) -> Self {
        self.require_nonnegative_reward = true;
        self
    }

    /// Discount factor.
    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Number of states.
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// Number of actions.
    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    /// Rollout horizon.
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Whether reward components must be non-negative.
    pub fn requires_nonnegative_reward(&self) -> bool {
        self.require_nonnegative_reward
    }

    /// Value of `policy` started from `state` under `reward_fun`.
    ///
    /// Iterative fixed-horizon rollout (a loop, so a horizon of several
    /// hundred steps costs no stack depth).
    pub fn policy_value(
        &self,
        policy: &Policy<A>,
        reward_fun: &dyn Fn(usize, &A) -> f64,
        state: usize,
    ) -> f64 {
        if self.discount == 0.0 {
            // Exact single-step bandit value, no rollout.
            let action = policy.act(state);
            return reward_fun(state, &action);
        }

        let mut total = 0.0;
        let mut weight = 1.0;
        let mut s = state;
        for _ in 0..self.horizon {
            let action = policy.act(s);
            total += weight * reward_fun(s, &action);
            weight *= self.discount;
            s = (self.dynamics)(s, &action);
        }
        total
    }

    /// Mean of `policy_value` over all initial states.
    pub fn average_value(&self, policy: &Policy<A>, reward_fun: &dyn Fn(usize, &A) -> f64) -> f64 {
        let sum: f64 = (0..self.num_states)
            .map(|s| self.policy_value(policy, reward_fun, s))
            .sum();
        sum / self.num_states as f64
    }

    /// Average values of every policy in `permutation`, in permutation order.
    pub fn all_average_values(
        &self,
        permutation: &[Policy<A>],
        reward_fun: &dyn Fn(usize, &A) -> f64,
    ) -> Vec<f64> {
        permutation
            .iter()
            .map(|p| self.average_value(p, reward_fun))
            .collect()
    }

    /// Policies paired with their average values, sorted ascending by value.
    ///
    /// The sort is stable: policies with equal value keep their input order.
    /// This classifies the ordering a concrete reward function induces.
    pub fn sorted_policies_and_values(
        &self,
        policies: &[Policy<A>],
        reward_fun: &dyn Fn(usize, &A) -> f64,
    ) -> Vec<(Policy<A>, f64)> {
        let mut pairs: Vec<(Policy<A>, f64)> = policies
            .iter()
            .map(|p| (p.clone(), self.average_value(p, reward_fun)))
            .collect();
        pairs.sort_by(|a, b| a.1.total_cmp(&b.1));
        pairs
    }

    /// Consecutive (worse, better) policy pairs under `reward_fun`'s induced
    /// value order, read off the sorted values.
    pub fn value_inequalities(
        &self,
        policies: &[Policy<A>],
        reward_fun: &dyn Fn(usize, &A) -> f64,
    ) -> Vec<(Policy<A>, Policy<A>)> {
        let sorted = self.sorted_policies_and_values(policies, reward_fun);
        sorted
            .windows(2)
            .map(|w| (w[0].0.clone(), w[1].0.clone()))
            .collect()
    }
}

impl<A> std::fmt::Debug for MdpEnv<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MdpEnv")
            .field("discount", &self.discount)
            .field("num_states", &self.num_states)
            .field("num_actions", &self.num_actions)
            .field("horizon", &self.horizon)
            .field(
                "require_nonnegative_reward",
                &self.require_nonnegative_reward,
            )
            .finish()
    }
}
