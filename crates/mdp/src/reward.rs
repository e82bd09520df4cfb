//! Reward-function families: decision variables → reward function.
//!
//! The reward function is the object under search. A [`RewardFamily`] fixes
//! the *shape* of candidate reward functions and builds a concrete one from a
//! decision-variable vector. The vector layout is a contract shared with the
//! constraint encoding: the first `reward_size()` components parametrize the
//! reward, anything after that (slack epsilons) belongs to the caller and is
//! ignored here.

/// A concrete reward function: `(state, action) -> f64`.
pub type RewardFun<A> = Box<dyn Fn(usize, &A) -> f64>;

/// A parametrized family of reward functions.
///
/// Implementors read exactly the first `reward_size()` components of the
/// decision-variable vector; `build` panics if fewer are supplied, since a
/// silently truncated reward would corrupt every downstream constraint.
pub trait RewardFamily<A> {
    /// Number of decision-variable components the family consumes.
    fn reward_size(&self) -> usize;

    /// Build a reward function from the reward prefix of `decision_vars`.
    fn build(&self, decision_vars: &[f64]) -> RewardFun<A>;
}

/// A dense `num_states × num_actions` reward table, row-major in the
/// decision-variable prefix. Actions are next-state indices (`A = usize`).
#[derive(Debug, Clone)]
pub struct TabularRewardFamily {
    num_states: usize,
    num_actions: usize,
}

impl TabularRewardFamily {
    /// Create a family of dense reward tables.
    pub fn new(num_states: usize, num_actions: usize) -> Self {
        Self {
            num_states,
            num_actions,
        }
    }
}

impl RewardFamily<usize> for TabularRewardFamily {
    fn reward_size(&self) -> usize {
        self.num_states * self.num_actions
    }

    fn build(&self, decision_vars: &[f64]) -> RewardFun<usize> {
        assert!(
            decision_vars.len() >= self.reward_size(),
            "decision vector too short: {} < {}",
            decision_vars.len(),
            self.reward_size()
        );
        let table = decision_vars[..self.reward_size()].to_vec();
        let num_actions = self.num_actions;
        Box::new(move |state, action| table[state * num_actions + action])
    }
}

/// A linear reward over flag-vector actions: `r(_, a) = a · weights`.
///
/// The bandit domains use this: the state is irrelevant and the action is a
/// bit vector scored against one weight per component.
#[derive(Debug, Clone)]
pub struct LinearRewardFamily {
    num_components: usize,
}

impl LinearRewardFamily {
    /// Create a linear family with one weight per action component.
    pub fn new(num_components: usize) -> Self {
        Self { num_components }
    }
}

impl RewardFamily<Vec<f64>> for LinearRewardFamily {
    fn reward_size(&self) -> usize {
        self.num_components
    }

    fn build(&self, decision_vars: &[f64]) -> RewardFun<Vec<f64>> {
        assert!(
            decision_vars.len() >= self.num_components,
            "decision vector too short: {} < {}",
            decision_vars.len(),
            self.num_components
        );
        let weights = decision_vars[..self.num_components].to_vec();
        Box::new(move |_state, action: &Vec<f64>| {
            action.iter().zip(weights.iter()).map(|(a, w)| a * w).sum()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabular_reads_row_major_prefix() {
        let family = TabularRewardFamily::new(2, 2);
        assert_eq!(family.reward_size(), 4);

        // Extra trailing components (epsilons) are ignored.
        let reward = family.build(&[0.0, 1.0, 2.0, 3.0, 9.0, 9.0]);
        assert_eq!(reward(0, &0), 0.0);
        assert_eq!(reward(0, &1), 1.0);
        assert_eq!(reward(1, &0), 2.0);
        assert_eq!(reward(1, &1), 3.0);
    }

    #[test]
    fn test_linear_is_dot_product() {
        let family = LinearRewardFamily::new(3);
        let reward = family.build(&[3.0, 4.0, 5.0]);

        assert_eq!(reward(0, &vec![1.0, 0.0, 0.0]), 3.0);
        assert_eq!(reward(0, &vec![1.0, 1.0, 1.0]), 12.0);
        // State is irrelevant for linear families.
        assert_eq!(reward(5, &vec![0.0, 1.0, 1.0]), 9.0);
    }

    #[test]
    #[should_panic(expected = "decision vector too short")]
    fn test_short_decision_vector_panics() {
        let family = TabularRewardFamily::new(2, 2);
        let _ = family.build(&[1.0, 2.0]);
    }
}
