//! Constraint encoding: relation patterns → solver constraint functions.
//!
//! A [`ConstraintSet`] fixes a `(permutation, relation pattern)` pair, a
//! reward family, and optional forced-equal policy pairs, and evaluates the
//! equality / inequality constraint vectors at any decision-variable point.
//!
//! Decision-variable layout (a contract shared with [`RewardFamily`]):
//!
//! ```text
//! [ r_0 .. r_{reward_size-1} | eps_0 .. eps_{num_eps-1} ]
//!   reward parameters          slack variables
//! ```
//!
//! Conventions follow standard nonlinear programming: a point is feasible iff
//! every equality evaluates to ~0 and every inequality evaluates ≥ 0.
//!
//! # The epsilon coupling
//!
//! The equality branch subtracts its epsilon (`v[i+1] − v[i] − eps[i]`) even
//! though the epsilon is simultaneously forced to zero by an inequality pair.
//! Keeping the coupled form empirically nudges the solver toward driving the
//! epsilon to zero instead of leaving the constraint slack-free; it is a
//! known quirk of the encoding, not a guaranteed-correct technique.

use reward_mdp::{MdpEnv, Policy, RewardFamily};

use crate::error::OrderingError;
use crate::ordering::{PolicyOrdering, Relation};

/// Strictness floor for an epsilon whose relation is `Less`.
///
/// Must sit well above the solver's acceptance tolerance (1e-6 by default):
/// a point certified within tolerance must still carry a genuinely positive
/// gap for every strict relation, or impossible "strict" orderings slip
/// through as feasible.
pub const EPS_FLOOR: f64 = 1e-5;

/// Floor on the sum of all epsilons; rules out the degenerate all-zero
/// solution where every "ordering" collapses to total indifference.
pub const EPS_SUM_FLOOR: f64 = 1e-4;

/// The constraint functions for one `(permutation, relation)` combination.
///
/// Pure with respect to the decision vector: evaluating constraints never
/// mutates the set, the environment, or the policies.
pub struct ConstraintSet<'a, A> {
    env: &'a MdpEnv<A>,
    family: &'a dyn RewardFamily<A>,
    ordering: &'a PolicyOrdering<A>,
    equal_pairs: &'a [(Policy<A>, Policy<A>)],
    num_eps: usize,
}

impl<'a, A> ConstraintSet<'a, A> {
    /// Build a constraint set, failing fast when the epsilon count cannot
    /// cover the permutation's adjacent relations.
    pub fn new(
        env: &'a MdpEnv<A>,
        family: &'a dyn RewardFamily<A>,
        ordering: &'a PolicyOrdering<A>,
        equal_pairs: &'a [(Policy<A>, Policy<A>)],
        num_eps: usize,
    ) -> Result<Self, OrderingError> {
        let required = ordering.len().saturating_sub(1);
        if num_eps < required {
            return Err(OrderingError::EpsilonCount {
                required,
                got: num_eps,
            });
        }
        Ok(Self {
            env,
            family,
            ordering,
            equal_pairs,
            num_eps,
        })
    }

    /// Total decision-variable count: reward prefix plus epsilon suffix.
    pub fn num_decision_vars(&self) -> usize {
        self.family.reward_size() + self.num_eps
    }

    /// Number of epsilon slots.
    pub fn num_eps(&self) -> usize {
        self.num_eps
    }

    /// Average values of the permutation's policies at `decision_vars`.
    pub fn policy_values(&self, decision_vars: &[f64]) -> Vec<f64> {
        let reward = self.family.build(decision_vars);
        self.env
            .all_average_values(self.ordering.policies(), reward.as_ref())
    }

    fn epsilons<'d>(&self, decision_vars: &'d [f64]) -> &'d [f64] {
        let start = self.family.reward_size();
        &decision_vars[start..start + self.num_eps]
    }

    /// Equality constraints; feasible iff every entry is ~0.
    ///
    /// One entry per `Equal` adjacent relation (epsilon-coupled, see module
    /// docs) plus one per explicitly forced-equal policy pair.
    pub fn equalities(&self, decision_vars: &[f64]) -> Vec<f64> {
        let values = self.policy_values(decision_vars);
        let epss = self.epsilons(decision_vars);

        let mut eqs = Vec::new();
        for (i, relation) in self.ordering.relations().iter().enumerate() {
            if *relation == Relation::Equal {
                eqs.push(values[i + 1] - values[i] - epss[i]);
            }
        }

        if !self.equal_pairs.is_empty() {
            let reward = self.family.build(decision_vars);
            for (a, b) in self.equal_pairs {
                let va = self.env.average_value(a, reward.as_ref());
                let vb = self.env.average_value(b, reward.as_ref());
                eqs.push(vb - va);
            }
        }
        eqs
    }

    /// Inequality constraints; feasible iff every entry is ≥ 0.
    pub fn inequalities(&self, decision_vars: &[f64]) -> Vec<f64> {
        let values = self.policy_values(decision_vars);
        let epss = self.epsilons(decision_vars);
        let relations = self.ordering.relations();

        let mut ineqs = Vec::new();

        // Strict gaps between adjacent policies related by Less.
        for i in 1..values.len() {
            if relations[i - 1] == Relation::Less {
                ineqs.push(values[i] - values[i - 1] - epss[i - 1]);
            }
        }

        // Per-slot epsilon bounds. Slots beyond the adjacent relations (some
        // call sites allocate extra slack) get the unconstrained-sign
        // passthrough.
        for (j, eps) in epss.iter().enumerate() {
            match relations.get(j).copied().unwrap_or(Relation::Unspecified) {
                Relation::Less => ineqs.push(eps - EPS_FLOOR),
                Relation::Equal => {
                    ineqs.push(*eps);
                    ineqs.push(-eps);
                }
                Relation::Unspecified => ineqs.push(*eps),
            }
        }

        // At least some slack in total, over *all* epsilons.
        ineqs.push(epss.iter().sum::<f64>() - EPS_SUM_FLOOR);

        if self.env.requires_nonnegative_reward() {
            for r in &decision_vars[..self.family.reward_size()] {
                ineqs.push(*r);
            }
        }

        ineqs
    }
}

impl<A> std::fmt::Debug for ConstraintSet<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintSet")
            .field("ordering", &self.ordering)
            .field("equal_pairs", &self.equal_pairs.len())
            .field("num_eps", &self.num_eps)
            .finish_non_exhaustive()
    }
}
