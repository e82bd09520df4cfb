//! Ordering searches: which (permutation, relation) pairs are realizable.
//!
//! The exhaustive search enumerates every permutation of the policy set and
//! every fully specified adjacent relation pattern, runs one feasibility
//! solve per combination, and keeps the combinations the solver certifies:
//!
//! ```text
//! K policies ──▶ K! permutations × 2^(K-1) patterns
//!                      │ one ConstraintSet + one solve each
//!                      ▼
//!            { realized (ordering, relation) pairs }
//! ```
//!
//! The randomized variant skips the solver entirely: it samples decision
//! vectors, reads off the sorted value order each induces, and records the
//! distinct permutations reached. Fast, but only ever a pre-filter: it
//! cannot certify relation patterns or exhaust the space.

use tracing::{debug, info};

use reward_mdp::{MdpEnv, Policy, RewardFamily};

use crate::constraints::ConstraintSet;
use crate::error::OrderingError;
use crate::ordering::{PolicyOrdering, Relation};
use crate::solver::{solve_feasibility, solve_with_slack, FeasibilityOptions, FeasibilityReport};

/// Options shared by the ordering searches.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Solver knobs, one solve per combination.
    pub solver: FeasibilityOptions,
    /// Use the slack-maximizing refinement instead of pure feasibility.
    pub prefer_slack: bool,
}

/// A realized (ordering, relation) pair with the reward parameters that
/// witnessed it.
pub struct Realized<A> {
    pub ordering: PolicyOrdering<A>,
    pub reward_params: Vec<f64>,
}

impl<A> Clone for Realized<A> {
    fn clone(&self) -> Self {
        Self {
            ordering: self.ordering.clone(),
            reward_params: self.reward_params.clone(),
        }
    }
}

impl<A> std::fmt::Debug for Realized<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Realized")
            .field("ordering", &self.ordering)
            .finish_non_exhaustive()
    }
}

/// Single-query API: can some reward function realize this ordering (and
/// force the given policy pairs equal)?
///
/// Non-convergence comes back as a report with `success: false`, never as an
/// error; errors are reserved for malformed configurations.
pub fn realize_ordering<A>(
    ordering: &PolicyOrdering<A>,
    equal_pairs: &[(Policy<A>, Policy<A>)],
    family: &dyn RewardFamily<A>,
    env: &MdpEnv<A>,
    options: &SearchOptions,
) -> Result<FeasibilityReport, OrderingError> {
    let num_eps = ordering.len() - 1;
    let cs = ConstraintSet::new(env, family, ordering, equal_pairs, num_eps)?;
    let num_vars = cs.num_decision_vars();

    let mut report = if options.prefer_slack {
        solve_with_slack(
            |x| cs.equalities(x),
            |x| cs.inequalities(x),
            num_vars,
            num_eps,
            &options.solver,
        )
    } else {
        solve_feasibility(
            |x| cs.equalities(x),
            |x| cs.inequalities(x),
            num_vars,
            &options.solver,
        )
    };

    // Tolerance slop may not collapse a strict gap: a certified witness must
    // re-evaluate to genuinely separated values for every Less relation.
    if report.success {
        let values = cs.policy_values(&report.dec_vars);
        let strict_ok = ordering
            .relations()
            .iter()
            .enumerate()
            .all(|(i, r)| *r != Relation::Less || values[i + 1] - values[i] > 0.0);
        if !strict_ok {
            report.success = false;
        }
    }

    debug!(
        ordering = %ordering.label(),
        success = report.success,
        violation = report.max_violation,
        "feasibility solve finished"
    );
    Ok(report)
}

/// Try every fully specified relation pattern over one fixed permutation.
pub fn relation_search<A>(
    permutation: &[Policy<A>],
    family: &dyn RewardFamily<A>,
    env: &MdpEnv<A>,
    options: &SearchOptions,
) -> Result<Vec<Realized<A>>, OrderingError> {
    if permutation.is_empty() {
        return Err(OrderingError::EmptyPolicySet);
    }
    let mut realized = Vec::new();
    for pattern in Relation::all_patterns(permutation.len() - 1) {
        let ordering = PolicyOrdering::new(permutation.to_vec(), pattern)?;
        let report = realize_ordering(&ordering, &[], family, env, options)?;
        if report.success {
            realized.push(Realized {
                ordering,
                reward_params: report.dec_vars,
            });
        }
    }
    Ok(realized)
}

/// Exhaustive search: every permutation of `policies` × every relation
/// pattern. One independent, stateless solver call per combination.
pub fn full_ordering_search<A>(
    policies: &[Policy<A>],
    family: &dyn RewardFamily<A>,
    env: &MdpEnv<A>,
    options: &SearchOptions,
) -> Result<Vec<Realized<A>>, OrderingError> {
    if policies.is_empty() {
        return Err(OrderingError::EmptyPolicySet);
    }
    let perms = permutations(policies);
    let total = perms.len() << (policies.len() - 1);
    info!(
        policies = policies.len(),
        combinations = total,
        "starting full ordering search"
    );

    let mut realized = Vec::new();
    for (i, perm) in perms.iter().enumerate() {
        debug!(
            permutation = i + 1,
            of = perms.len(),
            "searching relation patterns"
        );
        realized.extend(relation_search(perm, family, env, options)?);
    }
    info!(realized = realized.len(), "full ordering search finished");
    Ok(realized)
}

/// Randomized pre-filter: sample decision vectors, classify the sorted value
/// order each induces, and collect the distinct permutations reached.
///
/// Stops early once all K! permutations have been seen. No solver is
/// involved, so nothing is certified about relation patterns; a permutation
/// missing from the result may still be realizable.
pub fn random_ordering_search<A>(
    policies: &[Policy<A>],
    family: &dyn RewardFamily<A>,
    env: &MdpEnv<A>,
    budget: usize,
    seed: u64,
) -> Vec<Vec<Policy<A>>> {
    let mut rng = Lcg::new(seed);
    let total = factorial(policies.len());

    let mut seen_keys = std::collections::BTreeSet::new();
    let mut found = Vec::new();

    for iter in 0..budget {
        let dec_vars: Vec<f64> = (0..family.reward_size())
            .map(|_| rng.next_uniform())
            .collect();
        let reward = family.build(&dec_vars);
        let sorted = env.sorted_policies_and_values(policies, reward.as_ref());

        let perm: Vec<Policy<A>> = sorted.into_iter().map(|(p, _)| p).collect();
        let key: Vec<_> = perm.iter().map(|p| p.name().clone()).collect();
        if seen_keys.insert(key) {
            debug!(iteration = iter, discovered = seen_keys.len(), "new permutation");
            found.push(perm);
            if found.len() == total {
                break;
            }
        }
    }
    found
}

/// All permutations of `items`, by Heap's algorithm.
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    let mut arr = items.to_vec();
    let n = arr.len();
    let mut out = vec![arr.clone()];
    let mut c = vec![0usize; n];

    let mut i = 0;
    while i < n {
        if c[i] < i {
            if i % 2 == 0 {
                arr.swap(0, i);
            } else {
                arr.swap(c[i], i);
            }
            out.push(arr.clone());
            c[i] += 1;
            i = 0;
        } else {
            c[i] = 0;
            i += 1;
        }
    }
    out
}

fn factorial(n: usize) -> usize {
    (1..=n).product()
}

/// Simple deterministic random number generator (LCG), seeded for
/// reproducible searches.
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_uniform(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        (self.state >> 33) as f64 / (1u64 << 31) as f64
    }
}
