//! Policies: named, immutable state → action decision rules.
//!
//! A policy pairs an opaque name (a tuple of small integers) with a decision
//! rule. All identity semantics (equality, ordering, hashing) live on the
//! name: two policies with the same name are the same policy for the purposes
//! of deduplication and display, regardless of how their rules were built.
//!
//! The action type is generic: the two-state MDP uses `usize` actions
//! (next-state indices), while the cleaning-robot bandit uses flag vectors
//! (`Vec<f64>`) dotted against a reward vector.

use std::cmp::Ordering as CmpOrdering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// The opaque identifier of a policy: a tuple of small integers.
///
/// Ordering is lexicographic over the underlying components, so names provide
/// a total order without going through string formatting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PolicyName(Vec<i32>);

impl PolicyName {
    /// Create a name from its integer components.
    pub fn new(components: &[i32]) -> Self {
        Self(components.to_vec())
    }

    /// The underlying components.
    pub fn components(&self) -> &[i32] {
        &self.0
    }
}

impl fmt::Display for PolicyName {
    /// Renders `(0, 1)` as `p01`, `(1, 1, 0)` as `p110`, etc.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p")?;
        for c in &self.0 {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// An immutable named decision rule from state to action.
///
/// Policies are values: cloning is cheap (the rule is behind an [`Arc`]) and
/// a policy may be shared by reference across many orderings.
pub struct Policy<A> {
    name: PolicyName,
    rule: Arc<dyn Fn(usize) -> A + Send + Sync>,
}

impl<A> Policy<A> {
    /// Create a policy from a name and an arbitrary decision rule.
    pub fn new(
        name: PolicyName,
        rule: impl Fn(usize) -> A + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            rule: Arc::new(rule),
        }
    }

    /// The policy's name.
    pub fn name(&self) -> &PolicyName {
        &self.name
    }

    /// Apply the decision rule to a state.
    pub fn act(&self, state: usize) -> A {
        (self.rule)(state)
    }
}

impl Policy<usize> {
    /// A policy given by a state-indexed action table, named after the table.
    ///
    /// `Policy::tabular(&[0, 1])` takes action 0 in state 0 and action 1 in
    /// state 1, and is named `p01`.
    pub fn tabular(actions: &[i32]) -> Self {
        let table: Vec<usize> = actions.iter().map(|&a| a as usize).collect();
        Self::new(PolicyName::new(actions), move |state| table[state])
    }
}

impl Policy<Vec<f64>> {
    /// A state-independent policy that always emits the same flag vector.
    ///
    /// Used by single-step bandit domains where the "action" is a bit vector
    /// (e.g. which rooms a cleaning robot cleans); the name records the bits.
    pub fn constant_flags(flags: &[i32]) -> Self {
        let action: Vec<f64> = flags.iter().map(|&f| f as f64).collect();
        Self::new(PolicyName::new(flags), move |_state| action.clone())
    }
}

impl<A> Clone for Policy<A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            rule: Arc::clone(&self.rule),
        }
    }
}

impl<A> fmt::Debug for Policy<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Policy({})", self.name)
    }
}

impl<A> fmt::Display for Policy<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// Identity semantics delegate to the name.

impl<A> PartialEq for Policy<A> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<A> Eq for Policy<A> {}

impl<A> PartialOrd for Policy<A> {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for Policy<A> {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.name.cmp(&other.name)
    }
}

impl<A> Hash for Policy<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabular_policy_acts_by_table() {
        let policy = Policy::tabular(&[0, 1]);
        assert_eq!(policy.act(0), 0);
        assert_eq!(policy.act(1), 1);
    }

    #[test]
    fn test_constant_flags_ignores_state() {
        let policy = Policy::constant_flags(&[1, 0, 1]);
        assert_eq!(policy.act(0), vec![1.0, 0.0, 1.0]);
        assert_eq!(policy.act(7), vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_equality_is_by_name() {
        let a = Policy::tabular(&[0, 1]);
        let b = Policy::new(PolicyName::new(&[0, 1]), |_| 99usize);
        let c = Policy::tabular(&[1, 0]);

        assert_eq!(a, b); // same name, different rule
        assert_ne!(a, c);
    }

    #[test]
    fn test_name_ordering_is_lexicographic() {
        let mut names = vec![
            PolicyName::new(&[1, 0]),
            PolicyName::new(&[0, 1]),
            PolicyName::new(&[0, 0]),
            PolicyName::new(&[1, 1]),
        ];
        names.sort();
        assert_eq!(
            names,
            vec![
                PolicyName::new(&[0, 0]),
                PolicyName::new(&[0, 1]),
                PolicyName::new(&[1, 0]),
                PolicyName::new(&[1, 1]),
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Policy::tabular(&[0, 1]).to_string(), "p01");
        assert_eq!(Policy::constant_flags(&[1, 1, 0]).to_string(), "p110");
    }
}
