//! Orderings: policy permutations with adjacent relation patterns.
//!
//! The central unit of realizability is a pair `(permutation, relation)`: a
//! claim `policy[0] rel[0] policy[1] rel[1] policy[2] ...` about the value
//! order some reward function induces. This module owns that data type, its
//! *set representation* (the partition into tied groups), and the
//! equivalence relation used to deduplicate search results.
//!
//! ```text
//! (p00, p01, p10)  with  (Equal, Less)
//!        │
//!        ▼  set representation
//! [{p00, p01}, {p10}]        "p00 = p01 < p10"
//! ```

use std::cmp::Ordering as CmpOrdering;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use reward_mdp::{Policy, PolicyName};

use crate::error::OrderingError;

/// The desired relation between two adjacent policies in a permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// The two policies' values must be equal.
    Equal,
    /// The left policy's value must be strictly below the right's.
    Less,
    /// No constraint between the two policies.
    Unspecified,
}

impl Relation {
    /// Every fully specified pattern of length `len`: `{Equal, Less}^len`.
    pub fn all_patterns(len: usize) -> Vec<Vec<Relation>> {
        (0..1usize << len)
            .map(|mask| {
                (0..len)
                    .map(|i| {
                        if mask >> (len - 1 - i) & 1 == 1 {
                            Relation::Less
                        } else {
                            Relation::Equal
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// The separator this relation renders as in an ordering label.
    fn symbol(&self) -> &'static str {
        match self {
            Relation::Equal => " = ",
            Relation::Less => " < ",
            Relation::Unspecified => " ? ",
        }
    }
}

/// A policy permutation together with its adjacent relation pattern.
///
/// Immutable once constructed; the relation pattern always has exactly one
/// entry fewer than the permutation.
pub struct PolicyOrdering<A> {
    policies: Vec<Policy<A>>,
    relations: Vec<Relation>,
}

impl<A> PolicyOrdering<A> {
    /// Create an ordering, failing fast on a length mismatch.
    pub fn new(policies: Vec<Policy<A>>, relations: Vec<Relation>) -> Result<Self, OrderingError> {
        if relations.len() + 1 != policies.len() {
            return Err(OrderingError::RelationLength {
                policies: policies.len(),
                relations: relations.len(),
            });
        }
        Ok(Self {
            policies,
            relations,
        })
    }

    /// The policy permutation.
    pub fn policies(&self) -> &[Policy<A>] {
        &self.policies
    }

    /// The adjacent relation pattern.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Number of policies.
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Whether the ordering is empty.
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Human-readable inequality string, e.g. `"p00 = p01 < p10"`.
    ///
    /// This is the deterministic label contract consumed by external graph
    /// renderers; the core never depends on how it is laid out.
    pub fn label(&self) -> String {
        let mut out = String::new();
        for (i, policy) in self.policies.iter().enumerate() {
            if i > 0 {
                out.push_str(self.relations[i - 1].symbol());
            }
            out.push_str(&policy.name().to_string());
        }
        out
    }

    /// The ordered partition of policies into tied groups.
    ///
    /// Consecutive policies related by [`Relation::Equal`] merge into the
    /// same group; [`Relation::Less`] starts a new group. Derived on demand
    /// and never stored, so it cannot drift out of sync with the relations.
    pub fn set_representation(&self) -> Result<Vec<BTreeSet<PolicyName>>, OrderingError> {
        let mut groups: Vec<BTreeSet<PolicyName>> = Vec::new();
        let mut first = BTreeSet::new();
        first.insert(self.policies[0].name().clone());
        groups.push(first);

        for (i, policy) in self.policies.iter().enumerate().skip(1) {
            match self.relations[i - 1] {
                Relation::Equal => {
                    groups
                        .last_mut()
                        .expect("groups is never empty")
                        .insert(policy.name().clone());
                }
                Relation::Less => {
                    let mut group = BTreeSet::new();
                    group.insert(policy.name().clone());
                    groups.push(group);
                }
                Relation::Unspecified => return Err(OrderingError::UnspecifiedRelation),
            }
        }
        Ok(groups)
    }

    /// Serializable summary of this ordering.
    pub fn record(&self) -> OrderingRecord {
        OrderingRecord {
            policies: self.policies.iter().map(|p| p.name().clone()).collect(),
            relations: self.relations.clone(),
        }
    }

    /// Lexicographic key over the permutation's names, used to pick one
    /// representative per equivalence class.
    fn name_key(&self) -> Vec<&PolicyName> {
        self.policies.iter().map(|p| p.name()).collect()
    }
}

impl<A> Clone for PolicyOrdering<A> {
    fn clone(&self) -> Self {
        Self {
            policies: self.policies.clone(),
            relations: self.relations.clone(),
        }
    }
}

impl<A> fmt::Debug for PolicyOrdering<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PolicyOrdering({})", self.label())
    }
}

impl<A> PartialEq for PolicyOrdering<A> {
    fn eq(&self, other: &Self) -> bool {
        self.policies == other.policies && self.relations == other.relations
    }
}

impl<A> Eq for PolicyOrdering<A> {}

impl<A> PartialOrd for PolicyOrdering<A> {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for PolicyOrdering<A> {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.policies
            .cmp(&other.policies)
            .then_with(|| self.relations_key().cmp(&other.relations_key()))
    }
}

impl<A> PolicyOrdering<A> {
    fn relations_key(&self) -> Vec<u8> {
        self.relations
            .iter()
            .map(|r| match r {
                Relation::Equal => 0,
                Relation::Less => 1,
                Relation::Unspecified => 2,
            })
            .collect()
    }
}

/// A serializable (names, relations) summary of a [`PolicyOrdering`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderingRecord {
    pub policies: Vec<PolicyName>,
    pub relations: Vec<Relation>,
}

/// Index of the group containing `policy`, in an ordered partition.
///
/// A policy missing from every group is a logic error upstream and fails
/// loudly rather than returning a wrong index.
pub fn group_index(
    policy: &PolicyName,
    groups: &[BTreeSet<PolicyName>],
) -> Result<usize, OrderingError> {
    groups
        .iter()
        .position(|g| g.contains(policy))
        .ok_or_else(|| OrderingError::PolicyNotFound {
            policy: policy.to_string(),
        })
}

/// Two orderings are equivalent iff their relation tuples are identical and
/// their set representations match group for group.
pub fn check_equivalent<A>(
    a: &PolicyOrdering<A>,
    b: &PolicyOrdering<A>,
) -> Result<bool, OrderingError> {
    if a.relations() != b.relations() {
        return Ok(false);
    }
    Ok(a.set_representation()? == b.set_representation()?)
}

/// Deduplicate a collection of orderings to one representative per
/// equivalence class, keeping the lexicographically smaller permutation.
///
/// Survivors come back in their input order.
pub fn remove_equivalent<A>(
    entries: &[PolicyOrdering<A>],
) -> Result<Vec<PolicyOrdering<A>>, OrderingError> {
    let mut removed = vec![false; entries.len()];
    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            if removed[i] || removed[j] {
                continue;
            }
            if check_equivalent(&entries[i], &entries[j])? {
                if entries[i].name_key() > entries[j].name_key() {
                    removed[i] = true;
                } else {
                    removed[j] = true;
                }
            }
        }
    }
    Ok(entries
        .iter()
        .zip(removed.iter())
        .filter(|(_, r)| !**r)
        .map(|(e, _)| e.clone())
        .collect())
}
