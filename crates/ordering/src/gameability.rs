//! Gameability: does one ranking reverse another's strict preferences?
//!
//! A proxy (narrow) reward function is *gameable* against a true (holistic)
//! one when the two disagree in direction on some pair: the proxy prefers an
//! option the true reward ranks strictly worse. This module provides the
//! solver-free check at three levels: raw value vectors, concrete reward
//! functions over an action set, and realized (ordering, relation) pairs
//! via their set representations.
//!
//! [`check_ungameable`] is deliberately one-directional: it iterates the
//! *first* ordering's policies and looks them up in the second's partition.
//! Callers wanting a symmetric relationship must check both directions (and
//! with differing policy supports the two directions can genuinely
//! disagree).

use crate::error::OrderingError;
use crate::ordering::{group_index, PolicyOrdering};

/// Direction disagreement between two raw value vectors, indexed alike.
///
/// Returns true iff some pair of positions is strictly ordered one way by
/// `values_a` and the opposite way by `values_b`.
pub fn check_gameable(values_a: &[f64], values_b: &[f64]) -> bool {
    assert_eq!(
        values_a.len(),
        values_b.len(),
        "value vectors must rank the same policies"
    );
    for i in 0..values_a.len() {
        for j in 0..values_a.len() {
            if i == j {
                continue;
            }
            if values_a[i] < values_a[j] && values_b[i] > values_b[j] {
                return true;
            }
        }
    }
    false
}

/// Is the narrow reward function ungameable against the holistic one over
/// this action set?
///
/// True iff no pair of actions is ranked strictly one way by the holistic
/// reward and strictly the other way by the narrow one.
pub fn reward_pair_ungameable<A>(
    holistic: &dyn Fn(&A) -> f64,
    narrow: &dyn Fn(&A) -> f64,
    actions: &[A],
) -> bool {
    let h: Vec<f64> = actions.iter().map(|a| holistic(a)).collect();
    let n: Vec<f64> = actions.iter().map(|a| narrow(a)).collect();
    !check_gameable(&h, &n)
}

/// One-directional ungameability between two realized orderings.
///
/// For every pair of `a`'s policies strictly ordered in `a`'s partition, the
/// pair must not be strictly ordered the opposite way in `b`'s. A policy of
/// `a` missing from `b`'s partition is an error, never a silent skip.
pub fn check_ungameable<A>(
    a: &PolicyOrdering<A>,
    b: &PolicyOrdering<A>,
) -> Result<bool, OrderingError> {
    let groups_a = a.set_representation()?;
    let groups_b = b.set_representation()?;

    for p1 in a.policies() {
        for p2 in a.policies() {
            if p1 == p2 {
                continue;
            }
            let idx1_a = group_index(p1.name(), &groups_a)?;
            let idx2_a = group_index(p2.name(), &groups_a)?;
            let idx1_b = group_index(p1.name(), &groups_b)?;
            let idx2_b = group_index(p2.name(), &groups_b)?;
            if idx1_a < idx2_a && idx1_b > idx2_b {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// All ordered index pairs `(i, j)`, `i ≠ j`, where `entries[i]` is
/// ungameable against `entries[j]`.
pub fn ungameable_pairs<A>(
    entries: &[PolicyOrdering<A>],
) -> Result<Vec<(usize, usize)>, OrderingError> {
    let mut pairs = Vec::new();
    for i in 0..entries.len() {
        for j in 0..entries.len() {
            if i != j && check_ungameable(&entries[i], &entries[j])? {
                pairs.push((i, j));
            }
        }
    }
    Ok(pairs)
}
