//! Simplification: is one ranking a strict coarsening of another?
//!
//! An ordering `a` *simplifies* an ordering `b` when `a` keeps every
//! distinction `b` makes pointing the same way or merges it into a tie,
//! never reverses one, splits no tie of `b`, and merges at least one pair
//! `b` ranks strictly. Equivalent orderings are therefore not
//! simplifications of each other: the coarsening must be proper.

use crate::error::OrderingError;
use crate::ordering::{group_index, PolicyOrdering};

/// Is `a` a strict coarsening of `b`?
///
/// Walks every ordered pair of `b`'s policies through both set
/// representations. Fails with [`OrderingError::PolicyNotFound`] when the
/// two orderings do not range over the same policies.
pub fn check_simplification<A>(
    a: &PolicyOrdering<A>,
    b: &PolicyOrdering<A>,
) -> Result<bool, OrderingError> {
    let groups_a = a.set_representation()?;
    let groups_b = b.set_representation()?;

    let mut merged_a_pair = false;
    for p1 in b.policies() {
        for p2 in b.policies() {
            if p1 == p2 {
                continue;
            }
            let idx1_b = group_index(p1.name(), &groups_b)?;
            let idx2_b = group_index(p2.name(), &groups_b)?;
            let idx1_a = group_index(p1.name(), &groups_a)?;
            let idx2_a = group_index(p2.name(), &groups_a)?;

            // A strict pair may not flip, a tie may not split.
            if idx1_b < idx2_b && idx1_a > idx2_a {
                return Ok(false);
            }
            if idx1_b == idx2_b && idx1_a != idx2_a {
                return Ok(false);
            }
            if idx1_a == idx2_a && idx1_b != idx2_b {
                merged_a_pair = true;
            }
        }
    }
    Ok(merged_a_pair)
}

/// All ordered index pairs `(i, j)`, `i ≠ j`, where `entries[i]` is a
/// simplification of `entries[j]`.
pub fn simplification_pairs<A>(
    entries: &[PolicyOrdering<A>],
) -> Result<Vec<(usize, usize)>, OrderingError> {
    let mut pairs = Vec::new();
    for i in 0..entries.len() {
        for j in 0..entries.len() {
            if i != j && check_simplification(&entries[i], &entries[j])? {
                pairs.push((i, j));
            }
        }
    }
    Ok(pairs)
}
