//! End-to-end ordering searches on the two reference domains.
//!
//! These tests run the real pipeline: build an environment and a reward
//! family, search for realizable (ordering, relation) pairs, and check the
//! witnesses by re-evaluating the policies under the rewards the solver
//! found.

use reward_mdp::{LinearRewardFamily, MdpEnv, Policy, RewardFamily, TabularRewardFamily};
use reward_ordering::{
    check_ungameable, full_ordering_search, group_index, realize_ordering, remove_equivalent,
    simplification_pairs, EdgeKind, OrderingGraph, PolicyOrdering, Relation, SearchOptions,
};

// ============================================================================
// Two-state MDP: tabular rewards, discount 0.5
// ============================================================================

/// Deterministic two-state dynamics: the chosen action is the next state.
/// A short horizon keeps rollouts cheap; 0.5^60 is far below solver
/// tolerance.
fn two_state_env() -> MdpEnv<usize> {
    MdpEnv::new(|_state, action: &usize| *action, 0.5, 2, 2)
        .unwrap()
        .with_horizon(60)
}

fn two_state_policies() -> Vec<Policy<usize>> {
    vec![
        Policy::tabular(&[0, 0]),
        Policy::tabular(&[0, 1]),
        Policy::tabular(&[1, 0]),
        Policy::tabular(&[1, 1]),
    ]
}

#[test]
fn two_state_mixed_pattern_is_realizable_and_sound() {
    let env = two_state_env();
    let family = TabularRewardFamily::new(2, 2);
    let policies = two_state_policies();

    // p00 < p01 = p10 < p11: the ordering the symmetric reward table
    // [[0, 0], [1, 1]] induces, so a witness must exist.
    let ordering = PolicyOrdering::new(
        policies.clone(),
        vec![Relation::Less, Relation::Equal, Relation::Less],
    )
    .unwrap();

    let report =
        realize_ordering(&ordering, &[], &family, &env, &SearchOptions::default()).unwrap();
    assert!(report.success, "violation {}", report.max_violation);

    // Soundness: re-evaluate the policies under the witness reward and
    // check the claimed pattern, up to solver tolerance.
    let reward = family.build(&report.dec_vars);
    let values = env.all_average_values(&policies, reward.as_ref());
    assert!(values[0] <= values[1] + 1e-5);
    assert!((values[1] - values[2]).abs() <= 1e-4);
    assert!(values[2] <= values[3] + 1e-5);
}

#[test]
fn two_state_strict_chain_is_realizable() {
    let env = two_state_env();
    let family = TabularRewardFamily::new(2, 2);
    let policies = two_state_policies();

    let ordering = PolicyOrdering::new(
        policies.clone(),
        vec![Relation::Less, Relation::Less, Relation::Less],
    )
    .unwrap();

    let report =
        realize_ordering(&ordering, &[], &family, &env, &SearchOptions::default()).unwrap();
    assert!(report.success, "violation {}", report.max_violation);

    let reward = family.build(&report.dec_vars);
    let values = env.all_average_values(&policies, reward.as_ref());
    for w in values.windows(2) {
        assert!(w[0] <= w[1] + 1e-5);
    }
}

#[test]
fn two_state_extra_equality_pairs_bind() {
    let env = two_state_env();
    let family = TabularRewardFamily::new(2, 2);

    // Order only p00 against p11, but force p01 and p10 to tie.
    let ordering = PolicyOrdering::new(
        vec![Policy::tabular(&[0, 0]), Policy::tabular(&[1, 1])],
        vec![Relation::Less],
    )
    .unwrap();
    let equal_pairs = vec![(Policy::tabular(&[0, 1]), Policy::tabular(&[1, 0]))];

    let report =
        realize_ordering(&ordering, &equal_pairs, &family, &env, &SearchOptions::default())
            .unwrap();
    assert!(report.success, "violation {}", report.max_violation);

    let reward = family.build(&report.dec_vars);
    let v01 = env.average_value(&Policy::tabular(&[0, 1]), reward.as_ref());
    let v10 = env.average_value(&Policy::tabular(&[1, 0]), reward.as_ref());
    assert!((v01 - v10).abs() <= 1e-4);
}

// ============================================================================
// Cleaning robot: one-state bandit, linear rewards over room flags
// ============================================================================

/// One state, discount 0: the value of a policy is exactly the reward of
/// its single action. Actions are binary room flags, rewards are
/// non-negative weighted sums of the flags.
fn robot_env() -> MdpEnv<Vec<f64>> {
    MdpEnv::new(|_state, _action: &Vec<f64>| 0, 0.0, 1, 8)
        .unwrap()
        .with_nonnegative_reward()
}

/// p001 cleans only the third room, p110 the first two, p111 all three.
fn robot_policies() -> Vec<Policy<Vec<f64>>> {
    vec![
        Policy::constant_flags(&[0, 0, 1]),
        Policy::constant_flags(&[1, 1, 0]),
        Policy::constant_flags(&[1, 1, 1]),
    ]
}

#[test]
fn robot_full_search_finds_exactly_the_consistent_orderings() {
    let env = robot_env();
    let family = LinearRewardFamily::new(3);
    let policies = robot_policies();

    let realized =
        full_ordering_search(&policies, &family, &env, &SearchOptions::default()).unwrap();

    // v(p111) = v(p001) + v(p110) under non-negative weights, so p111 can
    // never sit strictly below either of the others, and fully tied
    // patterns are never realizable. That cuts 24 combinations down to 8,
    // which collapse into 5 equivalence classes.
    assert!(realized.len() < 24);

    let orderings: Vec<PolicyOrdering<Vec<f64>>> =
        realized.iter().map(|r| r.ordering.clone()).collect();
    for ordering in &orderings {
        let groups = ordering.set_representation().unwrap();
        let last = groups.len() - 1;
        assert_eq!(
            group_index(Policy::constant_flags(&[1, 1, 1]).name(), &groups).unwrap(),
            last,
            "p111 must always rank at the top: {}",
            ordering.label()
        );
        assert!(
            !ordering.relations().iter().all(|r| *r == Relation::Equal),
            "fully tied pattern should be unrealizable: {}",
            ordering.label()
        );
    }

    let distinct = remove_equivalent(&orderings).unwrap();
    let mut labels: Vec<String> = distinct.iter().map(|o| o.label()).collect();
    labels.sort();
    assert_eq!(
        labels,
        vec![
            "p001 < p110 < p111",
            "p001 < p110 = p111",
            "p001 = p110 < p111",
            "p110 < p001 < p111",
            "p110 < p001 = p111",
        ]
    );
}

#[test]
fn robot_strict_chains_ranking_p111_below_are_rejected() {
    // v(p111) = v(p001) + v(p110) under non-negative weights, so a strict
    // chain placing p111 below either other policy has no witness. The
    // acceptance tolerance must not wash out the strictness floor here.
    let env = robot_env();
    let family = LinearRewardFamily::new(3);

    let impossible = [
        vec![
            Policy::constant_flags(&[0, 0, 1]),
            Policy::constant_flags(&[1, 1, 1]),
            Policy::constant_flags(&[1, 1, 0]),
        ],
        vec![
            Policy::constant_flags(&[1, 1, 0]),
            Policy::constant_flags(&[1, 1, 1]),
            Policy::constant_flags(&[0, 0, 1]),
        ],
    ];
    for permutation in impossible {
        let ordering =
            PolicyOrdering::new(permutation, vec![Relation::Less, Relation::Less]).unwrap();
        let report =
            realize_ordering(&ordering, &[], &family, &env, &SearchOptions::default()).unwrap();
        assert!(
            !report.success,
            "{} certified with violation {}",
            ordering.label(),
            report.max_violation
        );
    }
}

#[test]
fn robot_witnesses_reproduce_their_orderings() {
    let env = robot_env();
    let family = LinearRewardFamily::new(3);
    let policies = robot_policies();

    let realized =
        full_ordering_search(&policies, &family, &env, &SearchOptions::default()).unwrap();
    assert!(!realized.is_empty());

    for r in &realized {
        let reward = family.build(&r.reward_params);
        let values = env.all_average_values(r.ordering.policies(), reward.as_ref());
        for (i, rel) in r.ordering.relations().iter().enumerate() {
            match rel {
                Relation::Less => assert!(
                    values[i] < values[i + 1],
                    "{}: {} vs {}",
                    r.ordering.label(),
                    values[i],
                    values[i + 1]
                ),
                Relation::Equal => assert!(
                    (values[i + 1] - values[i]).abs() <= 1e-4,
                    "{}: {} vs {}",
                    r.ordering.label(),
                    values[i],
                    values[i + 1]
                ),
                Relation::Unspecified => unreachable!("search emits specified patterns"),
            }
        }
    }
}

#[test]
fn robot_classification_pipeline_runs_end_to_end() {
    let env = robot_env();
    let family = LinearRewardFamily::new(3);
    let policies = robot_policies();

    let realized =
        full_ordering_search(&policies, &family, &env, &SearchOptions::default()).unwrap();
    let orderings: Vec<PolicyOrdering<Vec<f64>>> =
        realized.iter().map(|r| r.ordering.clone()).collect();
    let distinct = remove_equivalent(&orderings).unwrap();

    // Coarsenings of the p001-first chain never reverse it; the p110-first
    // chain does, in both directions.
    let chain = PolicyOrdering::new(policies.clone(), vec![Relation::Less, Relation::Less]).unwrap();
    let merged_top = PolicyOrdering::new(
        vec![
            Policy::constant_flags(&[0, 0, 1]),
            Policy::constant_flags(&[1, 1, 0]),
            Policy::constant_flags(&[1, 1, 1]),
        ],
        vec![Relation::Equal, Relation::Less],
    )
    .unwrap();
    let swapped = PolicyOrdering::new(
        vec![
            Policy::constant_flags(&[1, 1, 0]),
            Policy::constant_flags(&[0, 0, 1]),
            Policy::constant_flags(&[1, 1, 1]),
        ],
        vec![Relation::Less, Relation::Less],
    )
    .unwrap();
    assert!(check_ungameable(&merged_top, &chain).unwrap());
    assert!(check_ungameable(&chain, &merged_top).unwrap());
    assert!(!check_ungameable(&swapped, &chain).unwrap());
    assert!(!check_ungameable(&chain, &swapped).unwrap());

    let pairs = simplification_pairs(&distinct).unwrap();
    assert!(!pairs.is_empty(), "coarsenings of the strict chains exist");

    let graph = OrderingGraph::from_pairs(&distinct, &pairs, EdgeKind::Simplification);
    assert_eq!(graph.node_count(), distinct.len());
    assert_eq!(graph.edge_count(), pairs.len());
    for (from, to) in graph.edge_list() {
        assert_ne!(from, to);
    }
}
