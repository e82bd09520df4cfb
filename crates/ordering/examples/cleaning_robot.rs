//! Cleaning Robot — Full Search and Classification Pipeline
//!
//! Run with: cargo run -p reward-ordering --example cleaning_robot
//!
//! A one-state bandit: in a single step the robot cleans some subset of
//! three rooms, encoded as a binary flag vector, and the reward is a
//! non-negative weighted sum of the flags. Because the value of the
//! clean-everything policy is the sum of the other two policy values, most
//! rankings are structurally impossible; the full search finds exactly the
//! consistent ones, and the classification passes relate them to each
//! other.

use reward_mdp::{LinearRewardFamily, MdpEnv, Policy};
use reward_ordering::{
    full_ordering_search, random_ordering_search, remove_equivalent, simplification_pairs,
    ungameable_pairs, EdgeKind, OrderingGraph, PolicyOrdering, SearchOptions,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Cleaning Robot: Full Ordering Search ===\n");

    // One state, discount 0: a policy's value is the reward of its single
    // action. Weights are constrained non-negative.
    let env = MdpEnv::new(|_state, _action: &Vec<f64>| 0, 0.0, 1, 8)
        .expect("valid discount and state space")
        .with_nonnegative_reward();
    let family = LinearRewardFamily::new(3);
    let policies = vec![
        Policy::constant_flags(&[0, 0, 1]),
        Policy::constant_flags(&[1, 1, 0]),
        Policy::constant_flags(&[1, 1, 1]),
    ];

    println!("Policies (rooms cleaned): p001, p110, p111");
    println!("Reward: r(flags) = flags · weights, weights >= 0");
    println!("Structural fact: v(p111) = v(p001) + v(p110)\n");

    // -------------------------------------------------------------------------
    // 1. Exhaustive search
    // -------------------------------------------------------------------------
    println!("1. Exhaustive Search");
    println!("--------------------\n");

    let options = SearchOptions::default();
    let realized = full_ordering_search(&policies, &family, &env, &options)
        .expect("well-formed search");
    println!(
        "  {} of 24 (permutation, pattern) combinations realizable\n",
        realized.len()
    );

    // -------------------------------------------------------------------------
    // 2. Collapse equivalent orderings
    // -------------------------------------------------------------------------
    println!("2. Equivalence Classes");
    println!("----------------------\n");

    let orderings: Vec<PolicyOrdering<Vec<f64>>> =
        realized.iter().map(|r| r.ordering.clone()).collect();
    let distinct = remove_equivalent(&orderings).expect("specified patterns");
    println!("  {} distinct orderings:", distinct.len());
    for o in &distinct {
        println!("    {}", o.label());
    }
    println!();

    // -------------------------------------------------------------------------
    // 3. Ungameability and simplification
    // -------------------------------------------------------------------------
    println!("3. Classification");
    println!("-----------------\n");

    let ungameable = ungameable_pairs(&distinct).expect("shared policy support");
    println!("  Ungameable pairs (no strict preference reversed):");
    for &(i, j) in &ungameable {
        println!("    {}  vs  {}", distinct[i].label(), distinct[j].label());
    }
    println!();

    let simplifications = simplification_pairs(&distinct).expect("shared policy support");
    println!("  Simplifications (strict coarsenings):");
    for &(i, j) in &simplifications {
        println!(
            "    {}  simplifies  {}",
            distinct[i].label(),
            distinct[j].label()
        );
    }
    println!();

    // -------------------------------------------------------------------------
    // 4. Randomized pre-filter
    // -------------------------------------------------------------------------
    println!("4. Randomized Pre-Filter");
    println!("------------------------\n");

    // Sampling reward weights and reading off the induced sorted order is a
    // cheap, solver-free way to discover reachable permutations. It cannot
    // certify relation patterns and may miss boundary permutations.
    let sampled = random_ordering_search(&policies, &family, &env, 500, 42);
    println!(
        "  {} permutation(s) reached by 500 sampled weight vectors:",
        sampled.len()
    );
    for perm in &sampled {
        let names: Vec<String> = perm.iter().map(|p| p.name().to_string()).collect();
        println!("    {}", names.join(" <= "));
    }
    println!();

    // -------------------------------------------------------------------------
    // 5. Graph export
    // -------------------------------------------------------------------------
    println!("5. Graph Export");
    println!("---------------\n");

    let graph = OrderingGraph::from_pairs(&distinct, &simplifications, EdgeKind::Simplification);
    println!("{}", graph);

    // Records serialize cleanly for external tooling.
    let records: Vec<_> = distinct.iter().map(|o| o.record()).collect();
    match serde_json::to_string_pretty(&records) {
        Ok(json) => println!("Ordering records as JSON:\n{}", json),
        Err(err) => eprintln!("serialization failed: {}", err),
    }

    println!("\n=== Done ===");
}
