//! Feasibility solver: one constrained search per (permutation, relation).
//!
//! The canonical contract is a pure feasibility check with a zero objective:
//! find *any* decision vector where every equality is ~0 and every inequality
//! is ≥ 0. The search minimizes a quadratic merit function
//!
//! ```text
//! merit(x) = Σ eq_i(x)²  +  Σ max(0, -ineq_j(x))²
//! ```
//!
//! by finite-difference gradient descent with Armijo backtracking, starting
//! from a vector of ones. A single call, no retries, no multi-start: failure
//! means "no reward function found", which is a conservative
//! under-approximation: the feasible set may be nonempty even when the
//! solver gives up. That false-negative behavior is a documented limitation
//! of the engine, not a bug.
//!
//! [`solve_with_slack`] is the optional refinement that first biases the
//! search toward large total slack (well-separated policy values), then
//! polishes for pure feasibility.

/// Knobs for one feasibility search.
#[derive(Debug, Clone)]
pub struct FeasibilityOptions {
    /// Iteration cap for the descent loop.
    pub max_iters: usize,
    /// Max constraint violation accepted as "feasible".
    pub tolerance: f64,
    /// Relative finite-difference step.
    pub fd_step: f64,
    /// Initial line-search step.
    pub initial_step: f64,
    /// Weight of the slack-maximizing term in [`solve_with_slack`].
    pub slack_weight: f64,
}

impl Default for FeasibilityOptions {
    fn default() -> Self {
        Self {
            max_iters: 2000,
            tolerance: 1e-6,
            fd_step: 1e-6,
            initial_step: 1.0,
            slack_weight: 1e-3,
        }
    }
}

/// Outcome of a feasibility search.
#[derive(Debug, Clone)]
pub struct FeasibilityReport {
    /// Whether a point within tolerance was found.
    pub success: bool,
    /// The final decision vector (meaningful only on success).
    pub dec_vars: Vec<f64>,
    /// Max constraint violation at the final point.
    pub max_violation: f64,
    /// Descent iterations spent.
    pub iterations: usize,
}

/// Max violation across both constraint families at `x`.
fn violation(eq: &[f64], ineq: &[f64]) -> f64 {
    let eq_v = eq.iter().fold(0.0f64, |m, e| m.max(e.abs()));
    let ineq_v = ineq.iter().fold(0.0f64, |m, g| m.max(-g));
    eq_v.max(ineq_v.max(0.0))
}

/// Pure feasibility: zero objective, early exit as soon as the constraint
/// violation drops below tolerance.
pub fn solve_feasibility(
    equalities: impl Fn(&[f64]) -> Vec<f64>,
    inequalities: impl Fn(&[f64]) -> Vec<f64>,
    num_vars: usize,
    options: &FeasibilityOptions,
) -> FeasibilityReport {
    let x0 = vec![1.0; num_vars];
    descend(&equalities, &inequalities, x0, 0.0, 0, true, options)
}

/// Feasibility with a mild preference for large total slack.
///
/// The trailing `num_slack` decision variables are the epsilons; phase one
/// subtracts `slack_weight · Σ eps` from the merit (pushing values apart),
/// phase two polishes with a zero objective so the slack bias cannot leave
/// the point outside tolerance.
pub fn solve_with_slack(
    equalities: impl Fn(&[f64]) -> Vec<f64>,
    inequalities: impl Fn(&[f64]) -> Vec<f64>,
    num_vars: usize,
    num_slack: usize,
    options: &FeasibilityOptions,
) -> FeasibilityReport {
    let x0 = vec![1.0; num_vars];
    let half = FeasibilityOptions {
        max_iters: options.max_iters / 2,
        ..options.clone()
    };
    let phase1 = descend(
        &equalities,
        &inequalities,
        x0,
        options.slack_weight,
        num_slack,
        false,
        &half,
    );
    let polish = descend(
        &equalities,
        &inequalities,
        phase1.dec_vars,
        0.0,
        0,
        true,
        &half,
    );
    FeasibilityReport {
        iterations: phase1.iterations + polish.iterations,
        ..polish
    }
}

/// Gradient descent with backtracking on the penalty merit function.
#[allow(clippy::too_many_arguments)]
fn descend(
    equalities: &impl Fn(&[f64]) -> Vec<f64>,
    inequalities: &impl Fn(&[f64]) -> Vec<f64>,
    mut x: Vec<f64>,
    slack_weight: f64,
    num_slack: usize,
    exit_on_feasible: bool,
    options: &FeasibilityOptions,
) -> FeasibilityReport {
    let merit = |x: &[f64]| -> f64 {
        let eq = equalities(x);
        let ineq = inequalities(x);
        let penalty: f64 = eq.iter().map(|e| e * e).sum::<f64>()
            + ineq
                .iter()
                .map(|g| {
                    let v = (-g).max(0.0);
                    v * v
                })
                .sum::<f64>();
        let slack: f64 = x[x.len() - num_slack..].iter().sum();
        penalty - slack_weight * slack
    };

    let n = x.len();
    let mut step = options.initial_step;
    let mut iterations = 0;

    for iter in 0..options.max_iters {
        iterations = iter;

        if exit_on_feasible {
            let v = violation(&equalities(&x), &inequalities(&x));
            if v <= options.tolerance {
                return FeasibilityReport {
                    success: true,
                    dec_vars: x,
                    max_violation: v,
                    iterations,
                };
            }
        }

        let f0 = merit(&x);

        // Central-difference gradient.
        let mut grad = vec![0.0; n];
        for i in 0..n {
            let h = options.fd_step * (1.0 + x[i].abs());
            let mut xp = x.clone();
            let mut xm = x.clone();
            xp[i] += h;
            xm[i] -= h;
            grad[i] = (merit(&xp) - merit(&xm)) / (2.0 * h);
        }
        let gnorm2: f64 = grad.iter().map(|g| g * g).sum();
        if gnorm2 < 1e-20 {
            break; // stationary: either done or stuck at an infeasible minimum
        }

        // Armijo backtracking line search.
        let mut t = step;
        let mut accepted = false;
        while t > 1e-16 {
            let x1: Vec<f64> = x.iter().zip(grad.iter()).map(|(xi, gi)| xi - t * gi).collect();
            let f1 = merit(&x1);
            if f1.is_finite() && f1 <= f0 - 1e-4 * t * gnorm2 {
                x = x1;
                step = (t * 2.0).min(4.0);
                accepted = true;
                break;
            }
            t *= 0.5;
        }
        if !accepted {
            break; // no descent direction at line-search resolution
        }
    }

    let v = violation(&equalities(&x), &inequalities(&x));
    FeasibilityReport {
        success: v <= options.tolerance,
        dec_vars: x,
        max_violation: v,
        iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feasible_linear_system() {
        // x0 + x1 = 2, x0 >= 0.5: plainly feasible from the all-ones start.
        let report = solve_feasibility(
            |x| vec![x[0] + x[1] - 2.0],
            |x| vec![x[0] - 0.5],
            2,
            &FeasibilityOptions::default(),
        );
        assert!(report.success);
        let x = &report.dec_vars;
        assert!((x[0] + x[1] - 2.0).abs() <= 1e-6);
        assert!(x[0] >= 0.5 - 1e-6);
    }

    #[test]
    fn test_infeasible_system_reports_failure() {
        // x0 = 1 and x0 <= -1 cannot both hold.
        let report = solve_feasibility(
            |x| vec![x[0] - 1.0],
            |x| vec![-x[0] - 1.0],
            1,
            &FeasibilityOptions::default(),
        );
        assert!(!report.success);
        assert!(report.max_violation > 1e-3);
    }

    #[test]
    fn test_pure_feasibility_needs_no_descent_when_start_is_feasible() {
        // The all-ones start already satisfies x0 >= 0.
        let report = solve_feasibility(
            |_x| vec![],
            |x| vec![x[0]],
            1,
            &FeasibilityOptions::default(),
        );
        assert!(report.success);
        assert_eq!(report.iterations, 0);
    }

    #[test]
    fn test_slack_preference_widens_the_gap() {
        // 0 <= x1 <= 1 with x1 counted as slack: the refinement should pull
        // x1 toward its upper bound rather than settling at the start.
        let report = solve_with_slack(
            |_x| vec![],
            |x| vec![x[1], 1.0 - x[1]],
            2,
            1,
            &FeasibilityOptions::default(),
        );
        assert!(report.success);
        assert!(report.dec_vars[1] > 0.5);
    }

    #[test]
    fn test_strict_floor_constraints_hold_exactly() {
        // Per-slot and sum floor style constraints resolve within tolerance.
        let report = solve_feasibility(
            |x| vec![x[0] - x[1]],
            |x| vec![x[1] - 1e-5, x[0] + x[1] - 1e-4],
            2,
            &FeasibilityOptions::default(),
        );
        assert!(report.success);
        // The floor exceeds the tolerance, so the slot stays positive even
        // at the edge of acceptance.
        assert!(report.dec_vars[1] >= 1e-5 - 1e-6);
        assert!(report.dec_vars[1] > 0.0);
    }
}
