//! A perturbation-descent solver for testing.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::model::{Model, ObjectiveSense, Variable};

use super::config::SolverConfig;
use super::types::{NlpSolver, SolveResult, SolveStatus};

/// A random-restart perturbation-descent solver.
///
/// Reduces total constraint violation first, then descends the objective
/// while preserving feasibility. The first start uses the model's warm
/// start (falling back to domain midpoints); further restarts begin from
/// random points. This is a trivial heuristic for tests and smoke runs,
/// not a real NLP solver.
///
/// # Limitations
///
/// - Never proves optimality or infeasibility: the status is `Feasible`,
///   `Timeout`, or `Unknown`.
/// - Purely local moves; on nonconvex models the result depends on the
///   starting points.
pub struct SimpleNlpSolver;

impl SimpleNlpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimpleNlpSolver {
    fn default() -> Self {
        Self::new()
    }
}

struct RunOutcome {
    values: Vec<f64>,
    violation: f64,
    objective_key: f64,
    iterations: usize,
    timed_out: bool,
}

impl NlpSolver for SimpleNlpSolver {
    /// # Panics
    /// Panics if the configuration is invalid (call [`SolverConfig::validate`]
    /// first to get a descriptive error).
    fn solve(&self, model: &Model, config: &SolverConfig) -> SolveResult {
        config.validate().expect("invalid SolverConfig");

        let start_time = Instant::now();
        if model.validate().is_err() {
            return SolveResult::empty(SolveStatus::ModelInvalid);
        }
        if model.variable_count() == 0 {
            return SolveResult {
                status: SolveStatus::Feasible,
                objective_value: Some(0.0),
                values: Vec::new(),
                solve_time_ms: start_time.elapsed().as_millis() as i64,
                iterations: 0,
            };
        }

        let deadline = start_time + Duration::from_millis(config.time_limit_ms as u64);
        let base_seed = config.seed.unwrap_or_else(rand::random);
        let budget = (config.max_iterations / config.restarts).max(1);
        let first_start = starting_point(model);

        let run = |k: usize| -> RunOutcome {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(k as u64));
            let start = if k == 0 {
                first_start.clone()
            } else {
                random_point(model, &mut rng)
            };
            descend(model, start, budget, deadline, &mut rng)
        };

        #[cfg(feature = "parallel")]
        let runs: Vec<RunOutcome> = (0..config.restarts).into_par_iter().map(run).collect();
        #[cfg(not(feature = "parallel"))]
        let runs: Vec<RunOutcome> = (0..config.restarts).map(run).collect();

        let iterations: usize = runs.iter().map(|r| r.iterations).sum();
        let timed_out = runs.iter().any(|r| r.timed_out);

        let mut best: Option<RunOutcome> = None;
        for r in runs {
            let better = match &best {
                None => true,
                Some(b) => (r.violation, r.objective_key) < (b.violation, b.objective_key),
            };
            if better {
                best = Some(r);
            }
        }
        let Some(best) = best else {
            return SolveResult::empty(SolveStatus::Unknown);
        };

        let feasible = best.violation == 0.0 || model.is_feasible(&best.values, config.tolerance);
        let status = if feasible {
            SolveStatus::Feasible
        } else if timed_out {
            SolveStatus::Timeout
        } else {
            SolveStatus::Unknown
        };
        SolveResult {
            status,
            objective_value: feasible.then(|| model.objective_value(&best.values)),
            values: best.values,
            solve_time_ms: start_time.elapsed().as_millis() as i64,
            iterations,
        }
    }
}

/// One descent run: accept a move when it lowers the violation, or keeps
/// the violation and lowers the objective. From a feasible point this
/// never leaves the feasible region, so the objective is monotone.
fn descend(
    model: &Model,
    mut values: Vec<f64>,
    budget: usize,
    deadline: Instant,
    rng: &mut StdRng,
) -> RunOutcome {
    let n = values.len();
    let sense = model.objective_sense();
    let spans: Vec<f64> = model.variables().iter().map(variable_span).collect();

    let mut violation = model.violation(&values);
    let mut objective = objective_key(sense, model.objective_value(&values));
    let mut step = 0.25;
    let mut stagnation = 0usize;
    let mut iterations = 0usize;
    let mut timed_out = false;

    for _ in 0..budget {
        if Instant::now() >= deadline {
            timed_out = true;
            break;
        }
        iterations += 1;

        let i = rng.random_range(0..n);
        let var = &model.variables()[i];
        let old = values[i];
        let candidate = (old + step * spans[i] * rng.random_range(-1.0..1.0))
            .clamp(var.lower, var.upper);
        if candidate == old {
            stagnation += 1;
        } else {
            values[i] = candidate;
            let cand_violation = model.violation(&values);
            let cand_objective = objective_key(sense, model.objective_value(&values));
            let accept = cand_violation < violation
                || (cand_violation == violation && cand_objective < objective);
            if accept {
                violation = cand_violation;
                objective = cand_objective;
                stagnation = 0;
            } else {
                values[i] = old;
                stagnation += 1;
            }
        }

        if stagnation >= 200 {
            step = (step * 0.5).max(1e-9);
            stagnation = 0;
        }
    }

    RunOutcome {
        values,
        violation,
        objective_key: objective,
        iterations,
        timed_out,
    }
}

fn objective_key(sense: ObjectiveSense, value: f64) -> f64 {
    match sense {
        ObjectiveSense::Minimize => value,
        ObjectiveSense::Maximize => -value,
    }
}

/// Perturbation scale per variable; unbounded domains get a fixed scale.
fn variable_span(v: &Variable) -> f64 {
    let span = v.upper - v.lower;
    if span.is_finite() {
        span.max(1e-6)
    } else {
        1_000.0
    }
}

fn midpoint(v: &Variable) -> f64 {
    match (v.lower.is_finite(), v.upper.is_finite()) {
        (true, true) => 0.5 * (v.lower + v.upper),
        (true, false) => v.lower,
        (false, true) => v.upper,
        (false, false) => 0.0,
    }
}

/// Domain midpoints overlaid with the model's warm start, clamped into
/// bounds.
fn starting_point(model: &Model) -> Vec<f64> {
    let mut values: Vec<f64> = model.variables().iter().map(midpoint).collect();
    for &(id, v) in model.warm_start() {
        let var = model.variable(id);
        values[id.index()] = v.clamp(var.lower, var.upper);
    }
    values
}

fn random_point(model: &Model, rng: &mut StdRng) -> Vec<f64> {
    model
        .variables()
        .iter()
        .map(|v| {
            let span = variable_span(v);
            match (v.lower.is_finite(), v.upper.is_finite()) {
                (true, _) => v.lower + rng.random_range(0.0..1.0) * span,
                (false, true) => v.upper - rng.random_range(0.0..1.0) * span,
                (false, false) => rng.random_range(-0.5..0.5) * span,
            }
        })
        .collect()
}
