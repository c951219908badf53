//! Pipeline orchestration: Encode → BuildClauses → Solve → Decode, one
//! linear pass per request.

use std::time::Duration;

use log::{debug, info};
use thiserror::Error;

use crate::{
    decode::decode,
    encode::encode,
    problem::{ActionSet, Problem},
    solver::{Contradiction, SatSolver, Solver},
    types::Solution,
};

/// Terminal outcome of one planning request. `Unsat` means no satisfying
/// assignment exists for this encoding; `TimedOut` means the bound ran
/// out and a retry with a larger bound may still succeed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Plan(ActionSet),
    Unsat,
    TimedOut,
}

#[derive(Debug, Error)]
pub enum PlanError {
    /// The clause set is contradictory before search even starts, e.g.
    /// degenerate initial/goal states. Not a retryable condition.
    #[error("problem encoding is trivially contradictory")]
    Contradiction(#[from] Contradiction),
}

/// Runs the pipeline once against the given solver. No state survives
/// the call; rerunning with an unchanged problem and a fresh,
/// deterministic solver yields the same outcome.
///
/// Solver instances accumulate clauses, so each request needs its own.
pub fn plan(
    problem: &Problem,
    solver: &mut impl SatSolver,
    timeout: Option<Duration>,
) -> Result<Outcome, PlanError> {
    let encoding = encode(problem);
    debug!(
        "{} clauses over {} variables",
        encoding.clauses.len(),
        problem.fluent_count()
    );

    for clause in &encoding.clauses {
        solver.add_clause(clause)?;
    }

    match solver.solve(timeout) {
        Solution::Sat { model } => {
            info!("sat");
            Ok(Outcome::Plan(decode(&model, &encoding.actions)))
        }
        Solution::Unsat => {
            info!("unsat");
            Ok(Outcome::Unsat)
        }
        Solution::TimedOut => {
            info!("timeout");
            Ok(Outcome::TimedOut)
        }
    }
}

/// Solves with the bundled DPLL solver.
pub fn solve(problem: &Problem, timeout: Option<Duration>) -> Result<Outcome, PlanError> {
    let mut solver = Solver::new(problem.fluent_count());
    plan(problem, &mut solver, timeout)
}
