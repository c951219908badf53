//! Solver adapter boundary and the bundled DPLL solver.
//!
//! The planner only depends on the [`SatSolver`] trait; any conforming
//! solver can be substituted. The bundled [`Solver`] is an iterative
//! DPLL with two-watched-literal propagation and chronological
//! backtracking, which is plenty for the small clause sets this
//! encoding produces.

mod assignment;
mod map;

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::types::{to_var, Clause, Lit, Solution, Var};

use self::{assignment::Assignment, map::LitMap};

/// A clause was immediately unsatisfiable given previously added unit
/// information. Fatal for the whole solve.
#[derive(Debug, Error)]
#[error("clause contradicts previously added unit clauses")]
pub struct Contradiction;

/// Narrow capability boundary to a SAT solver: feed clauses, run a
/// single solve attempt, read the model off the `Sat` outcome.
///
/// Instances accumulate clauses and are meant for one plan request each;
/// they are not designed for concurrent clause injection.
pub trait SatSolver {
    fn add_clause(&mut self, clause: &[Lit]) -> Result<(), Contradiction>;

    /// One attempt, optionally bounded. A timeout is a terminal outcome,
    /// not an error; no retry happens at this layer.
    fn solve(&mut self, timeout: Option<Duration>) -> Solution;
}

pub struct Solver {
    var_count: usize,
    clauses: Vec<Clause>,
    assignment: Assignment,
    watched: LitMap<Vec<usize>>,
    prop_head: usize,
}

impl Solver {
    pub fn new(var_count: usize) -> Self {
        Self {
            var_count,
            clauses: vec![],
            assignment: Assignment::new(var_count),
            watched: LitMap::new(var_count),
            prop_head: 0,
        }
    }

    fn attach(&mut self, clause: Clause) {
        let i = self.clauses.len();
        self.watched[clause[0]].push(i);
        self.watched[clause[1]].push(i);
        self.clauses.push(clause);
    }

    /// Assign `lit` at the root and propagate.
    fn assert_unit(&mut self, lit: Lit) -> Result<(), Contradiction> {
        self.assignment.force(lit);
        if self.propagate().is_some() {
            return Err(Contradiction);
        }
        Ok(())
    }

    fn propagate(&mut self) -> Option<usize> {
        while let Some(&lit) = self.assignment.trail().get(self.prop_head) {
            let lit = -lit;

            let mut i = 0;
            'clause: while i < self.watched[lit].len() {
                let c = self.watched[lit][i];
                let clause = &mut self.clauses[c];

                // The two watched literals live at indices 0 and 1.
                if clause[1] != lit {
                    clause.swap(0, 1);
                }
                debug_assert_eq!(clause[1], lit);

                for j in 0..clause.len() {
                    match self.assignment.eval(clause[j]) {
                        Some(true) => {
                            i += 1;
                            continue 'clause;
                        }
                        None if j != 0 => {
                            clause.swap(1, j);
                            self.watched[lit].swap_remove(i);
                            self.watched[clause[1]].push(c);
                            continue 'clause;
                        }
                        _ => (),
                    }
                }

                if self.assignment.eval(clause[0]).is_none() {
                    // unit clause
                    let unit_lit = clause[0];
                    self.assignment.force(unit_lit);
                } else {
                    // conflict
                    return Some(c);
                }

                i += 1;
            }

            self.prop_head += 1;
        }

        None
    }

    fn next_unassigned(&self) -> Option<Var> {
        (1..=self.var_count).find(|&var| self.assignment.eval(var as Lit).is_none())
    }

    fn search(&mut self, deadline: Option<Instant>) -> Solution {
        if self.propagate().is_some() {
            return Solution::Unsat;
        }

        loop {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    return Solution::TimedOut;
                }
            }

            let Some(var) = self.next_unassigned() else {
                let model = (1..=self.var_count)
                    .map(|var| self.assignment.eval(var as Lit).unwrap_or(false))
                    .collect();
                return Solution::Sat { model };
            };
            // positive phase first, keeps runs reproducible
            self.assignment.decide(var as Lit);

            while self.propagate().is_some() {
                // chronological backtracking: undo the most recent
                // decision and force its complement one level down
                let Some(decision) = self.assignment.last_decision() else {
                    return Solution::Unsat;
                };
                let level = self.assignment.last_level();
                self.assignment.backtrack(level);
                self.prop_head = self.prop_head.min(self.assignment.trail().len());
                self.assignment.force(-decision);
            }
        }
    }
}

impl SatSolver for Solver {
    fn add_clause(&mut self, clause: &[Lit]) -> Result<(), Contradiction> {
        debug_assert!(clause
            .iter()
            .all(|&lit| lit != 0 && to_var(lit) <= self.var_count));

        let mut clause: Clause = clause.to_vec();
        clause.sort_unstable();
        clause.dedup();

        // Empty clauses only arise from zero-fluent states; vacuous here.
        if clause.is_empty() {
            return Ok(());
        }
        // Tautologies are satisfied under every assignment.
        if clause
            .iter()
            .any(|&lit| clause.binary_search(&-lit).is_ok())
        {
            return Ok(());
        }

        if let [lit] = clause[..] {
            return match self.assignment.eval(lit) {
                Some(false) => Err(Contradiction),
                Some(true) => Ok(()),
                None => self.assert_unit(lit),
            };
        }

        // Move non-falsified literals into the watch slots.
        let mut free = 0;
        for j in 0..clause.len() {
            if free == 2 {
                break;
            }
            if self.assignment.eval(clause[j]) != Some(false) {
                clause.swap(free, j);
                free += 1;
            }
        }

        match free {
            0 => Err(Contradiction),
            1 => {
                // unit under the current root assignment
                let lit = clause[0];
                let satisfied = self.assignment.eval(lit) == Some(true);
                self.attach(clause);
                if satisfied {
                    Ok(())
                } else {
                    self.assert_unit(lit)
                }
            }
            _ => {
                self.attach(clause);
                Ok(())
            }
        }
    }

    fn solve(&mut self, timeout: Option<Duration>) -> Solution {
        let deadline = timeout.map(|t| Instant::now() + t);
        self.search(deadline)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::types::{to_var, Clause, Solution};

    use super::{SatSolver, Solver};

    fn check(clauses: Vec<Clause>, sat: bool) {
        let var_count = clauses
            .iter()
            .flatten()
            .map(|&lit| to_var(lit))
            .max()
            .unwrap();

        let mut solver = Solver::new(var_count);
        let mut contradiction = false;
        for clause in &clauses {
            if solver.add_clause(clause).is_err() {
                contradiction = true;
                break;
            }
        }
        if contradiction {
            assert!(!sat);
            return;
        }

        match solver.solve(None) {
            Solution::Sat { model } => {
                assert!(sat);
                // every clause has a true literal
                assert!(clauses.iter().all(|clause| clause
                    .iter()
                    .any(|&lit| model[to_var(lit) - 1] == lit.is_positive())));
            }
            Solution::Unsat => assert!(!sat),
            Solution::TimedOut => panic!("unexpected timeout"),
        }
    }

    #[test]
    fn basic_sat() {
        let clauses = vec![vec![1, 2], vec![-1, 2], vec![-1, -2, 3], vec![-1, -2, -3]];
        check(clauses, true);

        let clauses = vec![
            vec![-1, -2, 3],
            vec![2, -1, 3],
            vec![1, -2, 3],
            vec![-3, 4, 5],
            vec![-3, 4, -5],
            vec![-3, -4, 5],
            vec![-3, -4, -5],
        ];
        check(clauses, true);
    }

    #[test]
    fn basic_unsat() {
        let clauses = vec![
            vec![1, 2],
            vec![-2, 3],
            vec![-2, -3],
            vec![-1, -2, -4],
            vec![-1, 2, -4],
            vec![-1, 2, 4],
        ];

        check(clauses, false);
    }

    #[test]
    /// Formulas decided by unit information alone.
    fn kickstart() {
        check(vec![vec![1], vec![-1, 2], vec![-1, -2]], false);
    }

    #[test]
    fn conflicting_units_are_rejected_on_add() {
        let mut solver = Solver::new(1);
        solver.add_clause(&[-1]).unwrap();
        assert!(solver.add_clause(&[1]).is_err());
    }

    #[test]
    fn duplicates_and_tautologies_are_tolerated() {
        let mut solver = Solver::new(2);
        solver.add_clause(&[1, -1]).unwrap();
        solver.add_clause(&[2, 2]).unwrap();

        let Solution::Sat { model } = solver.solve(None) else {
            panic!("expected sat");
        };
        assert!(model[1]);
    }

    #[test]
    fn model_covers_every_variable() {
        let mut solver = Solver::new(3);
        solver.add_clause(&[2]).unwrap();

        let Solution::Sat { model } = solver.solve(None) else {
            panic!("expected sat");
        };
        assert_eq!(model.len(), 3);
        assert!(model[1]);
    }

    #[test]
    fn empty_formula_is_sat_with_empty_model() {
        let mut solver = Solver::new(0);
        solver.add_clause(&[]).unwrap();

        assert_eq!(solver.solve(None), Solution::Sat { model: vec![] });
    }

    #[test]
    fn zero_timeout_surfaces_as_timed_out() {
        let mut solver = Solver::new(2);
        solver.add_clause(&[1, 2]).unwrap();

        assert_eq!(solver.solve(Some(Duration::ZERO)), Solution::TimedOut);
    }
}
