//! Literal encoder and clause builder.
//!
//! Fluent `i` maps to the 1-based SAT variable `i + 1`. The initial state
//! and the goal each become a single dense disjunctive clause over all
//! variables, and every action contributes one clause tying its
//! precondition and effect literals together.

use log::debug;

use crate::{
    problem::{Action, Problem},
    types::{Clause, Lit},
};

/// 1-based SAT variable for fluent `i`, as a positive literal.
pub fn fluent_var(i: usize) -> Lit {
    i as Lit + 1
}

/// Dense signed-literal vector for a state: `+var(i)` for every fluent
/// in `asserted`, `-var(i)` for every other fluent. Used for both the
/// initial state and the goal.
pub fn state_literals(asserted: &[usize], fluent_count: usize) -> Vec<Lit> {
    let mut lits: Vec<Lit> = (0..fluent_count).map(|i| -fluent_var(i)).collect();
    for &i in asserted {
        lits[i] = -lits[i];
    }
    lits
}

/// Per-action literal groups, kept for the decoder: preconditions and
/// positive effects as positive literals, negative effects negated.
#[derive(Clone, Debug)]
pub struct ActionLiterals {
    pub pre: Vec<Lit>,
    pub add: Vec<Lit>,
    pub del: Vec<Lit>,
}

impl ActionLiterals {
    fn of(action: &Action) -> Self {
        Self {
            pre: action.precondition.iter().map(|&p| fluent_var(p)).collect(),
            add: action.effect.positive.iter().map(|&p| fluent_var(p)).collect(),
            del: action.effect.negative.iter().map(|&p| -fluent_var(p)).collect(),
        }
    }

    /// The action's clause: precondition literals unchanged, both effect
    /// groups negated on emission (the stored `del` literals are already
    /// negative, so they come out positive again). Duplicate literals are
    /// kept; removing them is the solver's business.
    fn clause(&self) -> Clause {
        let mut clause = Vec::with_capacity(self.pre.len() + self.add.len() + self.del.len());
        clause.extend_from_slice(&self.pre);
        clause.extend(self.add.iter().map(|&lit| -lit));
        clause.extend(self.del.iter().map(|&lit| -lit));
        clause
    }
}

pub struct Encoding {
    /// Exactly `2 + action_count` clauses: initial state, goal, then one
    /// per action in declaration order.
    pub clauses: Vec<Clause>,
    pub actions: Vec<ActionLiterals>,
}

pub fn encode(problem: &Problem) -> Encoding {
    let n = problem.fluent_count();

    let max_arity = problem.fluents.iter().map(|f| f.arity).max().unwrap_or(0);
    debug!(
        "encoding {n} fluents (max arity {max_arity}), {} actions",
        problem.actions.len()
    );

    let mut clauses = Vec::with_capacity(2 + problem.actions.len());
    clauses.push(state_literals(&problem.init, n));
    clauses.push(state_literals(&problem.goal, n));

    let actions: Vec<ActionLiterals> = problem.actions.iter().map(ActionLiterals::of).collect();
    clauses.extend(actions.iter().map(ActionLiterals::clause));

    Encoding { clauses, actions }
}
