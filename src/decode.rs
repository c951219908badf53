//! Model decoder: turns a satisfying assignment back into the set of
//! actions it supports.

use crate::{
    encode::ActionLiterals,
    problem::{ActionSet, PlanStep},
    types::{to_var, Lit},
};

fn holds(model: &[bool], lit: Lit) -> bool {
    model[to_var(lit) - 1] == lit.is_positive()
}

/// Selects every action whose three literal groups all pass against the
/// model, in declaration order. Precondition and add-list literals are
/// checked under their stored sign; del-list literals under the sign
/// they were emitted with into the clause, i.e. negated once more.
///
/// Actions are judged independently of each other, so the result carries
/// no causal ordering guarantee. Never fails; an empty set is still a
/// satisfiable outcome.
pub fn decode(model: &[bool], actions: &[ActionLiterals]) -> ActionSet {
    let mut steps = vec![];

    for (i, lits) in actions.iter().enumerate() {
        let satisfied = lits.pre.iter().all(|&lit| holds(model, lit))
            && lits.add.iter().all(|&lit| holds(model, lit))
            && lits.del.iter().all(|&lit| holds(model, -lit));

        if satisfied {
            steps.push(PlanStep {
                position: steps.len(),
                action: i,
            });
        }
    }

    ActionSet { steps }
}
