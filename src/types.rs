pub type Lit = i32;

pub type Var = usize;

pub fn to_var(lit: Lit) -> Var {
    assert_ne!(lit, 0);
    lit.unsigned_abs() as Var
}

pub type Clause = Vec<Lit>;

/// Outcome of a single solve attempt. `model[v - 1]` is the truth value
/// assigned to variable `v`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Solution {
    Sat { model: Vec<bool> },
    Unsat,
    TimedOut,
}
