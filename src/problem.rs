//! Input and output types at the boundary with the upstream
//! parser/instantiation stages.

/// An atomic proposition, identified by its index in [`Problem::fluents`].
/// The arity is informational sizing data only.
#[derive(Clone, Debug)]
pub struct Fluent {
    pub name: String,
    pub arity: usize,
}

/// The single conditional effect of a ground action, as sets of fluent
/// indices to make true resp. false.
#[derive(Clone, Debug, Default)]
pub struct Effect {
    pub positive: Vec<usize>,
    pub negative: Vec<usize>,
}

/// A ground action. Its ordinal position in [`Problem::actions`] is its id.
#[derive(Clone, Debug)]
pub struct Action {
    pub name: String,
    /// Fluent indices required true.
    pub precondition: Vec<usize>,
    pub effect: Effect,
}

/// A fully instantiated planning problem. `init` and `goal` list the
/// fluent indices asserted true; all other fluents are implicitly false.
#[derive(Clone, Debug)]
pub struct Problem {
    pub fluents: Vec<Fluent>,
    pub init: Vec<usize>,
    pub goal: Vec<usize>,
    pub actions: Vec<Action>,
}

impl Problem {
    pub fn fluent_count(&self) -> usize {
        self.fluents.len()
    }
}

/// One decoded action. `position` is insertion order during decoding,
/// not a causal timestep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanStep {
    pub position: usize,
    /// Index into [`Problem::actions`].
    pub action: usize,
}

/// The actions selected by the decoder, in declaration order.
///
/// Deliberately not called a plan: the encoding carries no temporal or
/// step indexing, so nothing guarantees the actions can be applied in
/// this (or any) order starting from the initial state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionSet {
    pub steps: Vec<PlanStep>,
}

impl ActionSet {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
