use crate::types::{to_var, Lit};

/// Trail-based partial assignment with decision levels.
pub struct Assignment {
    values: Vec<Option<bool>>,
    trail: Vec<Lit>,
    levels: Vec<usize>,
}

impl Assignment {
    pub fn new(var_count: usize) -> Self {
        Self {
            values: vec![None; var_count + 1],
            trail: vec![],
            levels: vec![],
        }
    }

    pub fn eval(&self, lit: Lit) -> Option<bool> {
        self.values[to_var(lit)].map(|value| value == lit.is_positive())
    }

    /// Assign `lit` without opening a decision level.
    pub fn force(&mut self, lit: Lit) {
        debug_assert!(self.eval(lit).is_none());
        self.trail.push(lit);
        self.values[to_var(lit)] = Some(lit.is_positive());
    }

    /// Assign `lit` as a decision, opening a new level.
    pub fn decide(&mut self, lit: Lit) {
        self.levels.push(self.trail.len());
        self.force(lit);
    }

    pub fn trail(&self) -> &[Lit] {
        &self.trail
    }

    pub fn last_level(&self) -> usize {
        self.levels.len()
    }

    /// Decision literal of the most recent level.
    pub fn last_decision(&self) -> Option<Lit> {
        self.levels.last().map(|&i| self.trail[i])
    }

    /// Revert all changes at `level` (incl.) and above.
    pub fn backtrack(&mut self, level: usize) {
        self.levels.drain(level..);
        let i = self.levels.pop().unwrap_or(0);
        for lit in self.trail.drain(i..) {
            self.values[to_var(lit)] = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Assignment;

    #[test]
    fn basic() {
        let mut ass = Assignment::new(2);

        assert_eq!(ass.last_level(), 0);

        ass.decide(1);
        ass.force(-2);

        assert_eq!(ass.last_level(), 1);
        assert_eq!(ass.last_decision(), Some(1));
        assert_eq!(ass.eval(1), Some(true));
        assert_eq!(ass.eval(-2), Some(true));
        assert_eq!(ass.eval(2), Some(false));

        ass.backtrack(1);
        assert_eq!(ass.last_level(), 0);
        assert_eq!(ass.eval(1), None);
        assert_eq!(ass.eval(2), None);
    }

    #[test]
    fn forced_literals_stay_below_the_backtracked_level() {
        let mut ass = Assignment::new(3);

        ass.force(1);
        ass.decide(2);
        ass.force(3);

        ass.backtrack(1);
        assert_eq!(ass.eval(1), Some(true));
        assert_eq!(ass.eval(2), None);
        assert_eq!(ass.eval(3), None);
    }
}
