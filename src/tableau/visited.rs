use crate::{formula::Formula, FormulaIdx};
use fixedbitset::FixedBitSet;
use std::collections::HashMap;

/// Gives every distinct expanded formula a dense index
#[derive(Default)]
pub struct Interner {
    indices: HashMap<Formula, FormulaIdx>,
}

impl Interner {
    pub fn intern(&mut self, formula: &Formula) -> FormulaIdx {
        let next = self.indices.len();
        *self.indices.entry(formula.clone()).or_insert(next)
    }

    pub fn get(&self, formula: &Formula) -> Option<FormulaIdx> {
        self.indices.get(formula).copied()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }
}

/// Formulas already expanded on a branch. Each branch owns its marks: an
/// alpha child inherits them, beta children get a copy each.
#[derive(Clone, Debug)]
pub struct Visited {
    marks: FixedBitSet,
}

impl Default for Visited {
    fn default() -> Self {
        Self {
            marks: FixedBitSet::with_capacity(0),
        }
    }
}

impl Visited {
    pub fn mark(&mut self, idx: FormulaIdx) {
        if idx >= self.marks.len() {
            self.marks.grow(idx + 1);
        }
        self.marks.insert(idx);
    }

    pub fn unmark(&mut self, idx: FormulaIdx) {
        if idx < self.marks.len() {
            self.marks.set(idx, false);
        }
    }

    #[inline]
    pub fn contains(&self, idx: FormulaIdx) -> bool {
        self.marks.contains(idx)
    }

    pub fn count(&self) -> usize {
        self.marks.count_ones(..)
    }
}

#[test]
fn interning() {
    let mut interner = Interner::default();
    let p = Formula::letter("p");
    let q = Formula::not(Formula::letter("q"));

    assert_eq!(interner.get(&p), None);
    assert_eq!(interner.intern(&p), 0);
    assert_eq!(interner.intern(&q), 1);
    assert_eq!(interner.intern(&Formula::letter("p")), 0);
    assert_eq!(interner.get(&q), Some(1));
    assert_eq!(interner.len(), 2);
}

#[test]
fn marks_are_per_copy() {
    let mut visited = Visited::default();
    assert!(!visited.contains(5));

    visited.mark(5);
    visited.mark(1);
    let mut copy = visited.clone();
    copy.unmark(5);
    copy.unmark(40);

    assert!(visited.contains(5));
    assert!(!copy.contains(5));
    assert!(copy.contains(1));
    assert_eq!(visited.count(), 2);
    assert_eq!(copy.count(), 1);
}
