use crate::{formula::Formula, sets::FormulaSet};

pub const BUFFER_CAPACITY: usize = 2;

/// Holds at most two distinct formulas, the most any tableau rule derives at
/// once. Ancestor formulas are never copied into a buffer.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct BufferSet {
    slots: [Option<Formula>; BUFFER_CAPACITY],
}

impl BufferSet {
    pub fn new(formulas: impl IntoIterator<Item = Formula>) -> Self {
        let mut set = Self::default();
        for formula in formulas {
            set.insert(formula);
        }
        set
    }
}

impl FormulaSet for BufferSet {
    /// # Panics
    ///
    /// Panics when adding a third distinct formula.
    fn insert(&mut self, formula: Formula) -> bool {
        if self.contains(&formula) {
            return self.has_complement_of(&formula);
        }

        let complemented = self.has_complement_of(&formula);
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.is_none()) {
            *slot = Some(formula);
            return complemented;
        }

        panic!(
            "buffer set can't hold more than {} formulas: can't add {} to {:?}",
            BUFFER_CAPACITY, formula, self
        )
    }

    fn remove(&mut self, formula: &Formula) -> bool {
        match self
            .slots
            .iter_mut()
            .find(|slot| slot.as_ref() == Some(formula))
        {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    fn contains(&self, formula: &Formula) -> bool {
        self.slots.iter().any(|slot| slot.as_ref() == Some(formula))
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Formula> + '_> {
        Box::new(self.slots.iter().flatten())
    }

    fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}

impl std::fmt::Debug for BufferSet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[test]
fn holds_two_formulas() {
    let (p, q, r) = (
        Formula::letter("p"),
        Formula::letter("q"),
        Formula::letter("r"),
    );
    let mut set = BufferSet::new(vec![p.clone()]);

    assert!(set.contains(&p));
    assert!(!set.contains(&q));
    assert!(!set.insert(p.clone()));
    assert_eq!(set.len(), 1);

    assert!(!set.insert(q.clone()));
    assert!(set.contains(&q));
    assert!(!set.contains(&r));
    assert!(!set.insert(q.clone()));
    assert_eq!(set.len(), 2);
    assert_eq!(format!("{:?}", set), "{p, q}");

    assert!(set.remove(&p));
    assert!(!set.remove(&p));
    assert!(!set.insert(r.clone()));
    assert_eq!(set.iter().cloned().collect::<Vec<_>>(), vec![r, q]);
}

#[test]
fn detects_complements() {
    let p = Formula::letter("p");
    let mut set = BufferSet::new(vec![p.clone()]);

    assert!(set.insert(Formula::not(p.clone())));
    assert!(set.has_complementary_literals());
    assert!(set.is_literal_only());

    let compound = Formula::or(p.clone(), p);
    let mut set = BufferSet::new(vec![compound.clone()]);
    assert!(!set.is_literal_only());
    assert!(set.insert(Formula::not(compound)));
}

#[test]
#[should_panic(expected = "buffer set can't hold more than 2 formulas")]
fn third_formula_overflows() {
    BufferSet::new(vec![
        Formula::letter("p"),
        Formula::letter("q"),
        Formula::letter("r"),
    ]);
}
