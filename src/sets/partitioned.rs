use crate::{
    formula::{Classification, Formula},
    sets::FormulaSet,
};
use std::collections::BTreeSet;

/// A formula set split by classification, so that class lookups and
/// complement checks only visit the partition they concern.
///
/// The complement of an alpha formula is a beta formula and vice versa,
/// except for double negations whose complement may be a literal.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct PartitionedSet {
    literals: BTreeSet<Formula>,
    alpha: BTreeSet<Formula>,
    beta: BTreeSet<Formula>,
}

impl PartitionedSet {
    pub fn new(formulas: impl IntoIterator<Item = Formula>) -> Self {
        let mut set = Self::default();
        for formula in formulas {
            set.insert(formula);
        }
        set
    }

    fn partition(&self, class: Classification) -> &BTreeSet<Formula> {
        match class {
            Classification::Literal => &self.literals,
            Classification::Alpha => &self.alpha,
            Classification::Beta => &self.beta,
        }
    }

    fn partition_mut(&mut self, class: Classification) -> &mut BTreeSet<Formula> {
        match class {
            Classification::Literal => &mut self.literals,
            Classification::Alpha => &mut self.alpha,
            Classification::Beta => &mut self.beta,
        }
    }
}

impl FormulaSet for PartitionedSet {
    fn insert(&mut self, formula: Formula) -> bool {
        let complemented = self.has_complement_of(&formula);
        self.partition_mut(formula.classification()).insert(formula);
        complemented
    }

    fn remove(&mut self, formula: &Formula) -> bool {
        self.partition_mut(formula.classification()).remove(formula)
    }

    fn contains(&self, formula: &Formula) -> bool {
        self.partition(formula.classification()).contains(formula)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Formula> + '_> {
        Box::new(
            self.literals
                .iter()
                .chain(self.alpha.iter())
                .chain(self.beta.iter()),
        )
    }

    fn len(&self) -> usize {
        self.literals.len() + self.alpha.len() + self.beta.len()
    }

    fn classified(&self, class: Classification) -> Box<dyn Iterator<Item = &Formula> + '_> {
        Box::new(self.partition(class).iter())
    }

    fn is_literal_only(&self) -> bool {
        !self.literals.is_empty() && self.alpha.is_empty() && self.beta.is_empty()
    }
}

impl std::fmt::Debug for PartitionedSet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{{ literals: {:?}, alpha: {:?}, beta: {:?} }}",
            self.literals, self.alpha, self.beta
        )
    }
}

#[cfg(test)]
fn letters() -> (Formula, Formula, Formula) {
    (
        Formula::letter("p"),
        Formula::letter("q"),
        Formula::letter("r"),
    )
}

#[test]
fn insert_reports_complements() {
    let (p, q, r) = letters();
    let and = Formula::and(p.clone(), q.clone());
    let mut set = PartitionedSet::default();

    assert!(!set.insert(p.clone()));
    assert!(!set.insert(and.clone()));
    assert!(!set.insert(Formula::or(q.clone(), r.clone())));
    assert!(set.insert(Formula::not(p.clone())));
    assert!(set.insert(Formula::not(and)));
    assert!(!set.insert(Formula::not(r)));
    assert_eq!(set.len(), 6);

    // a double negation is alpha, its complement is the negated literal
    let mut set = PartitionedSet::new(vec![Formula::not(q.clone())]);
    assert!(set.insert(Formula::not(Formula::not(q))));
}

#[test]
fn duplicates_are_ignored() {
    let (p, q, _) = letters();
    let set = PartitionedSet::new(vec![p.clone(), q.clone(), p, Formula::and(q.clone(), q)]);
    assert_eq!(set.len(), 3);
}

#[test]
fn partitions() {
    let (p, q, r) = letters();
    let alpha = Formula::nor(p.clone(), q.clone());
    let beta = Formula::xor(q.clone(), r.clone());
    let mut set = PartitionedSet::new(vec![
        p.clone(),
        Formula::not(r.clone()),
        alpha.clone(),
        beta.clone(),
    ]);

    assert_eq!(
        set.classified(Classification::Alpha).collect::<Vec<_>>(),
        vec![&alpha]
    );
    assert_eq!(
        set.classified(Classification::Beta).collect::<Vec<_>>(),
        vec![&beta]
    );
    assert_eq!(set.literals().count(), 2);
    assert!(!set.is_literal_only());

    assert!(set.remove(&alpha));
    assert!(!set.remove(&alpha));
    assert!(set.remove(&beta));
    assert!(set.is_literal_only());
    assert!(!set.has_complementary_literals());

    set.insert(r);
    assert!(set.has_complementary_literals());
    assert!(!PartitionedSet::default().is_literal_only());
}
