use crate::formula::{Classification, Formula};

pub mod buffer;
pub mod partitioned;

pub use buffer::BufferSet;
pub use partitioned::PartitionedSet;

/// The formulas stored at a single tableau node
pub trait FormulaSet: Clone + Default + std::fmt::Debug {
    /// Adds `formula`, returning whether its complement is already in the set.
    /// Adding a formula that is already contained leaves the set unchanged.
    fn insert(&mut self, formula: Formula) -> bool;

    fn remove(&mut self, formula: &Formula) -> bool;

    fn contains(&self, formula: &Formula) -> bool;

    fn iter(&self) -> Box<dyn Iterator<Item = &Formula> + '_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn has_complement_of(&self, formula: &Formula) -> bool {
        self.contains(&formula.complement())
    }

    fn classified(&self, class: Classification) -> Box<dyn Iterator<Item = &Formula> + '_> {
        Box::new(
            self.iter()
                .filter(move |formula| formula.classification() == class),
        )
    }

    fn literals(&self) -> Box<dyn Iterator<Item = &Formula> + '_> {
        self.classified(Classification::Literal)
    }

    fn is_literal_only(&self) -> bool {
        !self.is_empty() && self.iter().all(Formula::is_literal)
    }

    fn has_complementary_literals(&self) -> bool {
        self.literals()
            .any(|literal| self.has_complement_of(literal))
    }
}
