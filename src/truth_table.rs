use crate::{Assignment, Evaluate, Formula};
use fixedbitset::FixedBitSet;
use std::sync::Arc;

/// Brute-force view of a formula: one row per total assignment of its letters
pub struct TruthTable {
    formula: Formula,
    letters: Vec<Arc<str>>,
}

impl TruthTable {
    pub fn new(formula: &Formula) -> Self {
        Self {
            formula: formula.clone(),
            letters: formula.letters(),
        }
    }

    pub fn letters(&self) -> &[Arc<str>] {
        &self.letters
    }

    /// Every total assignment, starting from all letters false
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            letters: &self.letters,
            row: Some(FixedBitSet::with_capacity(self.letters.len())),
        }
    }

    /// Total assignments that agree with `partial`
    pub fn extensions<'a>(
        &'a self,
        partial: &'a Assignment,
    ) -> impl Iterator<Item = Assignment> + 'a {
        self.rows().filter(move |row| row.specializes(partial))
    }

    pub fn models(&self) -> Vec<Assignment> {
        self.rows()
            .filter(|row| self.formula.evaluate(row) == Some(true))
            .collect()
    }

    pub fn is_satisfiable(&self) -> bool {
        self.rows()
            .any(|row| self.formula.evaluate(&row) == Some(true))
    }

    pub fn is_tautology(&self) -> bool {
        self.rows()
            .all(|row| self.formula.evaluate(&row) == Some(true))
    }
}

pub struct Rows<'a> {
    letters: &'a [Arc<str>],
    /// Bit `i` holds the value of `letters[i]`; `None` once exhausted
    row: Option<FixedBitSet>,
}

impl Iterator for Rows<'_> {
    type Item = Assignment;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.row.as_mut()?;
        let assignment = self
            .letters
            .iter()
            .enumerate()
            .map(|(i, letter)| (letter.clone(), row.contains(i)))
            .collect();

        // binary increment
        match (0..self.letters.len()).find(|&i| !row.contains(i)) {
            Some(zero) => {
                row.set_range(..zero, false);
                row.insert(zero);
            }
            None => self.row = None,
        }

        Some(assignment)
    }
}

#[test]
fn rows_cover_every_assignment() -> Result<(), crate::ParseError> {
    let table = TruthTable::new(&"(q -> (p | q))".parse()?);
    let rows = table.rows().map(|row| row.to_string()).collect::<Vec<_>>();

    assert_eq!(
        rows,
        vec![
            "{p: false, q: false}",
            "{p: true, q: false}",
            "{p: false, q: true}",
            "{p: true, q: true}",
        ]
    );
    assert!(table.is_tautology());
    Ok(())
}

#[test]
fn models_and_extensions() -> Result<(), crate::ParseError> {
    let table = TruthTable::new(&"((p ^ q) & !r)".parse()?);
    assert!(table.is_satisfiable());
    assert!(!table.is_tautology());
    assert_eq!(table.models().len(), 2);

    let partial: Assignment = vec![("p", true)].into_iter().collect();
    assert_eq!(table.extensions(&partial).count(), 4);

    let contradiction = TruthTable::new(&"(p <-> !p)".parse()?);
    assert!(!contradiction.is_satisfiable());
    assert!(contradiction.models().is_empty());
    Ok(())
}
