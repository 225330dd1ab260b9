use crate::Literal;
use std::{collections::BTreeMap, iter::FromIterator, sync::Arc};

/// A partial truth assignment. A letter missing from the assignment may take
/// either truth value.
#[derive(Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Assignment {
    values: BTreeMap<Arc<str>, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the assignment making every literal true
    pub fn from_literals<'a>(literals: impl IntoIterator<Item = &'a Literal>) -> Self {
        let mut assignment = Self::new();
        for literal in literals {
            let previous = assignment.set(literal.name(), literal.sign().truth());
            debug_assert_ne!(
                previous,
                Some(!literal.sign().truth()),
                "complementary literals on {}",
                literal.name()
            );
        }
        assignment
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<bool> {
        self.values.get(name).copied()
    }

    pub fn set(&mut self, name: impl Into<Arc<str>>, value: bool) -> Option<bool> {
        self.values.insert(name.into(), value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.values.iter().map(|(name, value)| (name.as_ref(), *value))
    }

    /// Whether this assignment agrees with every letter `other` assigns,
    /// i.e. it is `other` or a more specific version of it
    pub fn specializes(&self, other: &Assignment) -> bool {
        other
            .iter()
            .all(|(name, value)| self.get(name) == Some(value))
    }

    /// Drops every assignment that specializes another one, keeping only the
    /// most general models. The result does not depend on the input order.
    pub fn clean(mut assignments: Vec<Assignment>) -> Vec<Assignment> {
        assignments.sort_by_key(Assignment::len);

        let mut kept: Vec<Assignment> = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            if !kept.iter().any(|general| assignment.specializes(general)) {
                kept.push(assignment);
            }
        }
        kept
    }
}

impl<N: Into<Arc<str>>> FromIterator<(N, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (N, bool)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}

impl std::fmt::Debug for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
fn assignment(values: &[(&str, bool)]) -> Assignment {
    values.iter().map(|(name, value)| (*name, *value)).collect()
}

#[test]
fn specialization() {
    let general = assignment(&[("p", true)]);
    let specific = assignment(&[("p", true), ("q", false)]);
    let other = assignment(&[("p", false), ("q", false)]);

    assert!(specific.specializes(&general));
    assert!(!general.specializes(&specific));
    assert!(general.specializes(&general));
    assert!(!other.specializes(&general));
    assert!(specific.specializes(&Assignment::new()));
}

#[test]
fn clean_keeps_most_general() {
    let cleaned = Assignment::clean(vec![
        assignment(&[("p", true), ("r", true)]),
        assignment(&[("p", true)]),
        assignment(&[("q", true), ("r", false)]),
        assignment(&[("p", true), ("q", true)]),
        assignment(&[("q", true), ("r", false)]),
    ]);

    assert_eq!(
        cleaned,
        vec![
            assignment(&[("p", true)]),
            assignment(&[("q", true), ("r", false)]),
        ]
    );
    assert_eq!(Assignment::clean(cleaned.clone()), cleaned);
}

#[test]
fn clean_keeps_incomparable() {
    let both = vec![assignment(&[("p", true)]), assignment(&[("p", false)])];
    assert_eq!(Assignment::clean(both.clone()), both);
    assert!(Assignment::clean(Vec::new()).is_empty());
}

#[test]
fn from_literals() {
    let literals = vec![
        Literal::new("q", false),
        Literal::new("p", true),
        Literal::new("q", false),
    ];
    let built = Assignment::from_literals(&literals);

    assert_eq!(built, assignment(&[("p", true), ("q", false)]));
    assert_eq!(built.to_string(), "{p: true, q: false}");
}
