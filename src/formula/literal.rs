use crate::{sign::Sign, Assignment, Evaluate, Formula};
use std::sync::Arc;

/// A letter together with the polarity it occurs with
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Literal {
    name: Arc<str>,
    sign: Sign,
}

impl Literal {
    #[inline]
    pub fn new(name: impl Into<Arc<str>>, sign: impl Into<Sign>) -> Self {
        Literal {
            name: name.into(),
            sign: sign.into(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    #[inline]
    pub fn is_negated(&self) -> bool {
        self.sign == Sign::Negative
    }

    pub fn to_formula(&self) -> Formula {
        let letter = Formula::letter(self.name.clone());
        match self.sign {
            Sign::Positive => letter,
            Sign::Negative => Formula::not(letter),
        }
    }
}

impl Evaluate for Literal {
    fn evaluate(&self, assignment: &Assignment) -> Option<bool> {
        assignment
            .get(self.name())
            .map(|value| value == self.sign.truth())
    }
}

impl std::ops::Not for Literal {
    type Output = Literal;

    #[inline]
    fn not(self) -> Self::Output {
        Literal {
            name: self.name,
            sign: !self.sign,
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.sign(), self.name())
    }
}

impl std::fmt::Debug for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}{}", self.sign(), self.name())
    }
}

#[test]
fn complementary_literals() {
    let p = Literal::new("p", true);
    assert!(!p.is_negated());
    assert_eq!(!p.clone(), Literal::new("p", false));
    assert_eq!(!!p.clone(), p);
    assert_eq!(format!("{}", !p.clone()), "!p");
    assert_eq!((!p).to_formula(), Formula::not(Formula::letter("p")));
}
