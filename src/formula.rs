use crate::{Assignment, Evaluate};
use rand::Rng;
use std::{
    cmp::Ordering,
    collections::{hash_map::DefaultHasher, BTreeSet},
    hash::{Hash, Hasher},
    sync::Arc,
};

pub mod literal;
pub mod operator;
pub mod parse;

pub use literal::Literal;
pub use operator::Operator;
pub use parse::{parse, ParseError};

const RANDOM_LETTERS: &str = "pqrstuvwxyz";

/// Structural class of a formula, deciding how the tableau expands it
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Classification {
    /// A letter or a negated letter
    Literal,
    /// Expands into a single child holding both consequences
    Alpha,
    /// Expands into two children holding one consequence each
    Beta,
}

impl std::ops::Not for Classification {
    type Output = Classification;

    fn not(self) -> Self::Output {
        match self {
            Classification::Literal => Classification::Literal,
            Classification::Alpha => Classification::Beta,
            Classification::Beta => Classification::Alpha,
        }
    }
}

/// The top-level connective of a formula and its direct subformulas
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Shape {
    Letter(Arc<str>),
    Not(Formula),
    Binary(Formula, Formula, Operator),
}

struct Node {
    shape: Shape,
    /// Structural hash, combined from the children's cached hashes
    hash: u64,
    size: usize,
}

thread_local! {
    static DETACHED: Arc<str> = Arc::from("");
}

impl Drop for Node {
    /// Frees uniquely owned subtrees with a work list, so dropping a deeply
    /// nested formula doesn't recurse once per level
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach(&mut self.shape, &mut pending);
        while let Some(formula) = pending.pop() {
            if let Ok(mut node) = Arc::try_unwrap(formula.0) {
                detach(&mut node.shape, &mut pending);
            }
        }
    }
}

/// Moves the children of `shape` into `pending`, leaving an empty letter
fn detach(shape: &mut Shape, pending: &mut Vec<Formula>) {
    if let Shape::Letter(_) = shape {
        return;
    }
    let name = DETACHED
        .try_with(Arc::clone)
        .unwrap_or_else(|_| Arc::from(""));
    match std::mem::replace(shape, Shape::Letter(name)) {
        Shape::Letter(_) => {}
        Shape::Not(inner) => pending.push(inner),
        Shape::Binary(left, right, _) => {
            pending.push(left);
            pending.push(right);
        }
    }
}

/// An immutable propositional formula.
///
/// Nodes are reference counted so that the many copies a tableau makes of a
/// formula all share the same tree. Each node caches its structural hash and
/// size, so hashing and most comparisons don't walk the tree.
#[derive(Clone)]
pub struct Formula(Arc<Node>);

impl Formula {
    fn new(shape: Shape) -> Self {
        let mut hasher = DefaultHasher::new();
        let size = match &shape {
            Shape::Letter(name) => {
                0u8.hash(&mut hasher);
                name.hash(&mut hasher);
                1
            }
            Shape::Not(inner) => {
                1u8.hash(&mut hasher);
                hasher.write_u64(inner.0.hash);
                1 + inner.size()
            }
            Shape::Binary(left, right, op) => {
                2u8.hash(&mut hasher);
                hasher.write_u64(left.0.hash);
                hasher.write_u64(right.0.hash);
                op.hash(&mut hasher);
                1 + left.size() + right.size()
            }
        };
        Formula(Arc::new(Node {
            shape,
            hash: hasher.finish(),
            size,
        }))
    }

    pub fn letter(name: impl Into<Arc<str>>) -> Self {
        Self::new(Shape::Letter(name.into()))
    }

    pub fn not(inner: Formula) -> Self {
        Self::new(Shape::Not(inner))
    }

    pub fn binary(left: Formula, right: Formula, op: Operator) -> Self {
        Self::new(Shape::Binary(left, right, op))
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Self::binary(left, right, Operator::And)
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Self::binary(left, right, Operator::Or)
    }

    pub fn implies(left: Formula, right: Formula) -> Self {
        Self::binary(left, right, Operator::Implies)
    }

    pub fn nand(left: Formula, right: Formula) -> Self {
        Self::binary(left, right, Operator::Nand)
    }

    pub fn nor(left: Formula, right: Formula) -> Self {
        Self::binary(left, right, Operator::Nor)
    }

    pub fn biconditional(left: Formula, right: Formula) -> Self {
        Self::binary(left, right, Operator::Biconditional)
    }

    pub fn xor(left: Formula, right: Formula) -> Self {
        Self::binary(left, right, Operator::Xor)
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.0.shape
    }

    /// `x` for `!x`, `!f` for anything else
    pub fn complement(&self) -> Formula {
        match self.shape() {
            Shape::Not(inner) => inner.clone(),
            _ => Formula::not(self.clone()),
        }
    }

    pub fn is_literal(&self) -> bool {
        match self.shape() {
            Shape::Letter(_) => true,
            Shape::Not(inner) => matches!(inner.shape(), Shape::Letter(_)),
            Shape::Binary(..) => false,
        }
    }

    pub fn as_literal(&self) -> Option<Literal> {
        match self.shape() {
            Shape::Letter(name) => Some(Literal::new(name.clone(), true)),
            Shape::Not(inner) => match inner.shape() {
                Shape::Letter(name) => Some(Literal::new(name.clone(), false)),
                _ => None,
            },
            Shape::Binary(..) => None,
        }
    }

    pub fn classification(&self) -> Classification {
        match self.shape() {
            Shape::Letter(_) => Classification::Literal,
            Shape::Not(inner) => match inner.shape() {
                Shape::Letter(_) => Classification::Literal,
                // double negation
                Shape::Not(_) => Classification::Alpha,
                Shape::Binary(_, _, op) => !op.classification(),
            },
            Shape::Binary(_, _, op) => op.classification(),
        }
    }

    /// Names of all letters occurring in the formula, sorted and without duplicates
    pub fn letters(&self) -> Vec<Arc<str>> {
        let mut letters = BTreeSet::new();
        let mut pending = vec![self];
        while let Some(formula) = pending.pop() {
            match formula.shape() {
                Shape::Letter(name) => {
                    letters.insert(name.clone());
                }
                Shape::Not(inner) => pending.push(inner),
                Shape::Binary(left, right, _) => {
                    pending.push(left);
                    pending.push(right);
                }
            }
        }
        letters.into_iter().collect()
    }

    /// Number of letters and connectives in the formula
    #[inline]
    pub fn size(&self) -> usize {
        self.0.size
    }

    pub fn display(&self, notation: Notation) -> Display<'_> {
        Display {
            formula: self,
            notation,
        }
    }

    /// Generates a random formula whose syntax tree has depth `size`
    pub fn random<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Formula {
        if size == 0 {
            let idx = rng.gen_range(0, RANDOM_LETTERS.len());
            return Formula::letter(&RANDOM_LETTERS[idx..idx + 1]);
        }

        if rng.gen_bool(0.5) {
            Formula::not(Self::random(rng, size - 1))
        } else {
            let op = Operator::ALL[rng.gen_range(0, Operator::ALL.len())];
            Formula::binary(Self::random(rng, size - 1), Self::random(rng, size - 1), op)
        }
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.hash == other.0.hash
                && self.0.size == other.0.size
                && self.0.shape == other.0.shape)
    }
}

impl Eq for Formula {}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

/// Smaller formulas first; the tree is only walked to break hash ties
impl Ord for Formula {
    fn cmp(&self, other: &Self) -> Ordering {
        if Arc::ptr_eq(&self.0, &other.0) {
            return Ordering::Equal;
        }
        self.0
            .size
            .cmp(&other.0.size)
            .then(self.0.hash.cmp(&other.0.hash))
            .then_with(|| self.0.shape.cmp(&other.0.shape))
    }
}

impl PartialOrd for Formula {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Evaluate for Formula {
    /// Three-valued evaluation: `None` when the letters missing from the
    /// assignment leave the value undetermined
    fn evaluate(&self, assignment: &Assignment) -> Option<bool> {
        match self.shape() {
            Shape::Letter(name) => assignment.get(name),
            Shape::Not(inner) => inner.evaluate(assignment).map(|value| !value),
            Shape::Binary(left, right, op) => {
                use Operator::*;
                match (*op, left.evaluate(assignment), right.evaluate(assignment)) {
                    (op, Some(l), Some(r)) => Some(op.apply(l, r)),
                    (And, Some(false), _) | (And, _, Some(false)) => Some(false),
                    (Or, Some(true), _) | (Or, _, Some(true)) => Some(true),
                    (Implies, Some(false), _) | (Implies, _, Some(true)) => Some(true),
                    (Nand, Some(false), _) | (Nand, _, Some(false)) => Some(true),
                    (Nor, Some(true), _) | (Nor, _, Some(true)) => Some(false),
                    _ => None,
                }
            }
        }
    }
}

impl std::str::FromStr for Formula {
    type Err = ParseError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        parse(source)
    }
}

impl From<Literal> for Formula {
    fn from(literal: Literal) -> Self {
        literal.to_formula()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Notation {
    Ascii,
    Unicode,
    Latex,
}

pub struct Display<'a> {
    formula: &'a Formula,
    notation: Notation,
}

impl std::fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let notation = self.notation;
        match (self.formula.shape(), notation) {
            (Shape::Letter(name), _) => write!(f, "{}", name),
            (Shape::Not(inner), Notation::Ascii) => write!(f, "!{}", inner.display(notation)),
            (Shape::Not(inner), Notation::Unicode) => write!(f, "¬{}", inner.display(notation)),
            (Shape::Not(inner), Notation::Latex) => {
                write!(f, r"\neg {}", inner.display(notation))
            }
            (Shape::Binary(left, right, op), Notation::Ascii) => write!(
                f,
                "({} {} {})",
                left.display(notation),
                op.ascii(),
                right.display(notation)
            ),
            (Shape::Binary(left, right, op), Notation::Unicode) => write!(
                f,
                "({} {} {})",
                left.display(notation),
                op.unicode(),
                right.display(notation)
            ),
            (Shape::Binary(left, right, op), Notation::Latex) => write!(
                f,
                r"\left({} {} {}\right)",
                left.display(notation),
                op.latex(),
                right.display(notation)
            ),
        }
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.display(Notation::Ascii))
    }
}

impl std::fmt::Debug for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.display(Notation::Ascii))
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
fn classification() {
    use Classification::*;
    let (p, q, _) = letters();

    assert_eq!(p.classification(), Literal);
    assert_eq!(Formula::not(p.clone()).classification(), Literal);
    assert_eq!(Formula::not(Formula::not(p.clone())).classification(), Alpha);

    let alphas = [Operator::And, Operator::Nor, Operator::Biconditional];
    for op in Operator::ALL.iter().copied() {
        let binary = Formula::binary(p.clone(), q.clone(), op);
        let expected = if alphas.contains(&op) { Alpha } else { Beta };
        assert_eq!(binary.classification(), expected, "{}", binary);
        assert_eq!(Formula::not(binary).classification(), !expected);
    }
}

#[test]
fn complement() {
    let (p, q, _) = letters();
    let and = Formula::and(p.clone(), q);

    assert_eq!(p.complement(), Formula::not(p.clone()));
    assert_eq!(Formula::not(p.clone()).complement(), p);
    assert_eq!(and.complement(), Formula::not(and.clone()));
    assert_eq!(and.complement().complement(), and);
    assert_eq!(
        Formula::not(Formula::not(p.clone())).complement(),
        Formula::not(p)
    );
}

#[test]
fn display() {
    let (p, q, r) = letters();
    let f = Formula::not(Formula::biconditional(
        Formula::not(Formula::xor(p.clone(), q.clone())),
        Formula::nand(r.clone(), Formula::nor(q.clone(), r.clone())),
    ));

    assert_eq!(f.to_string(), "!(!(p ^ q) <-> (r !& (q !| r)))");
    assert_eq!(
        f.display(Notation::Unicode).to_string(),
        "¬(¬(p ⊕ q) ↔ (r ↑ (q ↓ r)))"
    );
    assert_eq!(
        Formula::implies(p, Formula::not(q))
            .display(Notation::Latex)
            .to_string(),
        r"\left(p \to \neg q\right)"
    );
}

#[test]
fn letters_and_size() {
    let (p, q, r) = letters();
    let f = Formula::or(
        Formula::and(q.clone(), p.clone()),
        Formula::not(Formula::implies(r, q)),
    );

    let names = f.letters();
    assert_eq!(
        names.iter().map(|name| name.as_ref()).collect::<Vec<_>>(),
        vec!["p", "q", "r"]
    );
    assert_eq!(f.size(), 8);
    assert_eq!(p.size(), 1);
}

#[test]
fn partial_evaluation() {
    let (p, q, _) = letters();
    let only_p = vec![("p", true)].into_iter().collect::<Assignment>();

    assert_eq!(Formula::or(p.clone(), q.clone()).evaluate(&only_p), Some(true));
    assert_eq!(Formula::and(p.clone(), q.clone()).evaluate(&only_p), None);
    assert_eq!(
        Formula::nand(Formula::not(p.clone()), q.clone()).evaluate(&only_p),
        Some(true)
    );
    assert_eq!(Formula::xor(p, q).evaluate(&only_p), None);
}

#[test]
fn random_formulas_have_requested_depth() {
    use rand::{rngs::StdRng, SeedableRng};

    fn depth(formula: &Formula) -> usize {
        match formula.shape() {
            Shape::Letter(_) => 0,
            Shape::Not(inner) => 1 + depth(inner),
            Shape::Binary(left, right, _) => 1 + std::cmp::max(depth(left), depth(right)),
        }
    }

    let mut rng = StdRng::seed_from_u64(7);
    for size in 0..8 {
        let formula = Formula::random(&mut rng, size);
        assert_eq!(depth(&formula), size, "{}", formula);
        assert!(formula
            .letters()
            .iter()
            .all(|name| RANDOM_LETTERS.contains(name.as_ref())));
    }
}

#[test]
fn deep_negation_chains() {
    use std::collections::HashSet;

    let p = Formula::letter("p");
    let mut chain = p.clone();
    let mut rebuilt = p.clone();
    for _ in 0..100_000 {
        chain = Formula::not(chain);
        rebuilt = Formula::not(rebuilt);
    }

    assert_eq!(chain.size(), 100_001);
    assert_eq!(chain.letters(), vec![Arc::<str>::from("p")]);
    assert_eq!(chain.complement().complement(), chain);
    assert!(chain.complement() < chain);

    let mut seen = HashSet::new();
    assert!(seen.insert(chain.clone()));
    assert!(seen.contains(&chain.complement().complement()));
    assert!(!seen.contains(&rebuilt.complement()));
    assert_eq!(seen.len(), 1);
}
