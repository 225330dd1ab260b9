use crate::formula::{operator::OPERATORS_COUNT, Classification, Formula, Operator, Shape};

/// Maps the operands of a binary formula to the two consequences of its rule
type Rule = fn(&Formula, &Formula) -> (Formula, Formula);

fn and(left: &Formula, right: &Formula) -> (Formula, Formula) {
    (left.clone(), right.clone())
}

fn or(left: &Formula, right: &Formula) -> (Formula, Formula) {
    (left.clone(), right.clone())
}

fn not_and(left: &Formula, right: &Formula) -> (Formula, Formula) {
    (Formula::not(left.clone()), Formula::not(right.clone()))
}

fn not_or(left: &Formula, right: &Formula) -> (Formula, Formula) {
    (Formula::not(left.clone()), Formula::not(right.clone()))
}

fn implies(left: &Formula, right: &Formula) -> (Formula, Formula) {
    (Formula::not(left.clone()), right.clone())
}

fn not_implies(left: &Formula, right: &Formula) -> (Formula, Formula) {
    (left.clone(), Formula::not(right.clone()))
}

fn biconditional(left: &Formula, right: &Formula) -> (Formula, Formula) {
    (
        Formula::implies(left.clone(), right.clone()),
        Formula::implies(right.clone(), left.clone()),
    )
}

fn not_biconditional(left: &Formula, right: &Formula) -> (Formula, Formula) {
    (
        Formula::not(Formula::implies(left.clone(), right.clone())),
        Formula::not(Formula::implies(right.clone(), left.clone())),
    )
}

/// Rules for alpha formulas, indexed by operator. A binary operator's formula
/// is alpha either bare (`&`, `!|`, `<->`) or negated (`|`, `->`, `!&`, `^`).
const ALPHA_RULES: [Rule; OPERATORS_COUNT] = [
    and,
    not_or,
    not_implies,
    // !(a !& b) is a & b
    and,
    not_or,
    biconditional,
    // !(a ^ b) is a <-> b
    biconditional,
];

/// Rules for beta formulas, indexed by operator
const BETA_RULES: [Rule; OPERATORS_COUNT] = [
    not_and,
    or,
    implies,
    not_and,
    // !(a !| b) is a | b
    or,
    not_biconditional,
    not_biconditional,
];

fn apply_classified(
    op: Operator,
    class: Classification,
    left: &Formula,
    right: &Formula,
) -> (Formula, Option<Formula>) {
    let rule = match class {
        Classification::Alpha => ALPHA_RULES[op as usize],
        Classification::Beta => BETA_RULES[op as usize],
        Classification::Literal => panic!("no tableau rule for a literal classification"),
    };
    let (first, second) = rule(left, right);
    (first, Some(second))
}

/// Applies the tableau rule for a compound formula, returning its consequences.
///
/// Double negation is the only rule with a single consequence, in which case
/// the second element is `None`.
///
/// # Panics
///
/// Panics if `formula` is a literal, since no rule applies to it.
pub fn apply(formula: &Formula) -> (Formula, Option<Formula>) {
    match formula.shape() {
        Shape::Not(inner) => match inner.shape() {
            Shape::Not(negated) => (negated.clone(), None),
            Shape::Binary(left, right, op) => {
                apply_classified(*op, formula.classification(), left, right)
            }
            Shape::Letter(_) => panic!("cannot apply a tableau rule to literal {}", formula),
        },
        Shape::Binary(left, right, op) => {
            apply_classified(*op, formula.classification(), left, right)
        }
        Shape::Letter(_) => panic!("cannot apply a tableau rule to literal {}", formula),
    }
}

#[cfg(test)]
fn operands() -> (Formula, Formula) {
    let (p, p1, p2) = (
        Formula::letter("P"),
        Formula::letter("P1"),
        Formula::letter("P2"),
    );
    let (q, q1, q2) = (
        Formula::letter("Q"),
        Formula::letter("Q1"),
        Formula::letter("Q2"),
    );
    (
        Formula::not(Formula::and(Formula::or(p, p1), p2)),
        Formula::or(
            Formula::not(Formula::or(q.clone(), q1)),
            Formula::and(q, q2),
        ),
    )
}

#[test]
fn alpha_rules() {
    let (a, b) = operands();
    let not = Formula::not;
    let pair = |x: Formula, y: Formula| (x, Some(y));

    assert_eq!(apply(&not(not(a.clone()))), (a.clone(), None));
    assert_eq!(apply(&Formula::and(a.clone(), b.clone())), pair(a.clone(), b.clone()));
    assert_eq!(
        apply(&not(Formula::or(a.clone(), b.clone()))),
        pair(not(a.clone()), not(b.clone()))
    );
    assert_eq!(
        apply(&not(Formula::implies(a.clone(), b.clone()))),
        pair(a.clone(), not(b.clone()))
    );
    assert_eq!(
        apply(&not(Formula::nand(a.clone(), b.clone()))),
        pair(a.clone(), b.clone())
    );
    assert_eq!(
        apply(&Formula::nor(a.clone(), b.clone())),
        pair(not(a.clone()), not(b.clone()))
    );
    assert_eq!(
        apply(&Formula::biconditional(a.clone(), b.clone())),
        pair(
            Formula::implies(a.clone(), b.clone()),
            Formula::implies(b.clone(), a.clone())
        )
    );
    assert_eq!(
        apply(&not(Formula::xor(a.clone(), b.clone()))),
        pair(
            Formula::implies(a.clone(), b.clone()),
            Formula::implies(b, a)
        )
    );
}

#[test]
fn beta_rules() {
    let (a, b) = operands();
    let not = Formula::not;
    let pair = |x: Formula, y: Formula| (x, Some(y));

    assert_eq!(
        apply(&not(Formula::and(a.clone(), b.clone()))),
        pair(not(a.clone()), not(b.clone()))
    );
    assert_eq!(apply(&Formula::or(a.clone(), b.clone())), pair(a.clone(), b.clone()));
    assert_eq!(
        apply(&Formula::implies(a.clone(), b.clone())),
        pair(not(a.clone()), b.clone())
    );
    assert_eq!(
        apply(&Formula::nand(a.clone(), b.clone())),
        pair(not(a.clone()), not(b.clone()))
    );
    assert_eq!(
        apply(&not(Formula::nor(a.clone(), b.clone()))),
        pair(a.clone(), b.clone())
    );
    assert_eq!(
        apply(&not(Formula::biconditional(a.clone(), b.clone()))),
        pair(
            not(Formula::implies(a.clone(), b.clone())),
            not(Formula::implies(b.clone(), a.clone()))
        )
    );
    assert_eq!(
        apply(&Formula::xor(a.clone(), b.clone())),
        pair(
            not(Formula::implies(a.clone(), b.clone())),
            not(Formula::implies(b, a))
        )
    );
}

#[test]
#[should_panic(expected = "cannot apply a tableau rule to literal p")]
fn letters_have_no_rule() {
    apply(&Formula::letter("p"));
}

#[test]
#[should_panic(expected = "cannot apply a tableau rule to literal !p")]
fn negated_letters_have_no_rule() {
    apply(&Formula::not(Formula::letter("p")));
}
