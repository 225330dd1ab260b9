use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use rand::Rng;
use std::collections::BTreeSet;
use tableaux::*;

const LETTERS: [&str; 4] = ["p", "q", "r", "s"];
const MAX_DEPTH: usize = 5;

#[derive(Clone, Debug)]
struct RandomFormula(Formula);

fn generate<G: Gen>(g: &mut G, depth: usize) -> Formula {
    if depth == 0 || g.gen_bool(0.2) {
        let letter = Formula::letter(LETTERS[g.gen_range(0, LETTERS.len())]);
        return if g.gen() { letter } else { Formula::not(letter) };
    }

    if g.gen_bool(0.3) {
        Formula::not(generate(g, depth - 1))
    } else {
        let op = Operator::ALL[g.gen_range(0, Operator::ALL.len())];
        Formula::binary(generate(g, depth - 1), generate(g, depth - 1), op)
    }
}

impl Arbitrary for RandomFormula {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        let depth = g.gen_range(0, MAX_DEPTH + 1);
        RandomFormula(generate(g, depth))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let parts = match self.0.shape() {
            Shape::Letter(_) => vec![],
            Shape::Not(inner) => vec![inner.clone()],
            Shape::Binary(left, right, _) => vec![left.clone(), right.clone()],
        };
        Box::new(parts.into_iter().map(RandomFormula))
    }
}

fn models<S: Strategy>(formula: &Formula) -> BTreeSet<Assignment> {
    Tableau::<S>::build(formula.clone())
        .evaluate()
        .into_iter()
        .collect()
}

fn well_formed<S: Strategy>(formula: &Formula) -> bool {
    let tableau = Tableau::<S>::build(formula.clone());
    let well_formed = tableau.leaves().all(|leaf| {
        leaf.is_closed()
            || (leaf.is_open()
                && leaf.is_literal_only()
                && !tableau.has_complementary_literals(leaf.idx()))
    });
    well_formed
}

#[quickcheck]
fn strategies_agree(formula: RandomFormula) -> bool {
    let RandomFormula(formula) = formula;
    let semantic = models::<Semantic>(&formula);
    semantic == models::<Analytic>(&formula) && semantic == models::<Buffered>(&formula)
}

#[quickcheck]
fn models_are_sound(formula: RandomFormula) -> bool {
    let RandomFormula(formula) = formula;
    let table = TruthTable::new(&formula);
    semantic_tableau(formula.clone())
        .evaluate()
        .iter()
        .all(|model| {
            table
                .extensions(model)
                .all(|row| formula.evaluate(&row) == Some(true))
        })
}

#[quickcheck]
fn satisfiable_iff_truth_table_has_model(formula: RandomFormula) -> bool {
    let RandomFormula(formula) = formula;
    let expected = TruthTable::new(&formula).is_satisfiable();
    analytic_tableau(formula.clone()).is_satisfiable() == expected
        && !buffered_tableau(formula).evaluate().is_empty() == expected
}

#[quickcheck]
fn every_row_model_is_covered(formula: RandomFormula) -> bool {
    let RandomFormula(formula) = formula;
    let found = models::<Buffered>(&formula);
    TruthTable::new(&formula)
        .models()
        .iter()
        .all(|row| found.iter().any(|model| row.specializes(model)))
}

#[quickcheck]
fn leaves_are_well_formed(formula: RandomFormula) -> bool {
    let RandomFormula(formula) = formula;
    well_formed::<Semantic>(&formula)
        && well_formed::<Analytic>(&formula)
        && well_formed::<Buffered>(&formula)
}

#[quickcheck]
fn cleanup_is_idempotent(raw: Vec<Vec<(u8, bool)>>) -> bool {
    let assignments = raw
        .into_iter()
        .map(|values| {
            values
                .into_iter()
                .map(|(letter, value)| (LETTERS[letter as usize % LETTERS.len()], value))
                .collect::<Assignment>()
        })
        .collect::<Vec<_>>();

    let once = Assignment::clean(assignments);
    Assignment::clean(once.clone()) == once
}

#[test]
fn random_formulas_build() {
    let mut rng = rand::thread_rng();
    for size in 0..4 {
        let formula = Formula::random(&mut rng, size);
        assert_eq!(
            semantic_tableau(formula.clone()).is_satisfiable(),
            TruthTable::new(&formula).is_satisfiable(),
            "{}",
            formula
        );
    }
}
