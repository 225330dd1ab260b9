use crate::{
    formula::{Classification, Formula, Literal},
    sets::FormulaSet,
    Assignment, NodeIdx,
};
use std::{collections::BTreeSet, marker::PhantomData};

mod builder;
mod evaluator;
pub mod node;
pub mod strategy;
mod visited;

pub use node::{Mark, Node, NodeRef};
pub use strategy::{Analytic, Buffered, Semantic, Strategy};

pub const ROOT: NodeIdx = 0;

/// A finished tableau. Nodes live in an arena and refer to each other by
/// index; the root is always at [`ROOT`].
#[derive(Clone, Debug)]
pub struct Tableau<S: Strategy> {
    nodes: Vec<Node<S::Set>>,
    strategy: PhantomData<S>,
}

impl<S: Strategy> Tableau<S> {
    /// Expands `formula` until every branch is closed or open
    pub fn build(formula: Formula) -> Self {
        builder::build(formula)
    }

    fn with_root(formulas: S::Set) -> Self {
        Self {
            nodes: vec![Node::new(formulas, None)],
            strategy: PhantomData,
        }
    }

    fn push(&mut self, parent: NodeIdx, formulas: S::Set) -> NodeIdx {
        self.nodes.push(Node::new(formulas, Some(parent)));
        self.nodes.len() - 1
    }

    pub fn root(&self) -> NodeRef<'_, S> {
        NodeRef::new(self, ROOT)
    }

    pub fn node(&self, idx: NodeIdx) -> NodeRef<'_, S> {
        assert!(idx < self.nodes.len(), "no node {} in tableau", idx);
        NodeRef::new(self, idx)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn height(&self) -> usize {
        self.root().height()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_, S>> {
        (0..self.nodes.len()).map(move |idx| NodeRef::new(self, idx))
    }

    pub fn leaves(&self) -> impl Iterator<Item = NodeRef<'_, S>> {
        self.nodes().filter(NodeRef::is_leaf)
    }

    pub fn is_satisfiable(&self) -> bool {
        self.leaves().any(|leaf| leaf.is_open())
    }

    /// Satisfying assignments of the formula the tableau was built for
    pub fn evaluate(&self) -> Vec<Assignment> {
        self.root().evaluate()
    }

    /// Nodes whose formulas are visible from `idx`, nearest first
    pub(crate) fn branch(&self, idx: NodeIdx) -> Branch<'_, S> {
        Branch {
            tableau: self,
            next: Some(idx),
        }
    }

    pub fn has_complement_of(&self, idx: NodeIdx, formula: &Formula) -> bool {
        self.branch(idx)
            .any(|node| node.formulas.has_complement_of(formula))
    }

    /// The first formula of class `class` on the branch of `idx` that has not
    /// been expanded yet, looking at the nearest nodes first
    pub(crate) fn unvisited(
        &self,
        idx: NodeIdx,
        class: Classification,
        is_visited: impl Fn(&Formula) -> bool,
    ) -> Option<&Formula> {
        self.branch(idx)
            .flat_map(|node| node.formulas.classified(class))
            .find(|formula| !is_visited(formula))
    }

    pub(crate) fn unvisited_alpha(
        &self,
        idx: NodeIdx,
        is_visited: impl Fn(&Formula) -> bool,
    ) -> Option<&Formula> {
        self.unvisited(idx, Classification::Alpha, is_visited)
    }

    pub(crate) fn unvisited_beta(
        &self,
        idx: NodeIdx,
        is_visited: impl Fn(&Formula) -> bool,
    ) -> Option<&Formula> {
        self.unvisited(idx, Classification::Beta, is_visited)
    }

    /// Literals visible from `idx`
    pub fn branch_literals(&self, idx: NodeIdx) -> BTreeSet<Literal> {
        self.branch(idx)
            .flat_map(|node| node.formulas.literals())
            .filter_map(Formula::as_literal)
            .collect()
    }

    pub fn has_complementary_literals(&self, idx: NodeIdx) -> bool {
        let literals = self.branch_literals(idx);
        literals
            .iter()
            .any(|literal| literals.contains(&!literal.clone()))
    }
}

/// Walks from a node towards the root. Stops after the first node when each
/// node already holds its whole branch.
pub(crate) struct Branch<'a, S: Strategy> {
    tableau: &'a Tableau<S>,
    next: Option<NodeIdx>,
}

impl<'a, S: Strategy> Iterator for Branch<'a, S> {
    type Item = &'a Node<S::Set>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.tableau.nodes[self.next?];
        self.next = if S::CUMULATIVE { None } else { node.parent };
        Some(node)
    }
}

/// Builds a tableau whose nodes each hold every formula of their branch
pub fn semantic_tableau(formula: Formula) -> Tableau<Semantic> {
    Tableau::build(formula)
}

/// Builds a tableau whose nodes hold only the formulas derived there
pub fn analytic_tableau(formula: Formula) -> Tableau<Analytic> {
    Tableau::build(formula)
}

/// Builds a tableau whose nodes hold at most two formulas each
pub fn buffered_tableau(formula: Formula) -> Tableau<Buffered> {
    Tableau::build(formula)
}

#[cfg(test)]
use crate::{formula::ParseError, TruthTable};

#[cfg(test)]
fn models<S: Strategy>(formula: &Formula) -> Vec<Assignment> {
    let tableau = Tableau::<S>::build(formula.clone());
    for leaf in tableau.leaves() {
        assert!(
            leaf.is_closed() || (leaf.is_open() && leaf.is_literal_only()),
            "malformed {} leaf {:?}",
            S::NAME,
            leaf
        );
    }
    tableau.evaluate()
}

#[cfg(test)]
fn all_models(formula: &Formula) -> Vec<Assignment> {
    let semantic = models::<Semantic>(formula);
    assert_eq!(semantic, models::<Analytic>(formula));
    assert_eq!(semantic, models::<Buffered>(formula));
    semantic
}

#[cfg(test)]
fn assignment(values: &[(&str, bool)]) -> Assignment {
    values.iter().map(|(name, value)| (*name, *value)).collect()
}

#[test]
fn contradiction() -> Result<(), ParseError> {
    let formula = "(p & !p)".parse()?;
    assert!(all_models(&formula).is_empty());

    let tableau = semantic_tableau(formula);
    assert!(!tableau.is_satisfiable());
    assert!(tableau.leaves().all(|leaf| leaf.is_closed()));
    Ok(())
}

#[test]
fn excluded_middle() -> Result<(), ParseError> {
    let formula = "(p | !p)".parse()?;
    assert_eq!(
        all_models(&formula),
        vec![assignment(&[("p", true)]), assignment(&[("p", false)])]
    );

    let tableau = analytic_tableau(formula);
    assert_eq!(tableau.leaves().filter(|leaf| leaf.is_open()).count(), 2);
    assert_eq!(tableau.len(), 3);
    Ok(())
}

#[test]
fn unsatisfiable_conjunction() -> Result<(), ParseError> {
    let formula = "((p | q) & (!p & !q))".parse()?;
    assert!(all_models(&formula).is_empty());
    assert!(!buffered_tableau(formula).is_satisfiable());
    Ok(())
}

#[test]
fn single_model() -> Result<(), ParseError> {
    let formula = "(p & (!q | !p))".parse()?;
    assert_eq!(
        all_models(&formula),
        vec![assignment(&[("p", true), ("q", false)])]
    );
    Ok(())
}

#[test]
fn closes_on_first_expansion() -> Result<(), ParseError> {
    let inner: Formula = "((q -> r) <-> (s ^ !t))".parse()?;
    let formula = Formula::and(inner.clone(), Formula::not(inner));

    let tableau = semantic_tableau(formula.clone());
    assert_eq!(tableau.height(), 2);
    assert_eq!(tableau.len(), 2);
    assert!(tableau.root().left().map_or(false, |child| child.is_closed()));
    assert_eq!(analytic_tableau(formula.clone()).height(), 2);
    assert_eq!(buffered_tableau(formula).height(), 2);
    Ok(())
}

#[test]
fn negated_contradiction_is_tautology() -> Result<(), ParseError> {
    let inner: Formula = "((q -> r) !| s)".parse()?;
    let formula = Formula::not(Formula::and(inner.clone(), Formula::not(inner)));
    let found = all_models(&formula);

    let table = TruthTable::new(&formula);
    assert!(table.is_tautology());
    for row in table.rows() {
        assert!(found.iter().any(|model| row.specializes(model)), "{}", row);
    }
    Ok(())
}

#[test]
fn repeated_subformulas_are_expanded_again() -> Result<(), ParseError> {
    let formula = "((p & q) & ((p & q) & (p & q)))".parse()?;
    assert_eq!(
        all_models(&formula),
        vec![assignment(&[("p", true), ("q", true)])]
    );
    Ok(())
}

#[test]
fn literal_root() {
    let tableau = semantic_tableau(Formula::not(Formula::letter("p")));
    assert_eq!(tableau.len(), 1);
    assert_eq!(tableau.root().mark(), Mark::Open);
    assert_eq!(tableau.evaluate(), vec![assignment(&[("p", false)])]);
}

#[test]
fn chain_nodes_hold_derived_formulas_only() -> Result<(), ParseError> {
    let formula = "((p | q) & !r)".parse()?;
    let tableau = buffered_tableau(formula);

    for node in tableau.nodes() {
        assert!(node.formulas().count() <= 2);
    }
    let leaf = tableau.leaves().next().map(|leaf| leaf.idx()).unwrap_or(ROOT);
    assert!(tableau.node(leaf).branch_formulas().count() > 2);
    assert_eq!(
        tableau
            .branch_literals(leaf)
            .into_iter()
            .map(|literal| literal.to_string())
            .collect::<Vec<_>>(),
        vec!["p", "!r"]
    );
    Ok(())
}

#[test]
fn long_double_negation_chain() {
    let negations = |count: usize| {
        let mut formula = Formula::letter("p");
        for _ in 0..count {
            formula = Formula::not(formula);
        }
        formula
    };

    let tableau = semantic_tableau(negations(20_000));
    assert_eq!(tableau.len(), 10_001);
    assert_eq!(tableau.evaluate(), vec![assignment(&[("p", true)])]);

    assert_eq!(all_models(&negations(501)), vec![assignment(&[("p", false)])]);
}
