use crate::{
    formula::Formula,
    sets::FormulaSet,
    tableau::{evaluator, Strategy, Tableau},
    Assignment, NodeIdx,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mark {
    Unmarked,
    Open,
    Closed,
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Mark::Unmarked => write!(f, "unmarked"),
            Mark::Open => write!(f, "Open"),
            Mark::Closed => write!(f, "Closed"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Node<F> {
    pub(crate) formulas: F,
    /// Only used to look up ancestor formulas
    pub(crate) parent: Option<NodeIdx>,
    pub(crate) left: Option<NodeIdx>,
    pub(crate) right: Option<NodeIdx>,
    pub(crate) mark: Mark,
}

impl<F: FormulaSet> Node<F> {
    pub(crate) fn new(formulas: F, parent: Option<NodeIdx>) -> Self {
        Self {
            formulas,
            parent,
            left: None,
            right: None,
            mark: Mark::Unmarked,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Read-only view of a node, the interface renderers walk the tree with
pub struct NodeRef<'a, S: Strategy> {
    tableau: &'a Tableau<S>,
    idx: NodeIdx,
}

impl<S: Strategy> Clone for NodeRef<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Strategy> Copy for NodeRef<'_, S> {}

impl<'a, S: Strategy> NodeRef<'a, S> {
    pub(crate) fn new(tableau: &'a Tableau<S>, idx: NodeIdx) -> Self {
        Self { tableau, idx }
    }

    #[inline]
    fn node(&self) -> &'a Node<S::Set> {
        &self.tableau.nodes[self.idx]
    }

    pub fn idx(&self) -> NodeIdx {
        self.idx
    }

    pub fn tableau(&self) -> &'a Tableau<S> {
        self.tableau
    }

    pub fn mark(&self) -> Mark {
        self.node().mark
    }

    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    pub fn is_open(&self) -> bool {
        self.is_leaf() && self.mark() == Mark::Open
    }

    pub fn is_closed(&self) -> bool {
        self.is_leaf() && self.mark() == Mark::Closed
    }

    pub fn left(&self) -> Option<NodeRef<'a, S>> {
        self.node().left.map(|idx| NodeRef::new(self.tableau, idx))
    }

    pub fn right(&self) -> Option<NodeRef<'a, S>> {
        self.node().right.map(|idx| NodeRef::new(self.tableau, idx))
    }

    pub fn parent(&self) -> Option<NodeRef<'a, S>> {
        self.node().parent.map(|idx| NodeRef::new(self.tableau, idx))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, S>> {
        self.left().into_iter().chain(self.right())
    }

    /// The formulas stored at this node
    pub fn formulas(&self) -> Box<dyn Iterator<Item = &'a Formula> + 'a> {
        self.node().formulas.iter()
    }

    /// Every formula visible from this node, including inherited ones
    pub fn branch_formulas(&self) -> impl Iterator<Item = &'a Formula> + 'a {
        self.tableau
            .branch(self.idx)
            .flat_map(|node| node.formulas.iter())
    }

    pub fn is_literal_only(&self) -> bool {
        self.node().formulas.is_literal_only()
    }

    /// Number of nodes on the longest path from this node down to a leaf
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending = vec![(*self, 1)];
        while let Some((node, depth)) = pending.pop() {
            height = std::cmp::max(height, depth);
            pending.extend(node.children().map(|child| (child, depth + 1)));
        }
        height
    }

    /// Satisfying assignments found below this node, without redundant ones
    pub fn evaluate(&self) -> Vec<Assignment> {
        Assignment::clean(evaluator::collect(*self))
    }
}

impl<S: Strategy> std::fmt::Debug for NodeRef<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("idx", &self.idx)
            .field("formulas", &self.node().formulas)
            .field("mark", &self.mark())
            .finish()
    }
}
