use crate::{
    formula::Formula,
    rules,
    sets::FormulaSet,
    tableau::{
        visited::{Interner, Visited},
        Mark, Strategy, Tableau,
    },
    NodeIdx,
};
use tracing::{debug, debug_span, trace};

pub(super) fn build<S: Strategy>(formula: Formula) -> Tableau<S> {
    let span = debug_span!("build", strategy = S::NAME, formula = %formula);
    let _enter = span.enter();

    let mut builder = Builder::<S>::new(formula);
    builder.run();
    debug!(
        nodes = builder.tableau.len(),
        expanded = builder.interner.len(),
        "tableau finished"
    );
    builder.tableau
}

enum Step {
    Expanded,
    Revisit,
    Terminal,
}

struct Builder<S: Strategy> {
    tableau: Tableau<S>,
    interner: Interner,
    /// Nodes still to expand, each with the marks of its own branch
    pending: Vec<(NodeIdx, Visited)>,
}

impl<S: Strategy> Builder<S> {
    fn new(formula: Formula) -> Self {
        let mut root = S::Set::default();
        root.insert(formula);
        Self {
            tableau: Tableau::with_root(root),
            interner: Interner::default(),
            pending: vec![(super::ROOT, Visited::default())],
        }
    }

    fn run(&mut self) {
        while let Some((idx, mut visited)) = self.pending.pop() {
            loop {
                match self.step(idx, &mut visited) {
                    Step::Expanded => break,
                    Step::Revisit => self.unmark_local(idx, &mut visited),
                    Step::Terminal => {
                        self.terminate(idx);
                        break;
                    }
                }
            }
        }
    }

    fn step(&mut self, idx: NodeIdx, visited: &mut Visited) -> Step {
        if let Some(alpha) = self.choose_alpha(idx, visited) {
            self.expand_alpha(idx, alpha, std::mem::take(visited));
            return Step::Expanded;
        }

        if let Some(beta) = self.choose_beta(idx, visited) {
            self.expand_beta(idx, beta, std::mem::take(visited));
            return Step::Expanded;
        }

        if self.tableau.nodes[idx].formulas.iter().all(Formula::is_literal) {
            Step::Terminal
        } else {
            // Only already expanded formulas were derived again here
            Step::Revisit
        }
    }

    fn choose_alpha(&self, idx: NodeIdx, visited: &Visited) -> Option<Formula> {
        let interner = &self.interner;
        self.tableau
            .unvisited_alpha(idx, |formula| is_visited(interner, visited, formula))
            .cloned()
    }

    fn choose_beta(&self, idx: NodeIdx, visited: &Visited) -> Option<Formula> {
        let interner = &self.interner;
        self.tableau
            .unvisited_beta(idx, |formula| is_visited(interner, visited, formula))
            .cloned()
    }

    fn expand_alpha(&mut self, idx: NodeIdx, formula: Formula, mut visited: Visited) {
        trace!(node = idx, %formula, "alpha");
        visited.mark(self.interner.intern(&formula));

        let (first, second) = rules::apply(&formula);
        let child = self.spawn(idx, &formula, std::iter::once(first).chain(second));
        self.tableau.nodes[idx].left = Some(child);
        self.schedule(child, visited);
    }

    fn expand_beta(&mut self, idx: NodeIdx, formula: Formula, mut visited: Visited) {
        trace!(node = idx, %formula, visited = visited.count(), "beta");
        visited.mark(self.interner.intern(&formula));

        let (first, second) = match rules::apply(&formula) {
            (first, Some(second)) => (first, second),
            (_, None) => unreachable!("beta formula {} expanded to a single formula", formula),
        };
        let left = self.spawn(idx, &formula, std::iter::once(first));
        let right = self.spawn(idx, &formula, std::iter::once(second));
        self.tableau.nodes[idx].left = Some(left);
        self.tableau.nodes[idx].right = Some(right);

        // Left is popped first
        self.schedule(right, visited.clone());
        self.schedule(left, visited);
    }

    /// Adds a child of `parent` holding `derived`, closing it straight away if
    /// one of the derived formulas contradicts the branch
    fn spawn(
        &mut self,
        parent: NodeIdx,
        expanded: &Formula,
        derived: impl IntoIterator<Item = Formula>,
    ) -> NodeIdx {
        let mut formulas = if S::CUMULATIVE {
            let mut inherited = self.tableau.nodes[parent].formulas.clone();
            inherited.remove(expanded);
            inherited
        } else {
            S::Set::default()
        };

        let mut closed = false;
        for formula in derived {
            if !S::CUMULATIVE && self.tableau.has_complement_of(parent, &formula) {
                closed = true;
            }
            closed |= formulas.insert(formula);
        }

        let child = self.tableau.push(parent, formulas);
        if closed {
            trace!(node = child, "closed on expansion");
            self.tableau.nodes[child].mark = Mark::Closed;
        }
        child
    }

    fn schedule(&mut self, idx: NodeIdx, visited: Visited) {
        if self.tableau.nodes[idx].mark == Mark::Unmarked {
            self.pending.push((idx, visited));
        }
    }

    fn unmark_local(&self, idx: NodeIdx, visited: &mut Visited) {
        trace!(node = idx, "revisiting repeated formulas");
        let local = self.tableau.nodes[idx].formulas.iter();
        for formula in local.filter(|formula| !formula.is_literal()) {
            if let Some(formula_idx) = self.interner.get(formula) {
                visited.unmark(formula_idx);
            }
        }
    }

    fn terminate(&mut self, idx: NodeIdx) {
        let mark = if self.tableau.has_complementary_literals(idx) {
            Mark::Closed
        } else {
            Mark::Open
        };
        trace!(node = idx, %mark, "branch finished");
        self.tableau.nodes[idx].mark = mark;
    }
}

fn is_visited(interner: &Interner, visited: &Visited, formula: &Formula) -> bool {
    interner
        .get(formula)
        .map_or(false, |idx| visited.contains(idx))
}
