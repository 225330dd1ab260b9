use crate::{
    tableau::{NodeRef, Strategy},
    Assignment,
};

/// One assignment per open leaf below `start`, left to right, before any
/// cleanup. Closed leaves contribute nothing.
pub(crate) fn collect<S: Strategy>(start: NodeRef<'_, S>) -> Vec<Assignment> {
    let tableau = start.tableau();
    let mut assignments = Vec::new();
    let mut pending = vec![start];

    while let Some(node) = pending.pop() {
        if node.is_open() {
            let literals = tableau.branch_literals(node.idx());
            assignments.push(Assignment::from_literals(&literals));
        }
        pending.extend(node.right());
        pending.extend(node.left());
    }

    assignments
}
