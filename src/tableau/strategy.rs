use crate::sets::{BufferSet, FormulaSet, PartitionedSet};

/// How a tableau stores the formulas of a branch.
///
/// A cumulative strategy copies the parent's formulas into every child, so a
/// node alone answers every question about its branch. Otherwise a node only
/// keeps the formulas derived at that node and lookups walk up to the root.
pub trait Strategy {
    type Set: FormulaSet;

    const CUMULATIVE: bool;

    const NAME: &'static str;
}

/// Full-copy sets: every node holds its whole branch, closing branches as
/// soon as a formula and its complement meet
#[derive(Clone, Copy, Debug)]
pub enum Semantic {}

/// Ancestor-chain lookups over partitioned node-local sets
#[derive(Clone, Copy, Debug)]
pub enum Analytic {}

/// Ancestor-chain lookups over two-slot node-local buffers
#[derive(Clone, Copy, Debug)]
pub enum Buffered {}

impl Strategy for Semantic {
    type Set = PartitionedSet;
    const CUMULATIVE: bool = true;
    const NAME: &'static str = "semantic";
}

impl Strategy for Analytic {
    type Set = PartitionedSet;
    const CUMULATIVE: bool = false;
    const NAME: &'static str = "analytic";
}

impl Strategy for Buffered {
    type Set = BufferSet;
    const CUMULATIVE: bool = false;
    const NAME: &'static str = "buffered";
}
