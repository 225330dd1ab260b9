mod assignment;
mod error;
pub mod formula;
pub mod render;
mod rules;
pub mod sets;
mod sign;
pub mod tableau;
mod truth_table;

pub use assignment::Assignment;
pub use error::Error;
pub use formula::{parse, Formula, Literal, Notation, Operator, ParseError, Shape};
pub use sign::Sign;
pub use tableau::{
    analytic_tableau, buffered_tableau, semantic_tableau, Analytic, Buffered, Mark, NodeRef,
    Semantic, Strategy, Tableau,
};
pub use truth_table::TruthTable;

pub type NodeIdx = usize;
pub type FormulaIdx = usize;

pub trait Evaluate {
    fn evaluate(&self, assignment: &Assignment) -> Option<bool>;
}
