use crate::formula::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid formula: {0}")]
    Parse(#[from] ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no formula given")]
    EmptyInput,
}
