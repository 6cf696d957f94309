use crate::ir;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum Error {
    #[error("internal error: {0}")]
    Internal(#[from] ir::Error),
}
