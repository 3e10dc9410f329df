//! The closed error taxonomy shared by every layer of the engine.
//!
//! Every fallible operation in this crate returns [`Result`], and every
//! failure is one of the variants below — there is no per-module ad-hoc
//! error type. Callers match on `Error` directly; nothing here is meant to
//! be downcast.

use crate::value::ColumnType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("table already exists: {0}")]
    DuplicateTable(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("unknown type name: {0}")]
    UnknownType(String),

    #[error("unknown scan type: {0}")]
    UnknownScanType(String),

    #[error("type mismatch: expected {expected:?}, found {found:?}")]
    TypeMismatch {
        expected: ColumnType,
        found: ColumnType,
    },

    #[error("column is immutable")]
    Immutable,

    #[error("dictionary too large: {0} distinct values")]
    DictionaryTooLarge(usize),

    #[error("scan input mixes reference and base column variants for the same column")]
    InconsistentInput,

    #[error("accessed an input operator's output before it executed")]
    PrematureAccess,

    #[error("operator has already executed")]
    DoubleExecute,

    #[error("index out of bounds: {index} (len {len})")]
    OutOfBounds { index: usize, len: usize },
}
