//! Columnar, in-memory relational storage and execution engine.
//!
//! Tables are segmented into fixed-size chunks; each column within a chunk is
//! one of three physical encodings (`Column::Value`, `Column::Dictionary`,
//! `Column::Reference`). Queries are built as a tree of [`operator::Operator`]
//! nodes and executed once, top-down, via `execute()`.

pub mod attribute_vector;
pub mod chunk;
pub mod column;
pub mod error;
pub mod ids;
pub mod operator;
pub mod registry;
pub mod schema;
pub mod table;
pub mod value;

pub use error::{Error, Result};
