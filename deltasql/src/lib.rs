//! The intermediate representation core of a compiler that lowers SQL query
//! plans into programs for an incremental dataflow engine.
//!
//! The frontend hands this crate a tree (or DAG, when sub-expressions are
//! shared) of fully typed nodes; optimization and lowering passes traverse
//! and rewrite it through the [`ir::visitor`] protocol; the code generator
//! consumes the rendered literal text and comparator descriptions. Parsing,
//! semantic analysis, and code emission live outside this crate.

pub mod ir;
pub mod result;
mod util;
