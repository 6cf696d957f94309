pub mod definitions;
pub use definitions::*;
pub mod pretty_print;
pub mod types;
pub mod visitor;


use crate::ir::types::Type;
use deltasql_datastructures::unique_ordered_map::DuplicateKeyError;
use thiserror::Error;

/// Internal-invariant violations. These are compiler defects, not user
/// errors: they abort compilation and are never coerced into a value.
/// Malformed-query errors belong to the frontend and never originate here.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum Error {
    #[error("null value with non-nullable type for {kind} literal at {origin:?}")]
    NullWithNonNullableType { kind: &'static str, origin: Origin },
    #[error("{kind} literal constructed against type {ty:?} at {origin:?}")]
    LiteralTypeMismatch {
        kind: &'static str,
        ty: Type,
        origin: Origin,
    },
    #[error("{text:?} is not a valid calendar date at {origin:?}")]
    InvalidCalendarDate { text: String, origin: Origin },
    #[error("{kind} node at {origin:?} appears as its own ancestor")]
    SelfReferentialNode { kind: &'static str, origin: Origin },
    #[error("comparator requires a tuple type, got {ty:?} at {origin:?}")]
    NonTupleComparator { ty: Type, origin: Origin },
    #[error("sort field {field} out of range for tuple type {ty:?} at {origin:?}")]
    SortFieldOutOfRange {
        field: usize,
        ty: Type,
        origin: Origin,
    },
    #[error("duplicate struct field: {0}")]
    DuplicateStructField(#[from] DuplicateKeyError),
}
