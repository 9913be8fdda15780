//! Core data types: values, schemas and value maps

pub mod schema;
pub mod value;
pub mod values;

pub use schema::{GroupSchema, ParamSpec, SHORT_FORM_MARKER};
pub use value::{ParamKind, ParamValue};
pub use values::{ArgValues, GroupParams, ParseResult, ResolvedConfig};
