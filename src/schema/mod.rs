//! Schema reflection: parameter groups to command-line options and back
//!
//! [`ArgRegistry`] turns [`crate::domain::GroupSchema`]s into `clap` options and
//! parses process arguments into a flat [`crate::domain::ParseResult`];
//! [`extract`] pulls one group's values back out of it.

pub mod extract;
pub mod registry;

pub use extract::extract;
pub use registry::{ArgRegistry, RegisteredParam};
