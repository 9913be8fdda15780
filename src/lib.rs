//! splat-args: typed parameter groups for splatting pipelines
//!
//! Parameter groups are declared as explicit schemas, turned into command-line
//! options, parsed, and resolved against the `cfg_args` snapshot of an earlier run
//! with precedence CLI > File > Defaults.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod params;
pub mod schema;
pub mod utils;

pub use config::{get_combined_args, resolve};
pub use domain::{GroupSchema, ParamSpec, ParamValue, ParseResult, ResolvedConfig};
pub use error::{SchemaError, SnapshotError};
pub use schema::{extract, ArgRegistry};
