//! Typed errors for schema registration and persisted-configuration parsing.

use crate::domain::ParamKind;
use thiserror::Error;

/// Problems with a parameter group schema.
///
/// Raised while registering a group into an [`crate::schema::ArgRegistry`] or while
/// reading typed values back out of an extracted group. All of these are startup
/// errors: the option surface is inconsistent and nothing should be parsed.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("group '{group}': option '{name}' has unsupported default type '{found}'")]
    UnsupportedType { group: String, name: String, found: String },

    #[error("group '{group}': invalid option name '{name}'")]
    InvalidName { group: String, name: String },

    #[error("option '--{name}' is reserved")]
    Reserved { name: String },

    #[error("option '--{name}' in group '{group}' is already registered by group '{existing}'")]
    DuplicateOption { name: String, group: String, existing: String },

    #[error("short option '-{short}' for '--{name}' collides with '--{existing}'")]
    DuplicateShort { short: char, name: String, existing: String },

    #[error("parameter group '{title}' is already registered")]
    DuplicateGroup { title: String },

    #[error("group '{group}' has no option named '{name}'")]
    UnknownParam { group: String, name: String },

    #[error("option '{name}' expected a {expected} value, found {found}")]
    TypeMismatch { name: String, expected: ParamKind, found: ParamKind },

    #[error("schema document is not a table of parameter groups: {0}")]
    InvalidDocument(String),

    #[error("invalid schema TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Problems with the textual content of a persisted configuration.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("line {line}, column {column}: {message}")]
    Syntax { line: usize, column: usize, message: String },

    #[error("duplicate key '{key}'")]
    DuplicateKey { key: String },

    #[error("key '{key}' has unsupported value type '{found}'")]
    UnsupportedValue { key: String, found: String },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
