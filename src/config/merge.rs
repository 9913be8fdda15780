//! Layered merge of defaults, persisted config and command-line values
//!
//! Precedence, lowest to highest: declared defaults, persisted configuration,
//! supplied command-line values. A command-line entry that was not supplied
//! never shadows a lower layer.

use crate::domain::{ParseResult, ResolvedConfig};

pub fn merge_layers(
    defaults: ResolvedConfig,
    persisted: ResolvedConfig,
    cmdline: &ParseResult,
) -> ResolvedConfig {
    defaults
        .overlay(persisted)
        .overlay(cmdline.supplied().map(|(key, value)| (key.to_string(), value.clone())))
}
