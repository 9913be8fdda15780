//! Built-in parameter groups
//!
//! Each group is a schema (names, defaults, short forms) plus a typed view that is
//! read back from a parse result or a resolved configuration.

pub mod model;
pub mod optimization;
pub mod pipeline;
pub mod scripts;

pub use model::ModelParams;
pub use optimization::OptimizationParams;
pub use pipeline::PipelineParams;

use crate::domain::{ArgValues, GroupParams, GroupSchema};
use crate::error::SchemaError;
use crate::schema::{extract, ArgRegistry};
use anyhow::Result;

/// A parameter group with a fixed schema and a typed representation.
pub trait ParamGroup: Sized {
    /// Help heading of the group's options.
    const TITLE: &'static str;

    fn schema() -> GroupSchema;

    /// Build the typed view from extracted values; unsupplied values take the default.
    fn from_group(group: &GroupParams) -> Result<Self>;

    fn register(registry: &mut ArgRegistry, fill_none: bool) -> Result<(), SchemaError> {
        registry.register(&Self::schema(), fill_none)
    }

    fn extract(source: &impl ArgValues) -> Result<Self> {
        Self::from_group(&extract(&Self::schema(), source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Command;

    #[test]
    fn built_in_groups_register_together() {
        let mut registry = ArgRegistry::new(Command::new("train"));
        ModelParams::register(&mut registry, false).expect("model");
        OptimizationParams::register(&mut registry, false).expect("optimization");
        PipelineParams::register(&mut registry, false).expect("pipeline");
        registry.register(&scripts::train_options(), false).expect("train options");

        assert_eq!(
            registry.groups(),
            [
                ModelParams::TITLE,
                OptimizationParams::TITLE,
                PipelineParams::TITLE,
                scripts::TRAIN_TITLE
            ]
        );
    }

    #[test]
    fn render_groups_register_together() {
        let mut registry = ArgRegistry::new(Command::new("render"));
        ModelParams::register(&mut registry, true).expect("model");
        PipelineParams::register(&mut registry, false).expect("pipeline");
        registry.register(&scripts::render_options(), false).expect("render options");
        assert_eq!(registry.groups().len(), 3);
    }
}
