//! Render command implementation

use anyhow::Result;
use clap::{Args, Command};
use std::ffi::OsString;

use super::utils::{forward_args, load_group_files, print_config, register_extra_groups};
use super::GlobalArgs;
use crate::config;
use crate::domain::GroupSchema;
use crate::params::{scripts, ModelParams, ParamGroup, PipelineParams};
use crate::schema::ArgRegistry;

#[derive(Args)]
#[command(disable_help_flag = true)]
pub struct RenderArgs {
    /// Parameter options (see `splat-args render --help`)
    #[arg(
        value_name = "OPTIONS",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub options: Vec<OsString>,
}

/// Rendering groups. Loading parameters default to "not supplied" so that a trained
/// model's cfg_args can provide them.
pub fn registry(extra: &[GroupSchema]) -> Result<ArgRegistry> {
    let command = Command::new("render")
        .bin_name("splat-args render")
        .about("Resolve rendering parameters against a trained model's cfg_args");
    let mut registry = ArgRegistry::new(command);
    ModelParams::register(&mut registry, true)?;
    PipelineParams::register(&mut registry, false)?;
    registry.register(&scripts::render_options(), false)?;
    register_extra_groups(&mut registry, extra)?;
    Ok(registry)
}

pub fn run(args: RenderArgs, globals: &GlobalArgs) -> Result<()> {
    let extra = load_group_files(&globals.group_files)?;
    let registry = registry(&extra)?;
    let cmdline = registry.parse_from(forward_args("render", args.options));

    let resolved = config::resolve(&registry, &cmdline)?;
    let model = ModelParams::extract(&resolved)?;
    let pipeline = PipelineParams::extract(&resolved)?;

    tracing::info!("Rendering {}", model.model_path);
    tracing::debug!(?pipeline, "Pipeline parameters");

    print_config(&resolved.overlay(model.to_config()), globals.format)
}
