//! Train command implementation

use anyhow::Result;
use clap::{Args, Command};
use std::ffi::OsString;

use super::utils::{forward_args, load_group_files, print_config, register_extra_groups};
use super::GlobalArgs;
use crate::domain::GroupSchema;
use crate::params::{scripts, ModelParams, OptimizationParams, ParamGroup, PipelineParams};
use crate::schema::{extract, ArgRegistry};

#[derive(Args)]
#[command(disable_help_flag = true)]
pub struct TrainArgs {
    /// Parameter options (see `splat-args train --help`)
    #[arg(
        value_name = "OPTIONS",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub options: Vec<OsString>,
}

/// Every group a training run accepts, all with their declared defaults.
pub fn registry(extra: &[GroupSchema]) -> Result<ArgRegistry> {
    let command = Command::new("train")
        .bin_name("splat-args train")
        .about("Parse training parameters and print the model configuration to persist");
    let mut registry = ArgRegistry::new(command);
    ModelParams::register(&mut registry, false)?;
    OptimizationParams::register(&mut registry, false)?;
    PipelineParams::register(&mut registry, false)?;
    registry.register(&scripts::train_options(), false)?;
    register_extra_groups(&mut registry, extra)?;
    Ok(registry)
}

pub fn run(args: TrainArgs, globals: &GlobalArgs) -> Result<()> {
    let extra = load_group_files(&globals.group_files)?;
    let registry = registry(&extra)?;
    let cmdline = registry.parse_from(forward_args("train", args.options));

    let model = ModelParams::extract(&cmdline)?;
    let optimization = OptimizationParams::extract(&cmdline)?;
    let pipeline = PipelineParams::extract(&cmdline)?;

    tracing::info!("Optimizing {}", model.model_path);
    tracing::debug!(?optimization, ?pipeline, "Training parameters");
    for group in &extra {
        let values = extract(group, &cmdline);
        let names: Vec<&str> = values.names().collect();
        tracing::debug!(group = group.title(), ?names, "Extra group");
    }

    print_config(&model.to_config(), globals.format)
}
