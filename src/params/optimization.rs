//! Optimization parameters

use super::ParamGroup;
use crate::domain::{GroupParams, GroupSchema};
use anyhow::Result;
use serde::Serialize;

/// Learning rates and densification schedule of the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationParams {
    pub iterations: i64,
    pub position_lr_init: f64,
    pub position_lr_final: f64,
    pub position_lr_delay_mult: f64,
    pub position_lr_max_steps: i64,
    pub feature_lr: f64,
    pub opacity_lr: f64,
    pub scaling_lr: f64,
    pub rotation_lr: f64,
    pub percent_dense: f64,
    pub lambda_dssim: f64,
    pub densification_interval: i64,
    pub opacity_reset_interval: i64,
    pub densify_from_iter: i64,
    pub densify_until_iter: i64,
    pub densify_grad_threshold: f64,
    pub random_background: bool,
}

impl ParamGroup for OptimizationParams {
    const TITLE: &'static str = "Optimization Parameters";

    fn schema() -> GroupSchema {
        GroupSchema::new(Self::TITLE)
            .param("iterations", 30_000)
            .param("position_lr_init", 0.00016)
            .param("position_lr_final", 0.0000016)
            .param("position_lr_delay_mult", 0.01)
            .param("position_lr_max_steps", 30_000)
            .param("feature_lr", 0.0025)
            .param("opacity_lr", 0.05)
            .param("scaling_lr", 0.005)
            .param("rotation_lr", 0.001)
            .param("percent_dense", 0.01)
            .param("lambda_dssim", 0.2)
            .param("densification_interval", 100)
            .param("opacity_reset_interval", 3000)
            .param("densify_from_iter", 500)
            .param("densify_until_iter", 15_000)
            .param("densify_grad_threshold", 0.0002)
            .param("random_background", false)
    }

    fn from_group(group: &GroupParams) -> Result<Self> {
        Ok(Self {
            iterations: group.get_int("iterations")?,
            position_lr_init: group.get_float("position_lr_init")?,
            position_lr_final: group.get_float("position_lr_final")?,
            position_lr_delay_mult: group.get_float("position_lr_delay_mult")?,
            position_lr_max_steps: group.get_int("position_lr_max_steps")?,
            feature_lr: group.get_float("feature_lr")?,
            opacity_lr: group.get_float("opacity_lr")?,
            scaling_lr: group.get_float("scaling_lr")?,
            rotation_lr: group.get_float("rotation_lr")?,
            percent_dense: group.get_float("percent_dense")?,
            lambda_dssim: group.get_float("lambda_dssim")?,
            densification_interval: group.get_int("densification_interval")?,
            opacity_reset_interval: group.get_int("opacity_reset_interval")?,
            densify_from_iter: group.get_int("densify_from_iter")?,
            densify_until_iter: group.get_int("densify_until_iter")?,
            densify_grad_threshold: group.get_float("densify_grad_threshold")?,
            random_background: group.get_bool("random_background")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ParamKind, ParseResult};
    use crate::schema::ArgRegistry;
    use clap::Command;

    #[test]
    fn defaults_match_the_schema() {
        let opt = OptimizationParams::extract(&ParseResult::new()).expect("defaults");
        assert_eq!(opt.iterations, 30_000);
        assert_eq!(opt.position_lr_final, 0.0000016);
        assert_eq!(opt.densify_until_iter, 15_000);
        assert!(!opt.random_background);
    }

    #[test]
    fn learning_rates_are_floats_and_intervals_ints() {
        let schema = OptimizationParams::schema();
        let kind = |name: &str| schema.find(name).map(|p| p.kind());
        assert_eq!(kind("feature_lr"), Some(ParamKind::Float));
        assert_eq!(kind("densification_interval"), Some(ParamKind::Int));
        assert_eq!(kind("random_background"), Some(ParamKind::Bool));
    }

    #[test]
    fn parsed_overrides_reach_the_typed_view() {
        let mut registry = ArgRegistry::new(Command::new("train"));
        OptimizationParams::register(&mut registry, false).expect("register");
        let parsed = registry
            .try_parse_from(["train", "--iterations", "7000", "--lambda_dssim", "0.5"])
            .expect("parse");
        let opt = OptimizationParams::extract(&parsed).expect("typed");
        assert_eq!(opt.iterations, 7000);
        assert_eq!(opt.lambda_dssim, 0.5);
        assert_eq!(opt.opacity_lr, 0.05);
    }
}
