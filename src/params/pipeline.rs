//! Pipeline parameters

use super::ParamGroup;
use crate::domain::{GroupParams, GroupSchema};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(non_snake_case)]
pub struct PipelineParams {
    pub convert_SHs_python: bool,
    pub compute_cov3D_python: bool,
    pub debug: bool,
}

impl ParamGroup for PipelineParams {
    const TITLE: &'static str = "Pipeline Parameters";

    fn schema() -> GroupSchema {
        GroupSchema::new(Self::TITLE)
            .param("convert_SHs_python", false)
            .param("compute_cov3D_python", false)
            .param("debug", false)
    }

    fn from_group(group: &GroupParams) -> Result<Self> {
        Ok(Self {
            convert_SHs_python: group.get_bool("convert_SHs_python")?,
            compute_cov3D_python: group.get_bool("compute_cov3D_python")?,
            debug: group.get_bool("debug")?,
        })
    }
}
