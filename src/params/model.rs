//! Loading (model) parameters

use super::ParamGroup;
use crate::domain::{GroupParams, GroupSchema, ParamSpec, ParamValue, ResolvedConfig};
use crate::utils::absolute_path;
use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where the scene is read from and how it is loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelParams {
    pub sh_degree: i64,
    /// Always absolute once extracted.
    pub source_path: PathBuf,
    pub model_path: String,
    pub images: String,
    pub resolution: i64,
    pub white_background: bool,
    pub data_device: String,
    pub eval: bool,
}

impl ParamGroup for ModelParams {
    const TITLE: &'static str = "Loading Parameters";

    fn schema() -> GroupSchema {
        GroupSchema::new(Self::TITLE)
            .push(ParamSpec::new("sh_degree", 3).with_help("Spherical harmonics degree"))
            .push(ParamSpec::declared("_source_path", "").with_help("Scene directory"))
            .push(ParamSpec::declared("_model_path", "").with_help("Trained model directory"))
            .push(ParamSpec::declared("_images", "images").with_help("Image subdirectory name"))
            .push(ParamSpec::declared("_resolution", -1).with_help("Resolution scale (-1 for auto)"))
            .param("_white_background", false)
            .param("data_device", "cuda")
            .push(ParamSpec::new("eval", false).with_help("Hold out a test split"))
    }

    fn from_group(group: &GroupParams) -> Result<Self> {
        let source_path = absolute_path(Path::new(group.get_str("source_path")?))?;
        Ok(Self {
            sh_degree: group.get_int("sh_degree")?,
            source_path,
            model_path: group.get_str("model_path")?.to_string(),
            images: group.get_str("images")?.to_string(),
            resolution: group.get_int("resolution")?,
            white_background: group.get_bool("white_background")?,
            data_device: group.get_str("data_device")?.to_string(),
            eval: group.get_bool("eval")?,
        })
    }
}

impl ModelParams {
    /// The group as a flat configuration, in the shape a trainer persists as `cfg_args`.
    pub fn to_config(&self) -> ResolvedConfig {
        [
            ("sh_degree", ParamValue::Int(self.sh_degree)),
            ("source_path", ParamValue::Str(self.source_path.to_string_lossy().into_owned())),
            ("model_path", ParamValue::Str(self.model_path.clone())),
            ("images", ParamValue::Str(self.images.clone())),
            ("resolution", ParamValue::Int(self.resolution)),
            ("white_background", ParamValue::Bool(self.white_background)),
            ("data_device", ParamValue::Str(self.data_device.clone())),
            ("eval", ParamValue::Bool(self.eval)),
        ]
        .into_iter()
        .collect()
    }
}
