//! Persisted config file loading

use super::snapshot::parse_snapshot;
use crate::domain::{ParamValue, ParseResult, ResolvedConfig};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the persisted configuration inside a model directory.
pub const CONFIG_FILE_NAME: &str = "cfg_args";

/// Option whose value names the directory holding the persisted configuration.
pub const MODEL_PATH_KEY: &str = "model_path";

/// `<model_path>/cfg_args`, or `None` when `model_path` was not supplied, is empty,
/// or is not a string.
pub fn persisted_config_path(cmdline: &ParseResult) -> Option<PathBuf> {
    match cmdline.get(MODEL_PATH_KEY) {
        Some(ParamValue::Str(dir)) if !dir.trim().is_empty() => {
            Some(Path::new(dir).join(CONFIG_FILE_NAME))
        }
        _ => None,
    }
}

/// Read the persisted layer.
///
/// A missing path or an unreadable file yields an empty configuration; content that
/// is not UTF-8 or does not parse is an error.
pub fn load_persisted_config(path: Option<&Path>) -> Result<ResolvedConfig> {
    let Some(config_file) = path else {
        tracing::info!("Config file not found: no model path supplied");
        return Ok(ResolvedConfig::default());
    };

    tracing::info!("Looking for config file in {}", config_file.display());
    let bytes = match fs::read(config_file) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Config file not found at {}: {}", config_file.display(), e);
            return Ok(ResolvedConfig::default());
        }
    };
    tracing::info!("Config file found: {}", config_file.display());

    let invalid = || format!("Invalid persisted config: {}", config_file.display());
    let content = String::from_utf8(bytes).with_context(invalid)?;
    parse_snapshot(&content).with_context(invalid)
}
