//! Configuration resolution
//!
//! Combines declared defaults, the persisted `cfg_args` of a previous run and the
//! values supplied on the command line, with precedence CLI > File > Defaults.

pub mod loader;
pub mod merge;
pub mod snapshot;

pub use loader::{load_persisted_config, persisted_config_path, CONFIG_FILE_NAME};
pub use merge::merge_layers;
pub use snapshot::parse_snapshot;

use crate::domain::{ParseResult, ResolvedConfig};
use crate::schema::ArgRegistry;
use anyhow::Result;
use std::ffi::OsString;

/// Resolve an already parsed command line against its persisted configuration.
pub fn resolve(registry: &ArgRegistry, cmdline: &ParseResult) -> Result<ResolvedConfig> {
    let config_path = persisted_config_path(cmdline);
    let persisted = load_persisted_config(config_path.as_deref())?;
    tracing::debug!(persisted = persisted.len(), "Merging configuration layers");
    Ok(merge_layers(registry.defaults(), persisted, cmdline))
}

/// Parse `args` (program name first) with every registered group, then resolve.
pub fn get_combined_args<I, T>(registry: &ArgRegistry, args: I) -> Result<ResolvedConfig>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cmdline = registry.try_parse_from(args)?;
    resolve(registry, &cmdline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GroupSchema, ParamValue};
    use clap::Command;
    use std::fs;
    use tempfile::TempDir;

    fn registry() -> ArgRegistry {
        let mut registry = ArgRegistry::new(Command::new("render"));
        let loading = GroupSchema::new("Loading Parameters")
            .param("sh_degree", 3)
            .param("_model_path", "")
            .param("eval", false);
        let pipeline = GroupSchema::new("Pipeline Parameters").param("debug", false);
        registry.register(&loading, true).expect("loading");
        registry.register(&pipeline, false).expect("pipeline");
        registry
    }

    #[test]
    fn combined_args_prefer_cmdline_over_file() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "Namespace(eval=True, sh_degree=1)")
            .expect("write");
        let model = tmp.path().to_str().expect("utf8");

        let cfg = get_combined_args(&registry(), ["render", "-m", model, "--sh_degree", "2"])
            .expect("resolved");
        assert_eq!(cfg.get("sh_degree"), Some(&ParamValue::Int(2)));
        assert_eq!(cfg.get("eval"), Some(&ParamValue::Bool(true)));
        assert_eq!(cfg.get("model_path"), Some(&ParamValue::from(model)));
    }

    #[test]
    fn non_fill_none_defaults_override_the_file() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "Namespace(debug=True)").expect("write");
        let model = tmp.path().to_str().expect("utf8");

        let cfg = get_combined_args(&registry(), ["render", "-m", model]).expect("resolved");
        assert_eq!(cfg.get("debug"), Some(&ParamValue::Bool(false)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let tmp = TempDir::new().expect("tmp");
        let model = tmp.path().to_str().expect("utf8");

        let cfg = get_combined_args(&registry(), ["render", "-m", model]).expect("resolved");
        assert_eq!(cfg.get("sh_degree"), Some(&ParamValue::Int(3)));
        assert_eq!(cfg.get("eval"), Some(&ParamValue::Bool(false)));
    }

    #[test]
    fn no_model_path_still_resolves() {
        let cfg = get_combined_args(&registry(), ["render", "--eval"]).expect("resolved");
        assert_eq!(cfg.get("eval"), Some(&ParamValue::Bool(true)));
        assert_eq!(cfg.get("model_path"), Some(&ParamValue::from("")));
    }

    #[test]
    fn malformed_file_aborts_resolution() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "Namespace(eval=").expect("write");
        let model = tmp.path().to_str().expect("utf8");

        assert!(get_combined_args(&registry(), ["render", "-m", model]).is_err());
    }

    #[test]
    fn invalid_arguments_are_errors() {
        assert!(get_combined_args(&registry(), ["render", "--sh_degree", "three"]).is_err());
    }
}
