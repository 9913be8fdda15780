//! Shared CLI utilities.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use super::OutputFormat;
use crate::domain::{GroupSchema, ResolvedConfig};
use crate::schema::ArgRegistry;

/// Read every `--group-file`, in order.
pub fn load_group_files(paths: &[PathBuf]) -> Result<Vec<GroupSchema>> {
    let mut groups = Vec::new();
    for path in paths {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed reading group file: {}", path.display()))?;
        let declared = GroupSchema::from_toml_str(&content)
            .with_context(|| format!("Invalid group file: {}", path.display()))?;
        tracing::debug!("Loaded {} parameter group(s) from {}", declared.len(), path.display());
        groups.extend(declared);
    }
    Ok(groups)
}

/// Register user-declared groups after the built-in ones.
pub fn register_extra_groups(registry: &mut ArgRegistry, groups: &[GroupSchema]) -> Result<()> {
    for group in groups {
        registry
            .register(group, false)
            .with_context(|| format!("Cannot register parameter group '{}'", group.title()))?;
    }
    Ok(())
}

/// Program name plus forwarded options, as the generated parser expects them.
pub fn forward_args(program: &str, options: Vec<OsString>) -> Vec<OsString> {
    std::iter::once(OsString::from(program)).chain(options).collect()
}

pub fn print_config(config: &ResolvedConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Namespace => println!("{config}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
    }
    Ok(())
}
