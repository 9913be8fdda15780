//! Path normalization

use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// Make `path` absolute against the current directory and resolve `.`/`..`
/// lexically. The path does not need to exist.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize_path(path));
    }
    let cwd = std::env::current_dir().context("Failed reading current directory")?;
    Ok(absolute_from(&cwd, path))
}

/// Join a relative `path` onto `base` and normalize the result.
pub fn absolute_from(base: &Path, path: &Path) -> PathBuf {
    normalize_path(&base.join(path))
}

/// Drop `.` components and fold `..` into its parent, without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // `..` at the root stays at the root.
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
