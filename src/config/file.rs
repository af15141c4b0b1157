//
//  confluence-client
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O
//!
//! Reads and writes the raw TOML text. Parsing lives in [`Config`](super::Config).
//!
//! Writes go to a sibling temporary file first and are then renamed over the
//! target, so an interrupted `cfl config set` never leaves a truncated file.

use std::path::Path;

use anyhow::{Context, Result};

/// Reads a configuration file.
///
/// Returns `Ok(None)` when the file does not exist.
///
/// # Errors
///
/// Fails if the file exists but cannot be read or is not UTF-8.
pub fn read_config_file(path: &Path) -> Result<Option<String>> {
    if !config_exists(path) {
        tracing::debug!("No configuration at {}", path.display());
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Some(content))
}

/// Writes `content` to `path`, creating parent directories.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let staging = path.with_extension("toml.tmp");
    std::fs::write(&staging, content)
        .with_context(|| format!("Failed to write {}", staging.display()))?;
    std::fs::rename(&staging, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

/// Whether a configuration file exists at `path`.
pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(read_config_file(&path).unwrap().is_none());
    }

    #[test]
    fn test_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/config.toml");

        write_config_file(&path, "[api]\n").unwrap();

        assert!(config_exists(&path));
        assert_eq!(read_config_file(&path).unwrap().as_deref(), Some("[api]\n"));
        assert!(!path.with_extension("toml.tmp").exists());
    }
}
