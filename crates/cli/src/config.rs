// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace discovery and rig configuration.
//!
//! A workspace is a `.mq/` directory holding `config.toml` and, by default,
//! one SQLite database per rig under `rigs/`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::env;
use crate::error::{Error, Result};

pub const WORK_DIR_NAME: &str = ".mq";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const RIGS_DIR_NAME: &str = "rigs";

/// Contents of `.mq/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Per-rig overrides, keyed by rig name.
    #[serde(default)]
    pub rigs: BTreeMap<String, RigConfig>,
}

/// Settings for a single rig.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RigConfig {
    /// Database path, relative to the `.mq/` directory or absolute.
    pub db: PathBuf,
}

impl Config {
    /// Loads configuration from the given `.mq/` directory.
    ///
    /// A missing `config.toml` yields the default configuration.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        Ok(toml::from_str(&content)?)
    }

    /// Database path configured for `rig`, or the default `rigs/<rig>.db`.
    pub fn db_path(&self, work_dir: &Path, rig: &str) -> PathBuf {
        match self.rigs.get(rig) {
            Some(rig_config) if rig_config.db.is_absolute() => rig_config.db.clone(),
            Some(rig_config) => work_dir.join(&rig_config.db),
            None => work_dir.join(RIGS_DIR_NAME).join(format!("{rig}.db")),
        }
    }
}

/// Rig names become file names, so they may not escape the workspace.
pub fn validate_rig(rig: &str) -> Result<()> {
    let trimmed = rig.trim();
    if trimmed.is_empty()
        || trimmed.contains(['/', '\\'])
        || trimmed == "."
        || trimmed == ".."
    {
        return Err(Error::InvalidRig(rig.to_string()));
    }
    Ok(())
}

/// Find the `.mq` directory, honoring `MQ_DIR` before walking up from the
/// current directory.
pub fn find_work_dir() -> Result<PathBuf> {
    if let Some(dir) = env::work_dir() {
        return if dir.is_dir() {
            Ok(dir)
        } else {
            Err(Error::NotInitialized)
        };
    }
    find_work_dir_from(&std::env::current_dir()?)
}

/// Walk up from `start` looking for a `.mq` directory.
pub fn find_work_dir_from(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.is_dir() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Resolve the database of an existing rig.
pub fn resolve_rig_db(work_dir: &Path, config: &Config, rig: &str) -> Result<PathBuf> {
    validate_rig(rig)?;
    let path = config.db_path(work_dir, rig);
    if !path.is_file() {
        return Err(Error::RigNotFound {
            rig: rig.to_string(),
            path,
        });
    }
    Ok(path)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
