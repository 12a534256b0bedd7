// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration
//!
//! TOML file with a `[daemon]` section and one `[[depot]]` table per
//! depot to register at startup.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use sv_sync::DepotDescriptor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub daemon: DaemonConfig,
    #[serde(default, rename = "depot")]
    pub depots: Vec<DepotConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DaemonConfig {
    /// Log file; stderr when unset.
    pub log_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DepotConfig {
    pub name: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

fn default_owner() -> String {
    std::env::var("USER").unwrap_or_else(|_| "unknown".to_string())
}

fn default_interval_minutes() -> u64 {
    60
}

fn default_retention_days() -> u32 {
    7
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

impl DepotConfig {
    pub fn descriptor(&self) -> DepotDescriptor {
        DepotDescriptor::new(
            &self.name,
            &self.source,
            &self.destination,
            &self.owner,
            self.interval_minutes,
            self.retention_days,
        )
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
