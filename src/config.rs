// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.example", "SpendSavvy", "spendsavvy"));

pub const ENV_DB: &str = "SPENDSAVVY_DB";
pub const ENV_USER: &str = "SPENDSAVVY_USER";
pub const ENV_EXPORT_DIR: &str = "SPENDSAVVY_EXPORT_DIR";
pub const ENV_LOG: &str = "SPENDSAVVY_LOG";

pub const DEFAULT_USER: &str = "local";
pub const DEFAULT_LOG_FILTER: &str = "spendsavvy=warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub user: String,
    pub export_dir: PathBuf,
}

impl Config {
    /// Flag, then environment, then platform data dir.
    pub fn resolve(db_flag: Option<&str>, user_flag: Option<&str>) -> Result<Self> {
        let user = pick(user_flag, ENV_USER).unwrap_or_else(|| DEFAULT_USER.to_string());

        let db_path = match pick(db_flag, ENV_DB) {
            Some(p) => PathBuf::from(p),
            None => data_dir()?.join("spendsavvy.sqlite"),
        };
        let export_dir = match env_value(ENV_EXPORT_DIR) {
            Some(p) => PathBuf::from(p),
            None => match db_path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.join("exports"),
                _ => PathBuf::from("exports"),
            },
        };
        Ok(Self {
            db_path,
            user,
            export_dir,
        })
    }
}

pub fn log_filter() -> String {
    env_value(ENV_LOG).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}

fn pick(flag: Option<&str>, var: &str) -> Option<String> {
    flag.map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| env_value(var))
}

fn env_value(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
