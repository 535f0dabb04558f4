// SPDX-License-Identifier: MPL-2.0
//! This module handles the panel's configuration, including loading and saving
//! operator preferences to a `settings.toml` file.
//!
//! Missing files and unreadable values fall back to defaults; a host
//! application never fails to start because of a broken settings file.

mod defaults;

pub use defaults::{
    DEFAULT_HEATMAP_OPACITY_PERCENT, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVICE_BASE_URL,
};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "NeuroLens";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the inference service API.
    pub service_base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub heatmap_opacity_percent: Option<f32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_base_url: Some(DEFAULT_SERVICE_BASE_URL.to_string()),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            heatmap_opacity_percent: Some(DEFAULT_HEATMAP_OPACITY_PERCENT),
        }
    }
}

impl Config {
    /// Returns the effective service base URL, falling back to the default.
    #[must_use]
    pub fn service_base_url(&self) -> &str {
        self.service_base_url
            .as_deref()
            .unwrap_or(DEFAULT_SERVICE_BASE_URL)
    }

    /// Returns the effective request timeout, falling back to the default.
    #[must_use]
    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    /// Returns the effective initial heatmap opacity, falling back to the default.
    #[must_use]
    pub fn heatmap_opacity_percent(&self) -> f32 {
        self.heatmap_opacity_percent
            .unwrap_or(DEFAULT_HEATMAP_OPACITY_PERCENT)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            service_base_url: Some("https://pacs.example.org/api/ai".to_string()),
            request_timeout_secs: Some(10),
            heatmap_opacity_percent: Some(35.0),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.service_base_url, config.service_base_url);
        assert_eq!(loaded.request_timeout_secs, config.request_timeout_secs);
        assert_eq!(loaded.heatmap_opacity_percent, config.heatmap_opacity_percent);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.service_base_url(), DEFAULT_SERVICE_BASE_URL);
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn effective_values_fall_back_to_defaults() {
        let config = Config {
            service_base_url: None,
            request_timeout_secs: None,
            heatmap_opacity_percent: None,
        };
        assert_eq!(config.service_base_url(), DEFAULT_SERVICE_BASE_URL);
        assert_eq!(config.request_timeout_secs(), DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(
            config.heatmap_opacity_percent(),
            DEFAULT_HEATMAP_OPACITY_PERCENT
        );
    }
}
