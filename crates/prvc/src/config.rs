//! `prove.toml` project configuration.
//!
//! The core only needs to be able to *parse* a config, not *locate* one
//! on behalf of a running compiler — `find_config`'s directory walk is
//! carried anyway as cheap ambient utility a driver built on this crate
//! will want, matching the reference loader's own behavior.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// `prove.toml`, fully deserialized with every section optional and
/// every field defaulted — a partial or empty file still parses to the
/// documented defaults.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProveConfig {
    pub package: PackageConfig,
    pub build: BuildConfig,
    pub test: TestConfig,
}

impl Default for ProveConfig {
    fn default() -> Self {
        ProveConfig { package: PackageConfig::default(), build: BuildConfig::default(), test: TestConfig::default() }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PackageConfig {
    pub name: String,
    pub version: String,
    pub authors: Vec<String>,
    pub license: String,
}

impl Default for PackageConfig {
    fn default() -> Self {
        PackageConfig { name: "untitled".to_string(), version: "0.0.0".to_string(), authors: Vec::new(), license: String::new() }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BuildConfig {
    pub target: String,
    pub optimize: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig { target: "native".to_string(), optimize: false }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TestConfig {
    pub property_rounds: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        TestConfig { property_rounds: 1000 }
    }
}

/// Walks up from `start` looking for a `prove.toml`, matching the
/// reference loader's directory-walk behavior. `start` may be a file
/// (its parent directory is where the walk begins) or a directory.
pub fn find_config(start: &Path) -> Result<PathBuf, ConfigError> {
    let mut dir = if start.is_file() { start.parent().unwrap_or(start).to_path_buf() } else { start.to_path_buf() };
    loop {
        let candidate = dir.join("prove.toml");
        if candidate.exists() {
            return Ok(candidate);
        }
        match dir.parent() {
            Some(parent) => dir = parent.to_path_buf(),
            None => return Err(ConfigError::NotFound(start.to_path_buf())),
        }
    }
}

/// Parses a `prove.toml` file at `path` into a [`ProveConfig`].
pub fn load_config(path: &Path) -> Result<ProveConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    toml::from_str(&text).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_parses_to_documented_defaults() {
        let config: ProveConfig = toml::from_str("").unwrap();
        assert_eq!(config, ProveConfig::default());
        assert_eq!(config.package.name, "untitled");
        assert_eq!(config.build.target, "native");
        assert_eq!(config.test.property_rounds, 1000);
    }

    #[test]
    fn partial_toml_fills_in_missing_fields() {
        let config: ProveConfig = toml::from_str("[package]\nname = \"myproject\"\n").unwrap();
        assert_eq!(config.package.name, "myproject");
        assert_eq!(config.package.version, "0.0.0");
        assert!(!config.build.optimize);
    }

    #[test]
    fn find_config_walks_up_to_a_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("prove.toml"), "[package]\nname = \"x\"\n").unwrap();
        let nested = dir.path().join("src").join("nested");
        std::fs::create_dir_all(&nested).unwrap();
        let found = find_config(&nested).unwrap();
        assert_eq!(found, dir.path().join("prove.toml"));
    }

    #[test]
    fn find_config_fails_when_nothing_is_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_config(dir.path());
        assert!(matches!(err, Err(ConfigError::NotFound(_))));
    }
}
