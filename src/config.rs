//! Configuration for loreweave paths.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (LOREWEAVE_HOME, LOREWEAVE_LIBRARY)
//! 2. Config file (.loreweave/config.yaml)
//! 3. Defaults (~/.loreweave)
//!
//! Config file discovery:
//! - Searches current directory and parents for .loreweave/config.yaml
//! - Paths in config file are relative to the config file's parent directory
//!
//! The resolved configuration is an explicit value constructed once at
//! startup and passed into the stores; nothing here is process-global.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Data directory for character collections (relative to config file)
    pub home: Option<String>,
    /// Library directory (relative to config file)
    pub library: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to loreweave home (character data)
    pub home: PathBuf,
    /// Absolute path to the global library
    pub library: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".loreweave").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
pub fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".loreweave");

    let config_file = find_config_file();

    let (home, library) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Base directory is the parent of .loreweave/
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        let home = if let Ok(env_home) = std::env::var("LOREWEAVE_HOME") {
            PathBuf::from(env_home)
        } else if let Some(ref home_path) = config.paths.home {
            // home is relative to the .loreweave/ directory
            let config_dir = config_path.parent().unwrap_or(Path::new("."));
            resolve_path(config_dir, home_path)
        } else {
            default_home.clone()
        };

        let library = if let Ok(env_lib) = std::env::var("LOREWEAVE_LIBRARY") {
            PathBuf::from(env_lib)
        } else if let Some(ref lib_path) = config.paths.library {
            resolve_path(base_dir, lib_path)
        } else {
            home.join("library")
        };

        (home, library)
    } else {
        let home = std::env::var("LOREWEAVE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home.clone());

        let library = std::env::var("LOREWEAVE_LIBRARY")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join("library"));

        (home, library)
    };

    Ok(ResolvedConfig {
        home,
        library,
        config_file,
    })
}
