//! Config file loading

use crate::domain::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Table name accepted as a nested section in shared config files.
const SECTION: &str = "bigbrain";

const CANDIDATES: &[&str] = &["bigbrain.toml", ".bigbrain.toml", "bigbrain.yml", "bigbrain.yaml"];

pub fn load_config(scan_root: &Path, config_path: Option<&Path>) -> Result<Config> {
    load_config_with_source(scan_root, config_path).map(|(config, _)| config)
}

/// Like [`load_config`], also returning the config file that was read, if any.
///
/// The source is reported even when an auto-discovered file failed to parse,
/// so callers can keep it out of the walk either way.
pub fn load_config_with_source(
    scan_root: &Path,
    config_path: Option<&Path>,
) -> Result<(Config, Option<PathBuf>)> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(scan_root),
    };

    let Some(config_file) = discovered else {
        return Ok((Config::default(), None));
    };
    let config_file = fs::canonicalize(&config_file).unwrap_or(config_file);

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(cfg) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok((cfg, Some(config_file)))
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            // Auto-discovered: warn and fall back to defaults
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok((Config::default(), Some(config_file)))
        }
    }
}

/// Parse TOML config, supporting a nested [bigbrain] section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested bigbrain section.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    // An empty document parses as null
    let raw = if raw.is_null() { serde_yaml::Value::Mapping(Default::default()) } else { raw };

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(scan_root: &Path) -> Option<PathBuf> {
    CANDIDATES.iter().map(|candidate| scan_root.join(candidate)).find(|path| path.is_file())
}
