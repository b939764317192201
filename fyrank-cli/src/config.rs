/// Config file loading and creation for the fyrank CLI.
///
/// Config lives at ~/.config/fyrank/config.toml.
/// All fields are optional; CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FyrankConfig {
    pub region_weight: Option<f64>,
    pub hospital_weight: Option<f64>,
    pub specialty_weight: Option<f64>,
    pub lock_regions: Option<bool>,
    /// Fixed seed for refinement matchups.
    pub seed: Option<u64>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# fyrank configuration
# All values here can be overridden by CLI flags.

# Importance of each dimension when scoring, each from 0 to 1.
# region_weight = 0.33
# hospital_weight = 0.33
# specialty_weight = 0.33

# Keep programmes grouped by region order and drop region from the score.
# lock_regions = false

# Fix the random seed used to pick refinement matchups (reproducible sessions).
# seed = 42
";

/// Returns the default config path: ~/.config/fyrank/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("fyrank").join("config.toml")
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> FyrankConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => FyrankConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

fn parse_config(content: &str) -> Result<FyrankConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Write the commented template to `path`. Errors if it already exists.
pub fn create_config_at(path: &Path) {
    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));
}

/// Create the default config file at the default location.
pub fn create_default_config() -> PathBuf {
    let path = config_path();
    create_config_at(&path);
    path
}
