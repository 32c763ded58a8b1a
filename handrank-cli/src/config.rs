//! Config file loading and creation for the handrank CLI.
//!
//! Config lives at ~/.config/handrank/config.toml.
//! All fields are optional. CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

/// Items file used when neither `--items` nor the config names one.
pub const DEFAULT_ITEMS_FILE: &str = "items.csv";

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HandrankConfig {
    pub items: Option<String>,
    pub column: Option<String>,
    pub seed: Option<u64>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# handrank configuration
# All values here can be overridden by CLI flags.

# CSV file holding the items to rank
# items = \"items.csv\"

# Header of the column holding item names
# column = \"Name\"

# Fixed seed for the pair order. Leave unset for a fresh order every run.
# seed = 42
";

/// Returns the default config path: ~/.config/handrank/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("handrank").join("config.toml")
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> HandrankConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => HandrankConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

fn parse_config(content: &str) -> Result<HandrankConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Create the default config file at `path`. Errors if it already exists.
pub fn create_default_config(path: &Path) {
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
