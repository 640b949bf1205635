//! User configuration loaded from `config.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::history::DEFAULT_MAX_ITEMS;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalcConfig {
    pub history: HistoryConfig,
    pub display: DisplayConfig,
    pub clipboard: ClipboardConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of calculations kept.
    pub max_items: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Results longer than this are cut to ten significant digits.
    pub max_digits: usize,
    /// Insert thousand separators into the result line.
    pub group_digits: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_digits: 12,
            group_digits: false,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Copy every `=` result to the clipboard.
    pub copy_on_equals: bool,
}

impl CalcConfig {
    /// Load the configuration from `path`, or from the default location
    /// when `path` is `None`.
    ///
    /// A missing file at the default location yields the defaults. A file
    /// that cannot be read or parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn path() -> Option<PathBuf> {
        default_path()
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("deskcalc").join("config.toml"))
}
