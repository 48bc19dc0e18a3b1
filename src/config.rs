// src/config.rs
//! Configuration file for todo

#![deny(missing_docs)]

use crate::error::TodoResult;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

/// Name of the configuration file, looked up in the home directory.
pub const CONFIG_FILE: &str = ".todo.toml";

/// What to print when a list cannot be opened for reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingStore {
    /// Print the usage text.
    #[default]
    Usage,
    /// Print a short "run todo init" notice.
    Notice,
}

/// Config struct for todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reaction to a list that cannot be opened.
    pub missing_store: MissingStore,
    /// Reject non-numeric item indices instead of reading them as 0.
    pub strict_index: bool,
    /// Exit with status 1 when any command in the invocation failed.
    pub exit_codes: bool,
    /// Colored output.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            missing_store: MissingStore::Usage,
            strict_index: false,
            exit_codes: false,
            color: true,
        }
    }
}

impl Config {
    /// Load `.todo.toml` from `dir`. If missing, return defaults; keys absent
    /// from the file keep their default values.
    pub fn load_or_default(dir: &Path) -> TodoResult<Self> {
        let file = Self::path_in(dir);
        if file.exists() {
            let s = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let cfg: Config =
                toml::from_str(&s).with_context(|| format!("parsing {}", file.display()))?;
            Ok(cfg)
        } else {
            Ok(Config::default())
        }
    }

    /// Location of the config file inside `dir`.
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }
}
