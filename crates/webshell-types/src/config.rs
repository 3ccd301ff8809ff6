//! Session configuration loaded from TOML.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ShellError};

/// Configuration for one shell session (`webshell.toml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ShellConfig {
    /// Prompt written before every fresh input line.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Prompt written while a quoted or escaped line is being continued.
    #[serde(default = "default_continuation_prompt")]
    pub continuation_prompt: String,
    /// Value seeded into `HOME`; also the initial working directory.
    #[serde(default = "default_home")]
    pub home: String,
    /// Value seeded into `USER`.
    #[serde(default = "default_user")]
    pub user: String,
    /// Window after a key event during which data events are ignored.
    #[serde(default = "default_paste_guard_ms")]
    pub paste_guard_ms: u64,
    /// Extra virtual directories created at startup (ancestors included).
    #[serde(default)]
    pub directories: Vec<String>,
    /// Extra virtual files created at startup (ancestors included).
    #[serde(default)]
    pub files: Vec<String>,
    /// Extra environment variables.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

fn default_prompt() -> String {
    "\x1b[1;33mWebShell\x1b[0m $ ".to_string()
}
fn default_continuation_prompt() -> String {
    "> ".to_string()
}
fn default_home() -> String {
    "/".to_string()
}
fn default_user() -> String {
    "user".to_string()
}
fn default_paste_guard_ms() -> u64 {
    15
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            continuation_prompt: default_continuation_prompt(),
            home: default_home(),
            user: default_user(),
            paste_guard_ms: default_paste_guard_ms(),
            directories: Vec::new(),
            files: Vec::new(),
            env: BTreeMap::new(),
        }
    }
}

impl ShellConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: ShellConfig = toml::from_str(text)?;
        if !config.home.starts_with('/') {
            return Err(ShellError::Config(format!(
                "home must be an absolute virtual path: {}",
                config.home
            )));
        }
        Ok(config)
    }

    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        log::info!("Loaded config from {}", path.display());
        Self::from_toml(&text)
    }

    /// Load a configuration file, falling back to defaults when it is missing.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::load(path)
        } else {
            log::warn!(
                "Config '{}' not found -- using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }
}
