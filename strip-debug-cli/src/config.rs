//! Configuration loading and parsing
//!
//! The tool takes no configuration flags on the command line. An optional TOML
//! file named by `STRIP_DEBUG_CONFIG` can override the native tools that are
//! invoked and the suffix of the extracted debug file.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable holding the path of the config file
pub const CONFIG_ENV: &str = "STRIP_DEBUG_CONFIG";

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub tools: ToolsConfig,
    /// Appended to the binary path to name the extracted debug file
    #[serde(default = "default_debug_suffix")]
    pub debug_suffix: String,
}

/// Native tools used to strip and extract symbols
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ToolsConfig {
    #[serde(default = "default_objcopy")]
    pub objcopy: String,
    #[serde(default = "default_strip")]
    pub strip: String,
    #[serde(default = "default_dsymutil")]
    pub dsymutil: String,
}

fn default_debug_suffix() -> String {
    ".debug".to_string()
}

fn default_objcopy() -> String {
    "objcopy".to_string()
}

fn default_strip() -> String {
    "strip".to_string()
}

fn default_dsymutil() -> String {
    "dsymutil".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tools: ToolsConfig::default(),
            debug_suffix: default_debug_suffix(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            objcopy: default_objcopy(),
            strip: default_strip(),
            dsymutil: default_dsymutil(),
        }
    }
}

impl AppConfig {
    /// Reject settings that would make the tool clobber the input binary
    pub fn validate(&self) -> Result<()> {
        if self.debug_suffix.is_empty() {
            bail!("debug_suffix must not be empty");
        }

        for (name, tool) in [
            ("objcopy", &self.tools.objcopy),
            ("strip", &self.tools.strip),
            ("dsymutil", &self.tools.dsymutil),
        ] {
            if tool.trim().is_empty() {
                bail!("tools.{} must not be empty", name);
            }
        }

        Ok(())
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .validate()
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    Ok(config)
}

/// Load the file named by `STRIP_DEBUG_CONFIG`, or fall back to defaults
pub fn load_from_env() -> Result<AppConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            log::debug!("Loading configuration from: {:?}", path);
            load_config(Path::new(&path))
        }
        None => Ok(AppConfig::default()),
    }
}
