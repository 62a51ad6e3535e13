// crates/country-card-core/src/config.rs

//! Startup configuration, read once before the block registers.

use crate::block::BLOCK_NAME;
use crate::error::{CardError, Result};
use crate::requirements::{Requirements, DEFAULT_INSTALL_COMMAND};
use crate::source::DEFAULT_PER_PAGE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MINIMUM_RUNTIME_VERSION: &str = "5.6";
pub const MINIMUM_HOST_VERSION: &str = "5.8";

/// Every field is optional in the file; absent fields take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    pub block_name: String,
    pub min_runtime_version: String,
    pub min_host_version: String,
    /// Relative paths are resolved against the plugin directory.
    pub required_files: Vec<PathBuf>,
    pub install_command: String,
    pub max_related_posts: usize,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            block_name: BLOCK_NAME.to_string(),
            min_runtime_version: MINIMUM_RUNTIME_VERSION.to_string(),
            min_host_version: MINIMUM_HOST_VERSION.to_string(),
            required_files: vec![PathBuf::from("build/block.json")],
            install_command: DEFAULT_INSTALL_COMMAND.to_string(),
            max_related_posts: DEFAULT_PER_PAGE,
        }
    }
}

impl PluginConfig {
    /// Parse a JSON config file.
    #[cfg(feature = "json")]
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            CardError::Io(std::io::Error::new(
                e.kind(),
                format!("config not found at {}: {e}", path.display()),
            ))
        })?;
        let config: PluginConfig = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: PluginConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_name.trim().is_empty() || !self.block_name.contains('/') {
            return Err(CardError::Config(format!(
                "block_name must look like \"namespace/name\", got {:?}",
                self.block_name
            )));
        }
        if self.max_related_posts == 0 {
            return Err(CardError::Config("max_related_posts must be at least 1".into()));
        }
        Ok(())
    }

    /// Requirements with `required_files` resolved against `plugin_dir`.
    pub fn requirements(&self, plugin_dir: &Path) -> Requirements {
        Requirements::new()
            .with_runtime_version(&self.min_runtime_version)
            .with_host_version(&self.min_host_version)
            .with_required_files(self.required_files.iter().map(|f| {
                if f.is_absolute() {
                    f.clone()
                } else {
                    plugin_dir.join(f)
                }
            }))
            .with_install_command(&self.install_command)
    }
}
