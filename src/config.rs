use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::host::FullNameTemplate;
use crate::models::TermConfig;

/// Environment variable naming the block configuration file.
pub const CONFIG_ENV: &str = "COC_CONFIG";

/// Block settings as exported from the host, plus the few host-wide values the
/// block reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    #[serde(flatten)]
    pub terms: TermConfig,
    /// Comma separated module names excluded from overviews.
    pub skip_modules: String,
    pub max_modinfo_cache_size: Option<usize>,
    /// The host's `fullnamedisplay` pattern.
    pub fullnamedisplay: String,
    /// Optional JSON string pack overriding the built-in English strings.
    pub strings: Option<PathBuf>,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            terms: TermConfig::default(),
            skip_modules: String::new(),
            max_modinfo_cache_size: None,
            fullnamedisplay: "firstname lastname".to_string(),
            strings: None,
        }
    }
}

impl BlockConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let load_error = |reason: String| ConfigError::Load {
            path: path.display().to_string(),
            reason,
        };

        let content = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| load_error(e.to_string()))
    }

    /// Loads from `path`, else from `$COC_CONFIG`, else falls back to defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match std::env::var_os(CONFIG_ENV) {
            Some(value) => Self::from_file(Path::new(&value)),
            None => {
                log::info!("no block configuration given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn name_display(&self) -> FullNameTemplate {
        FullNameTemplate::new(self.fullnamedisplay.as_str())
    }
}
