use notemark_engine::io::{DEFAULT_SIDECAR_EXTENSION, ImportOptions};
use notemark_engine::parsing::ParseOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Import settings read from `~/.config/notemark/config.toml`.
///
/// Every field is optional in the file; missing ones take the engine defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_path: Option<PathBuf>,
    pub parse_semantics: bool,
    pub strip_frontmatter: bool,
    pub max_nesting_depth: usize,
    pub sidecar_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        let parse = ParseOptions::default();
        Self {
            notes_path: None,
            parse_semantics: parse.parse_semantics,
            strip_frontmatter: parse.strip_frontmatter,
            max_nesting_depth: parse.max_nesting_depth,
            sidecar_extension: DEFAULT_SIDECAR_EXTENSION.to_string(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the notes path
        config.notes_path = config
            .notes_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/notemark");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn to_parse_options(&self) -> ParseOptions {
        ParseOptions {
            parse_semantics: self.parse_semantics,
            strip_frontmatter: self.strip_frontmatter,
            // Zero would flatten every container.
            max_nesting_depth: self.max_nesting_depth.max(1),
        }
    }

    pub fn to_import_options(&self) -> ImportOptions {
        ImportOptions {
            parse: self.to_parse_options(),
            sidecar_extension: self.sidecar_extension.clone(),
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
