//! Configuration file handling for screengrab.
//!
//! Loads option values from `~/.config/screengrab/config.toml` or a custom path.
//! The file is a flat table keyed by option name:
//!
//! ```toml
//! app_package_name = "com.example.app"
//! locales = ["en-US", "de-DE"]
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::options::{OptionCatalog, ValueType};

/// Option values read from a configuration file.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(flatten)]
    pub values: BTreeMap<String, toml::Value>,
    /// File the values were read from, if any.
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path.
    ///
    /// With an explicit path the file must exist. Without one, the default
    /// path is used if present and an empty config is returned otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound {
                        path: path.to_path_buf(),
                    });
                }
                Self::read(path)
            }
            None => {
                let path = default_path();
                if path.exists() {
                    Self::read(&path)
                } else {
                    log::debug!("No config file at {}", path.display());
                    Ok(Config::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut config = Self::parse(&content, path)?;
        config.path = Some(path.to_path_buf());
        log::info!("Loaded {} option(s) from {}", config.values.len(), path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text. `path` is used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    NotFound {
        path: PathBuf,
    },
    AlreadyExists {
        path: PathBuf,
    },
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound { path } => {
                write!(f, "Config file '{}' does not exist", path.display())
            }
            ConfigError::AlreadyExists { path } => {
                write!(
                    f,
                    "Config file already exists: {}\nUse 'screengrab config show' to view current settings.",
                    path.display()
                )
            }
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to access config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("screengrab").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/screengrab/config.toml")
        })
}

/// Render a commented config template listing every option and its default.
pub fn render_template(catalog: &OptionCatalog) -> String {
    let mut out = String::from("# screengrab configuration\n#\n# Values here override environment variables but not command-line flags.\n");

    for option in catalog.iter() {
        out.push('\n');
        out.push_str(&format!("# {}\n", option.description));
        if let Some(env) = option.env_var {
            out.push_str(&format!("# env: {}\n", env));
        }
        let value = match &option.default_value {
            Some(value) => toml::Value::from(value).to_string(),
            None => match option.value_type {
                ValueType::String => "\"\"".to_string(),
                ValueType::Boolean => "false".to_string(),
                ValueType::StringList => "[]".to_string(),
            },
        };
        out.push_str(&format!("# {} = {}\n", option.key, value));
    }

    out
}

/// Write the config template to `path`, refusing to overwrite an existing file.
pub fn init(path: &Path, catalog: &OptionCatalog) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, render_template(catalog)).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })
}
