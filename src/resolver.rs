//! Layered option resolution.
//!
//! # Resolution Order
//!
//! 1. Command-line flag
//! 2. Config file entry
//! 3. Environment variable named by the descriptor
//! 4. Default evaluated when the catalogue was built
//!
//! After a value is found the descriptor's validator runs. A required option
//! with no value in any layer is an error.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::Config;
use crate::error::OptionError;
use crate::host::HostEnvironment;
use crate::options::{OptionCatalog, OptionDescriptor, OptionKey, OptionValue};

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    Cli,
    ConfigFile,
    Environment,
    Default,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueSource::Cli => "command line",
            ValueSource::ConfigFile => "config file",
            ValueSource::Environment => "environment",
            ValueSource::Default => "default",
        })
    }
}

/// Raw string values given on the command line, keyed by option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliValues {
    values: BTreeMap<OptionKey, String>,
}

impl CliValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: OptionKey, raw: impl Into<String>) {
        self.values.insert(key, raw.into());
    }

    pub fn with(mut self, key: OptionKey, raw: impl Into<String>) -> Self {
        self.set(key, raw);
        self
    }

    pub fn get(&self, key: OptionKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One option after resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedValue {
    pub key: OptionKey,
    pub value: Option<OptionValue>,
    pub source: Option<ValueSource>,
}

/// Every catalogue option after resolution, in catalogue order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    values: Vec<ResolvedValue>,
}

impl ResolvedOptions {
    pub fn get(&self, key: OptionKey) -> Option<&OptionValue> {
        self.values[key.index()].value.as_ref()
    }

    pub fn source(&self, key: OptionKey) -> Option<ValueSource> {
        self.values[key.index()].source
    }

    pub fn string(&self, key: OptionKey) -> Option<&str> {
        self.get(key).and_then(OptionValue::as_str)
    }

    pub fn boolean(&self, key: OptionKey) -> Option<bool> {
        self.get(key).and_then(OptionValue::as_bool)
    }

    pub fn list(&self, key: OptionKey) -> Option<&[String]> {
        self.get(key).and_then(OptionValue::as_list)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedValue> {
        self.values.iter()
    }
}

/// Merges command-line values, a config file, environment variables and
/// catalogue defaults.
///
/// Layers that aren't configured are skipped.
pub struct Resolver<'a> {
    catalog: &'a OptionCatalog,
    cli: Option<&'a CliValues>,
    config: Option<&'a Config>,
    env: Option<&'a HostEnvironment>,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver that only falls back to catalogue defaults.
    pub fn new(catalog: &'a OptionCatalog) -> Self {
        Self {
            catalog,
            cli: None,
            config: None,
            env: None,
        }
    }

    pub fn with_cli(mut self, cli: &'a CliValues) -> Self {
        self.cli = Some(cli);
        self
    }

    pub fn with_config(mut self, config: &'a Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Adds environment variable lookups from `env`.
    pub fn with_env(mut self, env: &'a HostEnvironment) -> Self {
        self.env = Some(env);
        self
    }

    /// Resolve and validate every option.
    ///
    /// Stops at the first error.
    pub fn resolve(&self) -> Result<ResolvedOptions, OptionError> {
        if let Some(config) = self.config {
            if let Some(unknown) = config
                .values
                .keys()
                .find(|k| OptionKey::from_name(k).is_none())
            {
                return Err(OptionError::UnknownOption(unknown.clone()));
            }
        }

        let values = self
            .catalog
            .iter()
            .map(|option| self.resolve_one(option))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResolvedOptions { values })
    }

    fn resolve_one(&self, option: &OptionDescriptor) -> Result<ResolvedValue, OptionError> {
        let found = self.lookup(option)?;

        let (value, source) = match found {
            Some((value, source)) => {
                option.check(&value)?;
                log::debug!("{} = {} (from {})", option.key, value, source);
                (Some(value), Some(source))
            }
            None if option.optional => {
                log::debug!("{} is not set", option.key);
                (None, None)
            }
            None => return Err(OptionError::MissingValue { key: option.key }),
        };

        Ok(ResolvedValue {
            key: option.key,
            value,
            source,
        })
    }

    fn lookup(
        &self,
        option: &OptionDescriptor,
    ) -> Result<Option<(OptionValue, ValueSource)>, OptionError> {
        let key = option.key;

        if let Some(raw) = self.cli.and_then(|cli| cli.get(key)) {
            let value = OptionValue::parse(key, option.value_type, raw)?;
            return Ok(Some((value, ValueSource::Cli)));
        }

        if let Some(raw) = self.config.and_then(|config| config.get(key.as_str())) {
            let value = OptionValue::from_toml(key, option.value_type, raw)?;
            return Ok(Some((value, ValueSource::ConfigFile)));
        }

        if let (Some(env), Some(name)) = (self.env, option.env_var) {
            if let Some(raw) = env.var(name) {
                let value = OptionValue::parse(key, option.value_type, raw)?;
                return Ok(Some((value, ValueSource::Environment)));
            }
        }

        Ok(option
            .default_value
            .clone()
            .map(|value| (value, ValueSource::Default)))
    }
}
