//! Option catalogue for screengrab runs.
//!
//! This module provides:
//! - Type definitions ([`OptionKey`], [`OptionValue`], [`ValueType`], [`OptionDescriptor`])
//! - The ordered catalogue itself ([`OptionCatalog`])
//! - Post-resolution validators ([`Validator`])

mod catalog;
mod defaults;
mod device_type;
mod validate;

pub use catalog::OptionCatalog;
pub use device_type::{DeviceType, ParseDeviceTypeError};
pub use validate::{apk_exists, device_type, Validator};

use std::fmt;

use crate::error::OptionError;

/// Identity of a catalogue entry.
///
/// Variant order is the catalogue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    AndroidHome,
    BuildToolsVersion,
    Locales,
    ClearPreviousScreenshots,
    OutputDirectory,
    SkipOpenSummary,
    AppPackageName,
    TestsPackageName,
    UseTestsInPackages,
    UseTestsInClasses,
    TestInstrumentationRunner,
    EndingLocale,
    AppApkPath,
    TestsApkPath,
    SpecificDevice,
    DeviceType,
}

impl OptionKey {
    /// All keys in catalogue order.
    pub const ALL: [OptionKey; 16] = [
        OptionKey::AndroidHome,
        OptionKey::BuildToolsVersion,
        OptionKey::Locales,
        OptionKey::ClearPreviousScreenshots,
        OptionKey::OutputDirectory,
        OptionKey::SkipOpenSummary,
        OptionKey::AppPackageName,
        OptionKey::TestsPackageName,
        OptionKey::UseTestsInPackages,
        OptionKey::UseTestsInClasses,
        OptionKey::TestInstrumentationRunner,
        OptionKey::EndingLocale,
        OptionKey::AppApkPath,
        OptionKey::TestsApkPath,
        OptionKey::SpecificDevice,
        OptionKey::DeviceType,
    ];

    /// The key as it appears on the command line and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::AndroidHome => "android_home",
            OptionKey::BuildToolsVersion => "build_tools_version",
            OptionKey::Locales => "locales",
            OptionKey::ClearPreviousScreenshots => "clear_previous_screenshots",
            OptionKey::OutputDirectory => "output_directory",
            OptionKey::SkipOpenSummary => "skip_open_summary",
            OptionKey::AppPackageName => "app_package_name",
            OptionKey::TestsPackageName => "tests_package_name",
            OptionKey::UseTestsInPackages => "use_tests_in_packages",
            OptionKey::UseTestsInClasses => "use_tests_in_classes",
            OptionKey::TestInstrumentationRunner => "test_instrumentation_runner",
            OptionKey::EndingLocale => "ending_locale",
            OptionKey::AppApkPath => "app_apk_path",
            OptionKey::TestsApkPath => "tests_apk_path",
            OptionKey::SpecificDevice => "specific_device",
            OptionKey::DeviceType => "device_type",
        }
    }

    /// Look up a key by its string name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == name)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The type of an option's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueType {
    #[default]
    String,
    Boolean,
    StringList,
}

impl ValueType {
    pub fn name(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::StringList => "list",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The value of an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    String(String),
    Boolean(bool),
    StringList(Vec<String>),
}

impl OptionValue {
    /// Returns the string value if this is a `String` variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the boolean value if this is a `Boolean` variant.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the list if this is a `StringList` variant.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            OptionValue::StringList(v) => Some(v),
            _ => None,
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            OptionValue::String(_) => ValueType::String,
            OptionValue::Boolean(_) => ValueType::Boolean,
            OptionValue::StringList(_) => ValueType::StringList,
        }
    }

    /// Parse a raw CLI or environment string into a value of the given type.
    ///
    /// Booleans accept `true/yes/1/on` and `false/no/0/off` in any case.
    /// Lists are comma separated; blank items are dropped.
    pub fn parse(key: OptionKey, value_type: ValueType, raw: &str) -> Result<Self, OptionError> {
        match value_type {
            ValueType::String => Ok(OptionValue::String(raw.to_string())),
            ValueType::Boolean => parse_bool(raw)
                .map(OptionValue::Boolean)
                .ok_or_else(|| OptionError::InvalidBoolean {
                    key,
                    value: raw.to_string(),
                }),
            ValueType::StringList => Ok(OptionValue::StringList(split_list(raw))),
        }
    }

    /// Convert a config file value into a value of the given type.
    pub fn from_toml(
        key: OptionKey,
        value_type: ValueType,
        value: &toml::Value,
    ) -> Result<Self, OptionError> {
        let mismatch = || OptionError::TypeMismatch {
            key,
            expected: value_type,
            got: value.type_str(),
        };

        match (value_type, value) {
            (ValueType::String, toml::Value::String(s)) => Ok(OptionValue::String(s.clone())),
            (ValueType::Boolean, toml::Value::Boolean(b)) => Ok(OptionValue::Boolean(*b)),
            (ValueType::Boolean, toml::Value::String(s)) => Self::parse(key, value_type, s),
            (ValueType::StringList, toml::Value::String(s)) => {
                Ok(OptionValue::StringList(split_list(s)))
            }
            (ValueType::StringList, toml::Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or_else(mismatch))
                .collect::<Result<Vec<_>, _>>()
                .map(OptionValue::StringList),
            _ => Err(mismatch()),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::String(s) => f.write_str(s),
            OptionValue::Boolean(b) => write!(f, "{}", b),
            OptionValue::StringList(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&OptionValue> for toml::Value {
    fn from(value: &OptionValue) -> Self {
        match value {
            OptionValue::String(s) => toml::Value::String(s.clone()),
            OptionValue::Boolean(b) => toml::Value::Boolean(*b),
            OptionValue::StringList(items) => {
                toml::Value::Array(items.iter().cloned().map(toml::Value::String).collect())
            }
        }
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Boolean(v)
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::String(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::String(v.to_string())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// How an option's default is obtained when the catalogue is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSource {
    /// No default.
    None,
    Bool(bool),
    Str(&'static str),
    List(&'static [&'static str]),
    /// First set environment variable among the given names.
    Env(&'static [&'static str]),
    /// Last lexicographic glob match beneath the project directory.
    ApkGlob(&'static str),
    /// Package name from the app identity lookup.
    AppPackageName,
    /// True unless the platform can open the HTML summary.
    SkipOpenSummary,
}

/// Metadata describing one configurable option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDescriptor {
    pub key: OptionKey,
    pub short_flag: Option<char>,
    pub env_var: Option<&'static str>,
    pub description: &'static str,
    pub optional: bool,
    pub value_type: ValueType,
    pub default_source: DefaultSource,
    /// Default evaluated when the catalogue was built.
    pub default_value: Option<OptionValue>,
    pub validator: Option<Validator>,
}

impl OptionDescriptor {
    pub(crate) fn new(key: OptionKey, description: &'static str) -> Self {
        Self {
            key,
            short_flag: None,
            env_var: None,
            description,
            optional: false,
            value_type: ValueType::String,
            default_source: DefaultSource::None,
            default_value: None,
            validator: None,
        }
    }

    pub(crate) fn short(mut self, flag: char) -> Self {
        self.short_flag = Some(flag);
        self
    }

    pub(crate) fn env(mut self, name: &'static str) -> Self {
        self.env_var = Some(name);
        self
    }

    pub(crate) fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub(crate) fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub(crate) fn default(mut self, source: DefaultSource) -> Self {
        self.default_source = source;
        self
    }

    pub(crate) fn validate(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Run this option's validator, if any, against a resolved value.
    pub fn check(&self, value: &OptionValue) -> Result<(), OptionError> {
        match self.validator {
            Some(validator) => validator.check(self.key, value),
            None => Ok(()),
        }
    }
}
