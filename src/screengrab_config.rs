//! Typed view of a resolved screengrab configuration.

use serde::Serialize;
use std::path::PathBuf;

use crate::error::OptionError;
use crate::options::{DeviceType, OptionKey, ValueType};
use crate::resolver::ResolvedOptions;

/// Settings for one screenshot run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreengrabConfig {
    pub android_home: Option<PathBuf>,
    pub build_tools_version: Option<String>,
    pub locales: Vec<String>,
    pub clear_previous_screenshots: bool,
    pub output_directory: PathBuf,
    pub skip_open_summary: bool,
    pub app_package_name: String,
    pub tests_package_name: Option<String>,
    pub use_tests_in_packages: Option<Vec<String>>,
    pub use_tests_in_classes: Option<Vec<String>>,
    pub test_instrumentation_runner: Option<String>,
    pub ending_locale: Option<String>,
    pub app_apk_path: Option<PathBuf>,
    pub tests_apk_path: Option<PathBuf>,
    pub specific_device: Option<String>,
    pub device_type: DeviceType,
}

impl ScreengrabConfig {
    pub fn from_resolved(resolved: &ResolvedOptions) -> Result<Self, OptionError> {
        let device_type = required_string(resolved, OptionKey::DeviceType)?;
        let device_type = device_type
            .parse::<DeviceType>()
            .map_err(|_| OptionError::InvalidEnum {
                key: OptionKey::DeviceType,
                value: device_type.to_string(),
                allowed: DeviceType::NAMES,
            })?;

        Ok(Self {
            android_home: optional_string(resolved, OptionKey::AndroidHome)?.map(PathBuf::from),
            build_tools_version: optional_string(resolved, OptionKey::BuildToolsVersion)?,
            locales: required_list(resolved, OptionKey::Locales)?,
            clear_previous_screenshots: required_bool(resolved, OptionKey::ClearPreviousScreenshots)?,
            output_directory: PathBuf::from(required_string(resolved, OptionKey::OutputDirectory)?),
            skip_open_summary: required_bool(resolved, OptionKey::SkipOpenSummary)?,
            app_package_name: required_string(resolved, OptionKey::AppPackageName)?.to_string(),
            tests_package_name: optional_string(resolved, OptionKey::TestsPackageName)?,
            use_tests_in_packages: optional_list(resolved, OptionKey::UseTestsInPackages)?,
            use_tests_in_classes: optional_list(resolved, OptionKey::UseTestsInClasses)?,
            test_instrumentation_runner: optional_string(
                resolved,
                OptionKey::TestInstrumentationRunner,
            )?,
            ending_locale: optional_string(resolved, OptionKey::EndingLocale)?,
            app_apk_path: optional_string(resolved, OptionKey::AppApkPath)?.map(PathBuf::from),
            tests_apk_path: optional_string(resolved, OptionKey::TestsApkPath)?.map(PathBuf::from),
            specific_device: optional_string(resolved, OptionKey::SpecificDevice)?,
            device_type,
        })
    }

    /// Instrumentation `-e class/package` filter arguments for the test run.
    pub fn test_filters(&self) -> Vec<String> {
        let mut filters = Vec::new();
        if let Some(classes) = &self.use_tests_in_classes {
            filters.push(format!("class {}", classes.join(",")));
        }
        if let Some(packages) = &self.use_tests_in_packages {
            filters.push(format!("package {}", packages.join(",")));
        }
        filters
    }
}

fn mismatch(key: OptionKey, expected: ValueType, resolved: &ResolvedOptions) -> OptionError {
    OptionError::TypeMismatch {
        key,
        expected,
        got: resolved
            .get(key)
            .map(|v| v.value_type().name())
            .unwrap_or("nothing"),
    }
}

fn optional_string(resolved: &ResolvedOptions, key: OptionKey) -> Result<Option<String>, OptionError> {
    match resolved.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| mismatch(key, ValueType::String, resolved)),
    }
}

fn required_string(resolved: &ResolvedOptions, key: OptionKey) -> Result<&str, OptionError> {
    match resolved.get(key) {
        None => Err(OptionError::MissingValue { key }),
        Some(v) => v
            .as_str()
            .ok_or_else(|| mismatch(key, ValueType::String, resolved)),
    }
}

fn required_bool(resolved: &ResolvedOptions, key: OptionKey) -> Result<bool, OptionError> {
    match resolved.get(key) {
        None => Err(OptionError::MissingValue { key }),
        Some(v) => v
            .as_bool()
            .ok_or_else(|| mismatch(key, ValueType::Boolean, resolved)),
    }
}

fn optional_list(resolved: &ResolvedOptions, key: OptionKey) -> Result<Option<Vec<String>>, OptionError> {
    match resolved.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_list()
            .map(|l| Some(l.to_vec()))
            .ok_or_else(|| mismatch(key, ValueType::StringList, resolved)),
    }
}

fn required_list(resolved: &ResolvedOptions, key: OptionKey) -> Result<Vec<String>, OptionError> {
    optional_list(resolved, key)?.ok_or(OptionError::MissingValue { key })
}
