//! Post-resolution validators.
//!
//! Each validator is a plain function selected by a [`Validator`] tag, so it
//! can be called and tested without a catalogue.

use std::path::Path;

use super::{DeviceType, OptionKey, OptionValue};
use crate::error::OptionError;

/// Check applied to a resolved option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// The value must name an existing file.
    ApkExists,
    /// The value must be one of [`DeviceType::NAMES`].
    DeviceType,
}

impl Validator {
    pub fn check(self, key: OptionKey, value: &OptionValue) -> Result<(), OptionError> {
        let raw = value.to_string();
        match self {
            Validator::ApkExists => apk_exists(key, &raw),
            Validator::DeviceType => device_type(key, &raw),
        }
    }
}

/// Fails with [`OptionError::FileNotFound`] unless `path` is an existing file.
pub fn apk_exists(key: OptionKey, path: &str) -> Result<(), OptionError> {
    if Path::new(path).is_file() {
        Ok(())
    } else {
        Err(OptionError::FileNotFound {
            key,
            path: path.into(),
        })
    }
}

/// Fails with [`OptionError::InvalidEnum`] unless `value` is a known device type.
pub fn device_type(key: OptionKey, value: &str) -> Result<(), OptionError> {
    value
        .parse::<DeviceType>()
        .map(|_| ())
        .map_err(|_| OptionError::InvalidEnum {
            key,
            value: value.to_string(),
            allowed: DeviceType::NAMES,
        })
}
