//! Errors raised while resolving and validating screengrab options.

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::options::{OptionKey, ValueType};

/// Terminal, user-facing option errors.
#[derive(Debug, thiserror::Error)]
pub enum OptionError {
    #[error("Could not find APK file at path '{}' ({key})", .path.display())]
    FileNotFound { key: OptionKey, path: PathBuf },

    #[error("{key} must be one of: {} (got '{value}')", .allowed.join(", "))]
    InvalidEnum {
        key: OptionKey,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("No value found for '{key}'")]
    MissingValue { key: OptionKey },

    #[error("'{value}' is not a valid boolean for '{key}' (use true or false)")]
    InvalidBoolean { key: OptionKey, value: String },

    #[error("'{key}' expects a {expected} value, got {got}")]
    TypeMismatch {
        key: OptionKey,
        expected: ValueType,
        got: &'static str,
    },

    #[error("Unknown option '{0}'")]
    UnknownOption(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_display() {
        let err = OptionError::FileNotFound {
            key: OptionKey::AppApkPath,
            path: PathBuf::from("app/build/outputs/apk/app-debug.apk"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Could not find APK file"));
        assert!(msg.contains("app/build/outputs/apk/app-debug.apk"));
        assert!(msg.contains("app_apk_path"));
    }

    #[test]
    fn test_invalid_enum_lists_allowed_values() {
        let err = OptionError::InvalidEnum {
            key: OptionKey::DeviceType,
            value: "foo".to_string(),
            allowed: &["phone", "tv"],
        };
        let msg = err.to_string();
        assert!(msg.contains("device_type must be one of: phone, tv"));
        assert!(msg.contains("'foo'"));
    }

    #[test]
    fn test_missing_value_display() {
        let err = OptionError::MissingValue {
            key: OptionKey::AppPackageName,
        };
        assert_eq!(err.to_string(), "No value found for 'app_package_name'");
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = OptionError::TypeMismatch {
            key: OptionKey::Locales,
            expected: ValueType::StringList,
            got: "integer",
        };
        assert_eq!(err.to_string(), "'locales' expects a list value, got integer");
    }
}
