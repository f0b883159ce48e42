//! Google Play device categories for screenshot output.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Type of device used for screenshots. Matches Google Play types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceType {
    #[default]
    Phone,
    SevenInch,
    TenInch,
    Tv,
    Wear,
}

impl DeviceType {
    pub const ALL: [DeviceType; 5] = [
        DeviceType::Phone,
        DeviceType::SevenInch,
        DeviceType::TenInch,
        DeviceType::Tv,
        DeviceType::Wear,
    ];

    /// Accepted spellings, in declaration order.
    pub const NAMES: &'static [&'static str] = &["phone", "sevenInch", "tenInch", "tv", "wear"];

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Phone => "phone",
            DeviceType::SevenInch => "sevenInch",
            DeviceType::TenInch => "tenInch",
            DeviceType::Tv => "tv",
            DeviceType::Wear => "wear",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown device type '{0}'")]
pub struct ParseDeviceTypeError(pub String);

impl FromStr for DeviceType {
    type Err = ParseDeviceTypeError;

    // Matching is case sensitive, as Google Play names are.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ParseDeviceTypeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_variants() {
        let names: Vec<_> = DeviceType::ALL.iter().map(|d| d.as_str()).collect();
        assert_eq!(names, DeviceType::NAMES);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("sevenInch".parse::<DeviceType>(), Ok(DeviceType::SevenInch));
        assert_eq!("tv".parse::<DeviceType>(), Ok(DeviceType::Tv));
        assert!("seven-inch".parse::<DeviceType>().is_err());
        assert!("Phone".parse::<DeviceType>().is_err());
    }

    #[test]
    fn test_serialize_uses_play_names() {
        let json = serde_json::to_string(&DeviceType::TenInch).unwrap();
        assert_eq!(json, "\"tenInch\"");
    }
}
