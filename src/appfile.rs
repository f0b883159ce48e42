//! App identity lookup from the project's fastlane `Appfile`.
//!
//! Only the Android `package_name` entry is read. Both call styles are
//! accepted:
//!
//! ```text
//! package_name "com.example.app"
//! package_name("com.example.app")
//! ```

use std::path::{Path, PathBuf};

/// Source of the app's stored identity.
pub trait AppIdentity {
    /// The Android package name, if one is configured.
    fn package_name(&self) -> Option<String>;
}

/// Identity source that never has a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAppIdentity;

impl AppIdentity for NoAppIdentity {
    fn package_name(&self) -> Option<String> {
        None
    }
}

/// Identity source with a fixed value.
#[derive(Debug, Clone, Default)]
pub struct StaticAppIdentity {
    pub package_name: Option<String>,
}

impl StaticAppIdentity {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: Some(package_name.into()),
        }
    }
}

impl AppIdentity for StaticAppIdentity {
    fn package_name(&self) -> Option<String> {
        self.package_name.clone()
    }
}

/// Parsed contents of an `Appfile`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Appfile {
    pub path: Option<PathBuf>,
    pub package_name: Option<String>,
}

impl Appfile {
    /// Candidate locations, relative to the project directory, in lookup order.
    pub const LOCATIONS: [&'static str; 3] = ["fastlane/Appfile", ".fastlane/Appfile", "Appfile"];

    /// Find and parse the first `Appfile` beneath `project_dir`.
    ///
    /// Returns `None` when no file exists or the first one found can't be read.
    pub fn locate(project_dir: &Path) -> Option<Self> {
        let path = Self::LOCATIONS
            .iter()
            .map(|rel| project_dir.join(rel))
            .find(|p| p.is_file())?;

        match std::fs::read_to_string(&path) {
            Ok(content) => {
                log::debug!("Reading app identity from {}", path.display());
                let mut appfile = Self::parse(&content);
                appfile.path = Some(path);
                Some(appfile)
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Parse `Appfile` text. The first `package_name` entry wins.
    pub fn parse(content: &str) -> Self {
        let package_name = content.lines().find_map(|line| {
            let line = strip_comment(line).trim();
            let rest = line.strip_prefix("package_name")?;
            // Reject identifiers like `package_name_suffix`
            if rest.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
                return None;
            }
            parse_string_argument(rest)
        });

        Self {
            path: None,
            package_name,
        }
    }
}

impl AppIdentity for Appfile {
    fn package_name(&self) -> Option<String> {
        self.package_name.clone()
    }
}

fn strip_comment(line: &str) -> &str {
    let mut in_quote: Option<char> = None;
    for (i, c) in line.char_indices() {
        match (c, in_quote) {
            ('"' | '\'', None) => in_quote = Some(c),
            (c, Some(q)) if c == q => in_quote = None,
            ('#', None) => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Extract the quoted argument from `"x"`, `("x")` or `( 'x' )`.
fn parse_string_argument(rest: &str) -> Option<String> {
    let rest = rest.trim();
    let rest = rest
        .strip_prefix('(')
        .and_then(|r| r.trim_end().strip_suffix(')'))
        .unwrap_or(rest)
        .trim();

    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let inner = rest[1..].strip_suffix(quote)?;
    if inner.is_empty() || inner.contains(quote) {
        return None;
    }
    Some(inner.to_string())
}
