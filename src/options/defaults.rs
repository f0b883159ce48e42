//! Evaluation of [`DefaultSource`] against the host environment.

use std::path::PathBuf;

use super::{DefaultSource, OptionValue};
use crate::host::HostEnvironment;

pub(crate) fn evaluate(source: DefaultSource, host: &HostEnvironment) -> Option<OptionValue> {
    match source {
        DefaultSource::None => None,
        DefaultSource::Bool(b) => Some(OptionValue::Boolean(b)),
        DefaultSource::Str(s) => Some(OptionValue::String(s.to_string())),
        DefaultSource::List(items) => Some(OptionValue::StringList(
            items.iter().map(|s| s.to_string()).collect(),
        )),
        DefaultSource::Env(names) => names
            .iter()
            .find_map(|name| host.var(name))
            .map(OptionValue::from),
        DefaultSource::ApkGlob(pattern) => {
            last_match(host, pattern).map(|p| OptionValue::String(p.to_string_lossy().into_owned()))
        }
        DefaultSource::AppPackageName => host.app_identity().package_name().map(OptionValue::String),
        DefaultSource::SkipOpenSummary => {
            Some(OptionValue::Boolean(!host.platform().can_open_summary()))
        }
    }
}

/// Glob `pattern` beneath the project directory and return the last match in
/// lexicographic order.
pub(crate) fn last_match(host: &HostEnvironment, pattern: &str) -> Option<PathBuf> {
    let root = host.project_dir().to_string_lossy();
    let full = format!("{}/{}", glob::Pattern::escape(&root), pattern);

    let paths = match glob::glob(&full) {
        Ok(paths) => paths,
        Err(e) => {
            log::warn!("Invalid APK pattern {}: {}", full, e);
            return None;
        }
    };

    let mut matches: Vec<PathBuf> = paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::debug!("Skipping unreadable path while globbing: {}", e);
                None
            }
        })
        .collect();
    // Compare whole path strings, not components: `debug/` sorts after `debug-x/`
    matches.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));

    let found = matches.pop();
    match &found {
        Some(path) => log::debug!("APK default for {}: {}", pattern, path.display()),
        None => log::debug!("No APK matching {}", full),
    }
    found
}
