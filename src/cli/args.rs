//! CLI argument parsing with clap.
//!
//! Fixed flags and subcommands use the derive API; one flag per catalogue
//! option is added with the builder API.

use clap::{Arg, ArgAction, ArgMatches, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::options::{OptionCatalog, OptionDescriptor, ValueType};
use crate::resolver::CliValues;

/// Resolve screengrab options for Android screenshot runs
#[derive(Parser, Debug)]
#[command(name = "screengrab")]
#[command(version, about = "Resolve screengrab options for Android screenshot runs", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Print the resolved configuration as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every available option with its flags, environment variable and default
    Options,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show resolved configuration and where each value came from
    Show,
    /// Create a config file template
    Init,
}

/// Build the full command: derive-defined flags plus one flag per option.
pub fn command(catalog: &OptionCatalog) -> clap::Command {
    catalog
        .iter()
        .fold(Args::command(), |cmd, option| cmd.arg(option_arg(option)))
}

fn option_arg(option: &OptionDescriptor) -> Arg {
    let key = option.key.as_str();
    let mut arg = Arg::new(key)
        .long(key)
        .help(option.description)
        .global(true);

    if let Some(short) = option.short_flag {
        arg = arg.short(short);
    }
    if let Some(env) = option.env_var {
        arg = arg.long_help(format!("{} [env: {}]", option.description, env));
    }

    match option.value_type {
        // Repeating a single-valued flag keeps the last value
        ValueType::String => arg
            .value_name("VALUE")
            .action(ArgAction::Set)
            .overrides_with(key),
        // An explicit value must be attached (`--flag=false`) so a bare flag
        // never swallows the following subcommand
        ValueType::Boolean => arg
            .value_name("BOOL")
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true")
            .action(ArgAction::Set)
            .overrides_with(key),
        // Repeated flags accumulate; each occurrence may also be comma separated
        ValueType::StringList => arg.value_name("LIST").action(ArgAction::Append),
    }
}

/// Collect the raw values of catalogue flags present on the command line.
pub fn cli_values(catalog: &OptionCatalog, matches: &ArgMatches) -> CliValues {
    let mut values = CliValues::new();
    for option in catalog.iter() {
        let given = matches
            .try_get_many::<String>(option.key.as_str())
            .ok()
            .flatten();
        if let Some(given) = given {
            let raw: Vec<&str> = given.map(String::as_str).collect();
            if !raw.is_empty() {
                values.set(option.key, raw.join(","));
            }
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostEnvironment;
    use crate::options::OptionKey;
    use clap::FromArgMatches;
    use tempfile::TempDir;

    fn parse(argv: &[&str]) -> (Args, CliValues) {
        let dir = TempDir::new().unwrap();
        let catalog = OptionCatalog::build(&HostEnvironment::new(dir.path()));
        let matches = command(&catalog).try_get_matches_from(argv).unwrap();
        let args = Args::from_arg_matches(&matches).unwrap();
        (args, cli_values(&catalog, &matches))
    }

    #[test]
    fn test_command_is_well_formed() {
        let dir = TempDir::new().unwrap();
        let catalog = OptionCatalog::build(&HostEnvironment::new(dir.path()));
        command(&catalog).debug_assert();
    }

    #[test]
    fn test_args_defaults() {
        let (args, values) = parse(&["screengrab"]);
        assert!(args.command.is_none());
        assert!(args.config.is_none());
        assert!(!args.json);
        assert!(values.is_empty());
    }

    #[test]
    fn test_short_and_long_flags() {
        let (_, values) = parse(&[
            "screengrab",
            "-a",
            "com.example.app",
            "--device_type",
            "tv",
            "-k",
            "app.apk",
        ]);
        assert_eq!(values.get(OptionKey::AppPackageName), Some("com.example.app"));
        assert_eq!(values.get(OptionKey::DeviceType), Some("tv"));
        assert_eq!(values.get(OptionKey::AppApkPath), Some("app.apk"));
        assert_eq!(values.get(OptionKey::SpecificDevice), None);
    }

    #[test]
    fn test_boolean_flag_without_value() {
        let (_, values) = parse(&["screengrab", "--clear_previous_screenshots"]);
        assert_eq!(values.get(OptionKey::ClearPreviousScreenshots), Some("true"));

        let (_, values) = parse(&["screengrab", "--skip_open_summary=false"]);
        assert_eq!(values.get(OptionKey::SkipOpenSummary), Some("false"));
    }

    #[test]
    fn test_bare_boolean_flag_before_subcommand() {
        let (args, values) = parse(&["screengrab", "--clear_previous_screenshots", "options"]);
        assert!(matches!(args.command, Some(Command::Options)));
        assert_eq!(values.get(OptionKey::ClearPreviousScreenshots), Some("true"));

        let (args, values) = parse(&["screengrab", "--skip_open_summary", "config", "show"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));
        assert_eq!(values.get(OptionKey::SkipOpenSummary), Some("true"));
    }

    #[test]
    fn test_repeated_string_flag_keeps_last_value() {
        let (_, values) = parse(&["screengrab", "-d", "tv", "-d", "wear"]);
        assert_eq!(values.get(OptionKey::DeviceType), Some("wear"));

        let (_, values) = parse(&[
            "screengrab",
            "--clear_previous_screenshots=false",
            "--clear_previous_screenshots",
        ]);
        assert_eq!(values.get(OptionKey::ClearPreviousScreenshots), Some("true"));
    }

    #[test]
    fn test_list_flags_accumulate() {
        let (_, values) = parse(&["screengrab", "-q", "en-US,de-DE", "--locales", "fr-FR"]);
        assert_eq!(values.get(OptionKey::Locales), Some("en-US,de-DE,fr-FR"));
    }

    #[test]
    fn test_options_after_subcommand() {
        let (args, values) = parse(&["screengrab", "config", "show", "-d", "wear", "--json"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));
        assert!(args.json);
        assert_eq!(values.get(OptionKey::DeviceType), Some("wear"));
    }

    #[test]
    fn test_config_option() {
        let (args, _) = parse(&["screengrab", "-c", "/tmp/screengrab.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/screengrab.toml")));
    }

    #[test]
    fn test_options_subcommand() {
        let (args, _) = parse(&["screengrab", "options"]);
        assert!(matches!(args.command, Some(Command::Options)));
    }
}
