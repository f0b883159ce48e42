//! Subcommand handlers for option listing, config actions and run resolution.

use std::path::{Path, PathBuf};

use super::args::ConfigAction;
use crate::config::{self, Config};
use crate::error::OptionError;
use crate::host::HostEnvironment;
use crate::options::OptionCatalog;
use crate::resolver::{CliValues, ResolvedOptions, Resolver};
use crate::screengrab_config::ScreengrabConfig;

/// Everything a handler needs to resolve options.
pub struct Session<'a> {
    pub catalog: &'a OptionCatalog,
    pub host: &'a HostEnvironment,
    pub cli: &'a CliValues,
    pub config_path: Option<&'a Path>,
    pub json: bool,
}

impl Session<'_> {
    /// Load the config file and resolve every option.
    pub fn resolve(&self) -> Result<(Config, ResolvedOptions), OptionError> {
        let config = Config::load(self.config_path)?;
        let resolved = Resolver::new(self.catalog)
            .with_cli(self.cli)
            .with_config(&config)
            .with_env(self.host)
            .resolve()?;
        Ok((config, resolved))
    }

    fn config_file(&self) -> PathBuf {
        self.config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(config::default_path)
    }
}

/// Print the option table to stdout.
pub fn list_options(catalog: &OptionCatalog) {
    println!("Available options:");
    for option in catalog.iter() {
        let flags = match option.short_flag {
            Some(short) => format!("-{}, --{}", short, option.key),
            None => format!("    --{}", option.key),
        };
        println!();
        println!("  {}  <{}>", flags, option.value_type);
        println!("      {}", option.description);
        if let Some(env) = option.env_var {
            println!("      env: {}", env);
        }
        match &option.default_value {
            Some(value) => println!("      default: {}", value),
            None if option.optional => println!("      default: (none)"),
            None => println!("      default: (none, required)"),
        }
    }
}

/// Resolve the run configuration and print it.
pub fn run(session: &Session<'_>) -> Result<(), OptionError> {
    let (_, resolved) = session.resolve()?;
    let config = ScreengrabConfig::from_resolved(&resolved)?;

    if session.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("screengrab run configuration:");
    println!("  App package:     {}", config.app_package_name);
    println!("  Device type:     {}", config.device_type);
    println!("  Locales:         {}", config.locales.join(", "));
    println!("  Output:          {}", config.output_directory.display());
    println!("  App APK:         {}", display_path(config.app_apk_path.as_deref()));
    println!("  Tests APK:       {}", display_path(config.tests_apk_path.as_deref()));
    if let Some(device) = &config.specific_device {
        println!("  Device serial:   {}", device);
    }
    for filter in config.test_filters() {
        println!("  Test filter:     {}", filter);
    }
    println!(
        "  Clear previous:  {}",
        if config.clear_previous_screenshots { "yes" } else { "no" }
    );
    println!(
        "  Open summary:    {}",
        if config.skip_open_summary { "no" } else { "yes" }
    );
    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, session: &Session<'_>) -> Result<(), OptionError> {
    match action {
        ConfigAction::Show => {
            let (file, resolved) = session.resolve()?;

            if session.json {
                let entries: serde_json::Map<String, serde_json::Value> = resolved
                    .iter()
                    .map(|r| {
                        let value = serde_json::json!({
                            "value": r.value.as_ref().map(|v| v.to_string()),
                            "source": r.source,
                        });
                        (r.key.to_string(), value)
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }

            println!("Current configuration:");
            for r in resolved.iter() {
                match (&r.value, r.source) {
                    (Some(value), Some(source)) => {
                        println!("  {}: {} ({})", r.key, value, source)
                    }
                    _ => println!("  {}: (not set)", r.key),
                }
            }
            println!();

            match file.path {
                Some(path) => println!("Config file: {} (loaded)", path.display()),
                None => println!("Config file: {} (not found)", session.config_file().display()),
            }
            Ok(())
        }
        ConfigAction::Init => {
            let path = session.config_file();
            config::init(&path, session.catalog)?;
            println!("Created config file: {}", path.display());
            Ok(())
        }
    }
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not found)".to_string())
}
