//! End-to-end resolution tests: project layout on disk, config file,
//! environment and command-line values resolved into a `ScreengrabConfig`.

use std::path::{Path, PathBuf};

use clap::FromArgMatches;
use screengrab::appfile::Appfile;
use screengrab::cli::{self, Args};
use screengrab::config::Config;
use screengrab::options::DeviceType;
use screengrab::{
    CliValues, HostEnvironment, OptionCatalog, OptionError, OptionKey, Platform, Resolver,
    ScreengrabConfig, ValueSource,
};
use tempfile::TempDir;

/// Lay out an Android project with an Appfile and both debug APKs.
fn android_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("fastlane")).unwrap();
    std::fs::write(
        root.join("fastlane/Appfile"),
        "json_key_file(\"play.json\")\npackage_name(\"com.example.shots\")\n",
    )
    .unwrap();

    let apk_dir = root.join("app/build/outputs/apk");
    std::fs::create_dir_all(&apk_dir).unwrap();
    std::fs::write(apk_dir.join("app-debug.apk"), b"app").unwrap();
    std::fs::write(apk_dir.join("app-debug-androidTest-unaligned.apk"), b"tests").unwrap();
    dir
}

fn project_host(root: &Path) -> HostEnvironment {
    let mut host = HostEnvironment::new(root).with_platform(Platform::Linux);
    if let Some(appfile) = Appfile::locate(root) {
        host = host.with_app_identity(appfile);
    }
    host
}

#[test]
fn test_project_defaults_resolve_to_config() {
    let project = android_project();
    let host = project_host(project.path());
    let catalog = OptionCatalog::build(&host);

    let resolved = Resolver::new(&catalog).with_env(&host).resolve().unwrap();
    let config = ScreengrabConfig::from_resolved(&resolved).unwrap();

    assert_eq!(config.app_package_name, "com.example.shots");
    assert_eq!(config.device_type, DeviceType::Phone);
    assert!(config.skip_open_summary);
    assert_eq!(
        config.app_apk_path,
        Some(project.path().join("app/build/outputs/apk/app-debug.apk"))
    );
    assert_eq!(
        config.tests_apk_path,
        Some(project.path().join("app/build/outputs/apk/app-debug-androidTest-unaligned.apk"))
    );
}

#[test]
fn test_all_layers_together() {
    let project = android_project();
    let host = project_host(project.path())
        .with_var("SCREENGRAB_SPECIFIC_DEVICE", "emulator-5554")
        .with_var("SCREENGRAB_CLEAR_PREVIOUS_SCREENSHOTS", "true")
        .with_var("SCREENGRAB_DEVICE_TYPE", "tv")
        .with_var("ANDROID_HOME", "/opt/android");
    let catalog = OptionCatalog::build(&host);

    let config_path = project.path().join("screengrab.toml");
    std::fs::write(
        &config_path,
        "device_type = \"tenInch\"\nlocales = [\"en-US\", \"fr-FR\"]\n",
    )
    .unwrap();
    let file = Config::load(Some(config_path.as_path())).unwrap();

    let cli = CliValues::new().with(OptionKey::OutputDirectory, "shots");
    let resolved = Resolver::new(&catalog)
        .with_cli(&cli)
        .with_config(&file)
        .with_env(&host)
        .resolve()
        .unwrap();

    assert_eq!(resolved.source(OptionKey::OutputDirectory), Some(ValueSource::Cli));
    assert_eq!(resolved.source(OptionKey::DeviceType), Some(ValueSource::ConfigFile));
    assert_eq!(resolved.source(OptionKey::SpecificDevice), Some(ValueSource::Environment));
    assert_eq!(resolved.source(OptionKey::AndroidHome), Some(ValueSource::Default));

    let config = ScreengrabConfig::from_resolved(&resolved).unwrap();
    assert_eq!(config.output_directory, PathBuf::from("shots"));
    assert_eq!(config.device_type, DeviceType::TenInch);
    assert_eq!(config.locales, vec!["en-US".to_string(), "fr-FR".to_string()]);
    assert_eq!(config.specific_device.as_deref(), Some("emulator-5554"));
    assert!(config.clear_previous_screenshots);
    assert_eq!(config.android_home, Some(PathBuf::from("/opt/android")));
}

#[test]
fn test_missing_package_name_without_appfile() {
    let dir = TempDir::new().unwrap();
    let host = project_host(dir.path());
    let catalog = OptionCatalog::build(&host);

    let err = Resolver::new(&catalog).with_env(&host).resolve().unwrap_err();
    assert!(matches!(
        err,
        OptionError::MissingValue {
            key: OptionKey::AppPackageName
        }
    ));

    let cli = CliValues::new().with(OptionKey::AppPackageName, "com.example.cli");
    let resolved = Resolver::new(&catalog)
        .with_cli(&cli)
        .with_env(&host)
        .resolve()
        .unwrap();
    assert_eq!(resolved.string(OptionKey::AppPackageName), Some("com.example.cli"));
}

#[test]
fn test_apk_removed_after_catalog_built() {
    let project = android_project();
    let host = project_host(project.path());
    let catalog = OptionCatalog::build(&host);

    // The default was captured at build time; validation sees the current disk
    std::fs::remove_file(project.path().join("app/build/outputs/apk/app-debug.apk")).unwrap();
    let err = Resolver::new(&catalog).resolve().unwrap_err();
    assert!(matches!(
        err,
        OptionError::FileNotFound {
            key: OptionKey::AppApkPath,
            ..
        }
    ));
}

#[test]
fn test_command_line_through_clap() {
    let project = android_project();
    let host = project_host(project.path());
    let catalog = OptionCatalog::build(&host);

    let matches = cli::command(&catalog)
        .try_get_matches_from([
            "screengrab",
            "-d",
            "wear",
            "-q",
            "en-US,es-ES",
            "--skip_open_summary=false",
            "--json",
        ])
        .unwrap();
    let args = Args::from_arg_matches(&matches).unwrap();
    assert!(args.json);

    let values = cli::cli_values(&catalog, &matches);
    let resolved = Resolver::new(&catalog)
        .with_cli(&values)
        .with_env(&host)
        .resolve()
        .unwrap();
    let config = ScreengrabConfig::from_resolved(&resolved).unwrap();
    assert_eq!(config.device_type, DeviceType::Wear);
    assert_eq!(config.locales.len(), 2);
    assert!(!config.skip_open_summary);
}

#[test]
fn test_invalid_device_type_on_command_line() {
    let project = android_project();
    let host = project_host(project.path());
    let catalog = OptionCatalog::build(&host);

    let matches = cli::command(&catalog)
        .try_get_matches_from(["screengrab", "--device_type", "foo"])
        .unwrap();
    let values = cli::cli_values(&catalog, &matches);
    let err = Resolver::new(&catalog).with_cli(&values).resolve().unwrap_err();
    assert!(err.to_string().contains("device_type must be one of"));
}
