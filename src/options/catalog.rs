//! The ordered screengrab option catalogue.

use std::sync::OnceLock;

use super::defaults;
use super::{DefaultSource, OptionDescriptor, OptionKey, Validator, ValueType};
use crate::host::HostEnvironment;

/// Process-wide catalogue, built on first access from the detected host.
static GLOBAL_CATALOG: OnceLock<OptionCatalog> = OnceLock::new();

/// Fixed, ordered set of option descriptors for a screengrab run.
///
/// Defaults are evaluated once, when the catalogue is built; the catalogue is
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionCatalog {
    options: Vec<OptionDescriptor>,
}

impl OptionCatalog {
    /// Build the catalogue, evaluating computed defaults against `host`.
    pub fn build(host: &HostEnvironment) -> Self {
        let options = table()
            .into_iter()
            .map(|mut option| {
                option.default_value = defaults::evaluate(option.default_source, host);
                option
            })
            .collect();
        Self { options }
    }

    /// The memoised catalogue for this process.
    ///
    /// Built at most once, from [`HostEnvironment::detect`], even under
    /// concurrent first access.
    pub fn global() -> &'static OptionCatalog {
        GLOBAL_CATALOG.get_or_init(|| Self::build(&HostEnvironment::detect()))
    }

    /// All descriptors in catalogue order.
    pub fn options(&self) -> &[OptionDescriptor] {
        &self.options
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn get(&self, key: OptionKey) -> &OptionDescriptor {
        &self.options[key.index()]
    }

    /// Finds a descriptor by key name (e.g. "device_type").
    pub fn find(&self, name: &str) -> Option<&OptionDescriptor> {
        OptionKey::from_name(name).map(|key| self.get(key))
    }

    pub fn find_by_short(&self, flag: char) -> Option<&OptionDescriptor> {
        self.options.iter().find(|o| o.short_flag == Some(flag))
    }

    pub fn find_by_env(&self, name: &str) -> Option<&OptionDescriptor> {
        self.options.iter().find(|o| o.env_var == Some(name))
    }
}

fn table() -> Vec<OptionDescriptor> {
    use OptionDescriptor as D;

    vec![
        D::new(
            OptionKey::AndroidHome,
            "Path to the root of your Android SDK installation, e.g. ~/tools/android-sdk-macosx",
        )
        .short('n')
        .optional()
        .default(DefaultSource::Env(&["ANDROID_HOME", "ANDROID_SDK"])),
        D::new(
            OptionKey::BuildToolsVersion,
            "The Android build tools version to use, e.g. '23.0.2'",
        )
        .short('i')
        .optional(),
        D::new(OptionKey::Locales, "A list of locales which should be used")
            .short('q')
            .value_type(ValueType::StringList)
            .default(DefaultSource::List(&["en-US"])),
        D::new(
            OptionKey::ClearPreviousScreenshots,
            "Enabling this option will automatically clear previously generated screenshots before running screengrab",
        )
        .env("SCREENGRAB_CLEAR_PREVIOUS_SCREENSHOTS")
        .value_type(ValueType::Boolean)
        .default(DefaultSource::Bool(false)),
        D::new(
            OptionKey::OutputDirectory,
            "The directory where to store the screenshots",
        )
        .short('o')
        .env("SCREENGRAB_OUTPUT_DIRECTORY")
        .default(DefaultSource::Str("fastlane/metadata/android")),
        D::new(
            OptionKey::SkipOpenSummary,
            "Don't open the summary after running screengrab",
        )
        .env("SCREENGRAB_SKIP_OPEN_SUMMARY")
        .value_type(ValueType::Boolean)
        .default(DefaultSource::SkipOpenSummary),
        D::new(
            OptionKey::AppPackageName,
            "The package name of the app under test (e.g. com.yourcompany.yourapp)",
        )
        .short('a')
        .env("SCREENGRAB_APP_PACKAGE_NAME")
        .default(DefaultSource::AppPackageName),
        D::new(
            OptionKey::TestsPackageName,
            "The package name of the tests bundle (e.g. com.yourcompany.yourapp.test)",
        )
        .env("SCREENGRAB_TESTS_PACKAGE_NAME")
        .optional(),
        D::new(
            OptionKey::UseTestsInPackages,
            "Only run tests in these Java packages",
        )
        .short('p')
        .env("SCREENGRAB_USE_TESTS_IN_PACKAGES")
        .optional()
        .value_type(ValueType::StringList),
        D::new(
            OptionKey::UseTestsInClasses,
            "Only run tests in these Java classes",
        )
        .short('l')
        .env("SCREENGRAB_USE_TESTS_IN_CLASSES")
        .optional()
        .value_type(ValueType::StringList),
        D::new(
            OptionKey::TestInstrumentationRunner,
            "The fully qualified class name of your test instrumentation runner",
        )
        .env("SCREENGRAB_TEST_INSTRUMENTATION_RUNNER")
        .optional()
        .default(DefaultSource::Str(
            "android.support.test.runner.AndroidJUnitRunner",
        )),
        D::new(
            OptionKey::EndingLocale,
            "Return the device to this locale after running tests",
        )
        .env("SCREENGRAB_ENDING_LOCALE")
        .optional()
        .default(DefaultSource::Str("en-US")),
        D::new(
            OptionKey::AppApkPath,
            "The path to the APK for the app under test",
        )
        .short('k')
        .env("SCREENGRAB_APP_APK_PATH")
        .optional()
        .default(DefaultSource::ApkGlob("app/build/outputs/apk/app-debug.apk"))
        .validate(Validator::ApkExists),
        D::new(
            OptionKey::TestsApkPath,
            "The path to the APK for the tests bundle",
        )
        .short('b')
        .env("SCREENGRAB_TESTS_APK_PATH")
        .optional()
        .default(DefaultSource::ApkGlob(
            "app/build/outputs/apk/app-debug-androidTest-unaligned.apk",
        ))
        .validate(Validator::ApkExists),
        D::new(
            OptionKey::SpecificDevice,
            "Use the device or emulator with the given serial number or qualifier",
        )
        .short('s')
        .env("SCREENGRAB_SPECIFIC_DEVICE")
        .optional(),
        D::new(
            OptionKey::DeviceType,
            "Type of device used for screenshots. Matches Google Play Types (phone, sevenInch, tenInch, tv, wear)",
        )
        .short('d')
        .env("SCREENGRAB_DEVICE_TYPE")
        .default(DefaultSource::Str("phone"))
        .validate(Validator::DeviceType),
    ]
}
