//! screengrab option catalogue and resolver.
//!
//! The catalogue describes every option a screengrab run accepts; the
//! resolver turns command-line flags, a config file, environment variables
//! and catalogue defaults into a validated [`ScreengrabConfig`].

pub mod appfile;
pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod options;
pub mod resolver;
pub mod screengrab_config;

pub use error::OptionError;
pub use host::{HostEnvironment, Platform};
pub use options::{OptionCatalog, OptionDescriptor, OptionKey, OptionValue, ValueType};
pub use resolver::{CliValues, ResolvedOptions, Resolver, ValueSource};
pub use screengrab_config::ScreengrabConfig;
