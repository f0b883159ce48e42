//! Command-line interface definitions and helpers.
//!
//! This module contains CLI argument parsing and subcommand handlers.

mod args;
mod commands;

pub use args::{cli_values, command, Args, Command, ConfigAction};
pub use commands::{handle_config_action, list_options, run, Session};
