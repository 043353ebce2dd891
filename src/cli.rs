//! Clap adapter for xmlfig.
//!
//! This module is the **optional integration layer** between xmlfig's
//! framework-agnostic core and the [clap](https://docs.rs/clap) CLI parser.
//! It is compiled only when the `clap` Cargo feature is enabled (on by
//! default).
//!
//! [`SettingsArgs`] and [`SettingsSubcommand`] embed directly into your clap
//! `#[derive(Parser)]` struct to get `settings list|gen|get|reset`
//! subcommands. [`SettingsArgs::into_action()`] converts the parsed arguments
//! into a [`ConfigAction`](crate::ConfigAction); from there, all logic flows
//! through [`XmlfigBuilder::handle()`](crate::XmlfigBuilder::handle).

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::types::ConfigAction;

/// Clap-derived args for the `settings` subcommand group.
///
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
///
/// #[derive(Subcommand)]
/// enum Commands {
///     Settings(SettingsArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub action: Option<SettingsSubcommand>,
}

/// Available settings subcommands.
#[derive(Debug, Subcommand)]
pub enum SettingsSubcommand {
    /// Show every current setting as a key-value pair.
    List,
    /// Generate a settings document holding every default value.
    Gen {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the current value of one setting.
    Get {
        /// Dotted key path (e.g. "Window.Width") or member name (e.g. "width").
        key: String,
    },
    /// Restore every setting to its default and save.
    Reset,
}

impl SettingsArgs {
    /// Convert clap-parsed args into a framework-agnostic `ConfigAction`.
    ///
    /// Bare `settings` (no subcommand) and explicit `settings list` both map to
    /// `ConfigAction::List`.
    pub fn into_action(self) -> ConfigAction {
        match self.action {
            None | Some(SettingsSubcommand::List) => ConfigAction::List,
            Some(SettingsSubcommand::Gen { output }) => ConfigAction::Gen { output },
            Some(SettingsSubcommand::Get { key }) => ConfigAction::Get { key },
            Some(SettingsSubcommand::Reset) => ConfigAction::Reset,
        }
    }
}
