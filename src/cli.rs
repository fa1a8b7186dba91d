//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Command;
use crate::config::DEFAULT_PROFILE;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the profile file describing tables and relations
    #[arg(short, long, default_value = DEFAULT_PROFILE, global = true)]
    pub config: PathBuf,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    /// Log filter directives (overrides RUST_LOG), e.g. "debug" or "tabledoc=trace"
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}
