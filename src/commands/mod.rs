//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `Execute` impl producing a serializable result
//! - An `Outputable` impl rendering that result

mod convert;
mod describe;

pub use convert::{ConvertCmd, ConvertResult};
pub use describe::{DescribeCmd, DescribeResult};

use clap::Subcommand;
use std::error::Error;

use crate::config::ProfileConfig;
use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, config: &ProfileConfig) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert every row of the root table into a nested document
    Convert(ConvertCmd),

    /// List the profile's tables and relations
    Describe(DescribeCmd),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, config: &ProfileConfig, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Convert(cmd) => {
                let result = cmd.execute(config)?;
                Ok(result.format(format))
            }
            Command::Describe(cmd) => {
                let result = cmd.execute(config)?;
                Ok(result.format(format))
            }
        }
    }
}
