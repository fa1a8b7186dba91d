mod execute;
mod output;
mod output_tests;

pub use execute::DescribeResult;

use clap::Args;

/// List the profile's tables and relations
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  tabledoc describe                     # Summarize ./tabledoc.json
  tabledoc describe -o table            # Human-readable outline")]
pub struct DescribeCmd {}
