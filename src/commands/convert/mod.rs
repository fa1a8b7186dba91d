mod execute;
mod output;

pub use execute::ConvertResult;

use clap::Args;

/// Convert every row of the root table into a nested document
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  tabledoc convert                      # Root table from the profile
  tabledoc convert -r items             # Resolve a different root table
  tabledoc convert -o json-compact      # One line of JSON
  tabledoc -c shop/tabledoc.json convert -o table")]
pub struct ConvertCmd {
    /// Root table to resolve (defaults to the profile's `root`)
    #[arg(short, long)]
    pub root: Option<String>,
}
