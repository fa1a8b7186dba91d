use std::error::Error;
use std::process::ExitCode;

use clap::Parser;

use tabledoc::cli::Args;
use tabledoc::config::ProfileConfig;
use tabledoc::logging::init_tracing;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    match run(args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<String, Box<dyn Error>> {
    let config = ProfileConfig::load(&args.config)?;
    args.command.run(&config, args.format)
}
