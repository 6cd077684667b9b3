//! Pomkit CLI
//!
//! ## Usage
//!
//! ```bash
//! pomkit check                        # Validate ./custom.config.json, ./locators, ./locale-strings
//! pomkit locator homePage heroBanner  # Print the resolved selector
//! pomkit strings en-US homePage       # Print a page's locale strings
//! ```

use clap::Parser;
use pomkit::logging::{self, LogFormat};
use pomkit_cli::handlers::{execute_check, execute_locator, execute_strings};
use pomkit_cli::{error_line, Cli, CliConfig, CliResult, Commands, Render};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_line(&format!("Error: {e}")));
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_cli(&cli);

    console::set_colors_enabled(config.color.should_color());
    console::set_colors_enabled_stderr(config.color.should_color());
    // A subscriber installed by the embedding process is fine to keep.
    let _ = logging::init(&config.verbosity.directive(), LogFormat::Compact);

    let output = match cli.command {
        Commands::Check(args) => execute_check(&args)?.render(args.format.into())?,
        Commands::Locator(args) => execute_locator(&args)?.render(args.format.into())?,
        Commands::Strings(args) => execute_strings(&args)?.render(args.format.into())?,
    };
    emit(&config, &output);
    Ok(())
}

fn emit(config: &CliConfig, output: &str) {
    if config.is_quiet() {
        return;
    }
    let trimmed = output.trim_end();
    if !trimmed.is_empty() {
        println!("{trimmed}");
    }
}
