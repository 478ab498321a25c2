//! casemark - compiler for the casemark markup language
//!
//! Reads a case-structured markup document and writes static HTML.

#![deny(unsafe_code)]

mod cli;

use anyhow::{Context, Result};
use casemark::pipeline;
use clap::Parser;
use cli::{Cli, Commands};

/// Main entry point for the casemark CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            output,
            webography,
            strict,
            verbose,
        } => {
            init_logging(verbose);

            let result = pipeline::compile_file(&input, &webography)
                .with_context(|| format!("Failed to build {}", input.display()))?;
            pipeline::write_output(&result.html, output.as_deref())
                .with_context(|| "Failed to write output")?;

            if strict && !result.warnings.is_empty() {
                for warning in &result.warnings {
                    eprintln!("warning: {warning}");
                }
                anyhow::bail!(
                    "{} warning(s) recorded in strict mode",
                    result.warnings.len()
                );
            }
        }

        Commands::Check {
            input,
            webography,
            verbose,
        } => {
            init_logging(verbose);

            let result = pipeline::compile_file(&input, &webography)
                .with_context(|| format!("Failed to check {}", input.display()))?;

            if result.warnings.is_empty() {
                println!("✓ {} compiles cleanly", input.display());
            } else {
                for warning in &result.warnings {
                    eprintln!("warning: {warning}");
                }
                anyhow::bail!("{} warning(s) in {}", result.warnings.len(), input.display());
            }
        }
    }

    Ok(())
}

/// Initialize logging when verbose output is requested
fn init_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    }
}
