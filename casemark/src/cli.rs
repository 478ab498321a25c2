//! Command-line interface definitions for casemark

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI structure for the casemark application
#[derive(Parser)]
#[command(name = "casemark")]
#[command(version)]
#[command(about = "Compiler for the casemark markup language", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for casemark
#[derive(Subcommand)]
pub enum Commands {
    /// Compile a document to HTML
    Build {
        /// Input document path
        input: PathBuf,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Webography record file path
        #[arg(short, long, default_value = "webography")]
        webography: PathBuf,

        /// Exit non-zero if any warnings were recorded
        #[arg(long)]
        strict: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Compile a document and report warnings without writing output
    Check {
        /// Input document path
        input: PathBuf,

        /// Webography record file path
        #[arg(short, long, default_value = "webography")]
        webography: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}
