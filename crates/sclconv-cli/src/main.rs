//! sclconv CLI - Scala tuning to sequencer user scale converter
//!
//! This binary converts `.scl` tuning files into `.SCA` user scale files,
//! batch-converts directories into numbered slots and inspects written files.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use sclconv_cli::commands;

/// Default maximum scale size, root included.
const DEFAULT_MAX_SIZE: u8 = 32;

/// sclconv - Convert Scala tunings to sequencer user scales
#[derive(Parser)]
#[command(name = "sclconv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one .scl file to a .SCA user scale file
    Convert {
        /// Input .scl file
        input: String,

        /// Output .SCA file
        output: String,

        /// Internal name (max 8 chars), defaults to the uppercased file name
        #[arg(long)]
        name: Option<String>,

        /// Maximum scale size, root included
        #[arg(long, default_value_t = DEFAULT_MAX_SIZE, value_parser = clap::value_parser!(u8).range(1..))]
        max_size: u8,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Convert every eligible .scl file in a directory into numbered slots
    Batch {
        /// Directory to scan for .scl files
        dir: String,

        /// Directory for numbered .SCA outputs (default: the scanned directory)
        #[arg(short, long)]
        out_dir: Option<String>,

        /// Maximum scale size, root included
        #[arg(long, default_value_t = DEFAULT_MAX_SIZE, value_parser = clap::value_parser!(u8).range(1..))]
        max_size: u8,

        /// Stop at the first file that fails to convert
        #[arg(long)]
        fail_fast: bool,

        /// Write a JSON report of every file's outcome to this path
        #[arg(long)]
        report: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Decode a .SCA file and verify its checksum
    Inspect {
        /// Path to the .SCA file
        path: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            name,
            max_size,
            json,
        } => commands::convert::run(&input, &output, name.as_deref(), max_size, json),
        Commands::Batch {
            dir,
            out_dir,
            max_size,
            fail_fast,
            report,
            json,
        } => commands::batch::run(
            &dir,
            out_dir.as_deref(),
            max_size,
            fail_fast,
            report.as_deref(),
            json,
        ),
        Commands::Inspect { path, json } => commands::inspect::run(&path, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
