//! sheetanim CLI - Command-line interface for sprite-sheet animation generation
//!
//! This binary slices sprite sheets, generates clips and controller states
//! from job files, and transfers transitions between controllers.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

// Use modules from the library crate
use sheetanim_cli::commands;

/// sheetanim - Sprite-sheet animation and state-machine generation
#[derive(Parser)]
#[command(name = "sheetanim")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log created assets and skipped items (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Slice a sprite sheet into grid cells and report which are empty
    Slice {
        /// Sheet path, relative to the asset root
        sheet: String,

        /// Number of grid rows
        #[arg(short, long)]
        rows: u32,

        /// Number of grid columns
        #[arg(short, long, default_value_t = 1)]
        columns: u32,

        /// Horizontal pivot in [0, 1]
        #[arg(long, default_value_t = 0.5)]
        pivot_x: f64,

        /// Vertical pivot in [0, 1]
        #[arg(long, default_value_t = 0.5)]
        pivot_y: f64,

        /// Asset root directory
        #[arg(long, default_value = ".")]
        root: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a generation job file without touching any asset
    Validate {
        /// Path to the job file (JSON)
        #[arg(short, long)]
        job: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Run a generation job: slice, assemble clips and build controller states
    Generate {
        /// Path to the job file (JSON)
        #[arg(short, long)]
        job: String,

        /// Asset root directory
        #[arg(long, default_value = ".")]
        root: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Copy parameters and transitions from one controller to another
    Transfer {
        /// Source controller path, relative to the asset root
        #[arg(short, long)]
        source: String,

        /// Destination controller path, relative to the asset root
        #[arg(short, long)]
        destination: String,

        /// Skip transitions whose states are missing instead of creating them
        #[arg(long)]
        strict: bool,

        /// Clear destination parameters and transitions before copying
        #[arg(long)]
        reset: bool,

        /// Asset root directory
        #[arg(long, default_value = ".")]
        root: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the layers, states and transitions of a controller
    Inspect {
        /// Controller path, relative to the asset root
        controller: String,

        /// Asset root directory
        #[arg(long, default_value = ".")]
        root: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Slice {
            sheet,
            rows,
            columns,
            pivot_x,
            pivot_y,
            root,
            json,
        } => commands::slice::run(&root, &sheet, rows, columns, [pivot_x, pivot_y], json),
        Commands::Validate { job, json } => commands::validate::run(&job, json),
        Commands::Generate { job, root, json } => commands::generate::run(&job, &root, json),
        Commands::Transfer {
            source,
            destination,
            strict,
            reset,
            root,
            json,
        } => commands::transfer::run(&root, &source, &destination, strict, reset, json),
        Commands::Inspect {
            controller,
            root,
            json,
        } => commands::inspect::run(&root, &controller, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
