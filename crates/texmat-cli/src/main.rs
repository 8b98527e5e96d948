//! Texmat CLI - Command-line interface for texture-to-material synthesis
//!
//! This binary turns a seam-repaired color texture into depth, normal,
//! displacement, diffuse, roughness and metallic maps.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use texmat_cli::commands;
use texmat_cli::commands::synthesize::SynthesizeArgs;
use texmat_cli::input::ParamOverrides;

/// Texmat - Texture to PBR Material Synthesis
#[derive(Parser)]
#[command(name = "texmat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize material maps from a color texture
    Synthesize {
        /// Path to the input PNG texture
        #[arg(short, long)]
        input: String,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        out_dir: Option<String>,

        /// Material name used as the file prefix (default: input file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// JSON params file (flags override its values)
        #[arg(short, long)]
        params: Option<String>,

        #[command(flatten)]
        overrides: ParamOverrides,

        /// Resample every map to N x N before saving
        #[arg(long)]
        resolution: Option<u32>,

        /// Also write the diffuse map tiled N x N as a seam preview
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=16))]
        tile: Option<u32>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a params file without running the pipeline
    Validate {
        /// Path to the JSON params file
        #[arg(short, long)]
        params: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the default params as JSON
    Defaults,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Synthesize {
            input,
            out_dir,
            name,
            params,
            overrides,
            resolution,
            tile,
            json,
        } => {
            let args = SynthesizeArgs {
                input: &input,
                out_dir: out_dir.as_deref(),
                name: name.as_deref(),
                params: params.as_deref(),
                overrides: &overrides,
                resolution,
                tile,
            };
            commands::synthesize::run(&args, json)
        }
        Commands::Validate { params, json } => commands::validate::run(&params, json),
        Commands::Defaults => commands::defaults::run(),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
