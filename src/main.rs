//! CLI tool to convert, format, and validate Caddyfiles.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "caddyfile")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical JSON form of a Caddyfile
    #[command(name = "to-json")]
    ToJson { file: PathBuf },

    /// Print the Caddyfile for a canonical JSON document
    #[command(name = "from-json")]
    FromJson { file: PathBuf },

    /// Print a Caddyfile in canonical layout
    Fmt { file: PathBuf },

    /// Parse Caddyfiles and run every registered directive compiler
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let ok = match &cli.command {
        Commands::ToJson { file } => convert(file, caddyfile_engine::to_json),
        Commands::FromJson { file } => convert(file, caddyfile_engine::from_json),
        Commands::Fmt { file } => convert(file, |input| {
            caddyfile_engine::parse_str(input).map(|doc| caddyfile_engine::format(&doc))
        }),
        Commands::Validate { files } => files.iter().fold(true, |ok, f| validate(f) && ok),
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn read(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            None
        }
    }
}

fn convert(
    path: &Path,
    f: impl Fn(&str) -> Result<String, caddyfile_engine::Error>,
) -> bool {
    let Some(content) = read(path) else {
        return false;
    };
    match f(&content) {
        Ok(output) => {
            println!("{output}");
            true
        }
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            false
        }
    }
}

fn validate(path: &Path) -> bool {
    let Some(content) = read(path) else {
        return false;
    };
    match caddyfile_engine::load(&content) {
        Ok(sites) => {
            let compiled: usize = sites.iter().map(|s| s.middleware.len()).sum();
            eprintln!(
                "{}: valid ({} server block(s), {compiled} compiled directive(s))",
                path.display(),
                sites.len()
            );
            true
        }
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            false
        }
    }
}
