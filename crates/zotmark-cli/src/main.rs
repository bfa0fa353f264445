// Command-line interface for zotmark
//
// Usage:
//  zotmark convert [<note.html>] [--output <file>]   - Convert one note (stdin when no file)
//  zotmark batch <payload.json> [--force] [--json]   - Process a Zotero webhook payload
//  zotmark uri <citekey>                             - Print the link that opens a note
//
// Global flags:
//  --config <path>      Layer a TOML file over the built-in defaults
//  --vault <dir>        Override vault.root
//  --log-level <level>  Override log.level

mod commands;
mod settings;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::settings::{Loader, ZotmarkConfig};

#[derive(Debug, Parser)]
#[command(name = "zotmark", version, about = "Convert Zotero notes to Obsidian Markdown")]
struct Cli {
    /// Path to a zotmark.toml configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Obsidian vault root directory
    #[arg(long, global = true, value_name = "DIR")]
    vault: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert one note's HTML to Markdown
    Convert {
        /// HTML file to read; stdin when omitted or `-`
        input: Option<PathBuf>,

        /// Write Markdown here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Process a webhook payload of Zotero items
    Batch {
        /// Payload JSON file; stdin when `-`
        payload: PathBuf,

        /// Replace notes that already exist
        #[arg(long)]
        force: bool,

        /// Print template fields as JSON instead of writing notes
        #[arg(long)]
        json: bool,
    },

    /// Print the Obsidian link for a note
    Uri {
        citekey: String,

        /// Use the Advanced URI plugin scheme
        #[arg(long)]
        advanced: bool,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Zotmark(#[from] zotmark::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("cannot encode JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),

    #[error("{failed} of {total} items failed")]
    ItemsFailed { failed: usize, total: usize },
}

fn load_config(cli: &Cli) -> Result<ZotmarkConfig, CliError> {
    let mut loader = Loader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    loader = loader.with_env();
    if let Some(vault) = &cli.vault {
        loader = loader.set_override("vault.root", vault.to_string_lossy().into_owned())?;
    }
    if let Some(level) = &cli.log_level {
        loader = loader.set_override("log.level", level.as_str())?;
    }
    Ok(loader.build()?)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let _logger = logging::init_logging(&config.log.level).map_err(CliError::Usage)?;
    log::debug!("loaded configuration: {config:?}");

    match cli.command {
        Command::Convert { input, output } => commands::convert(&config, input.as_deref(), output.as_deref()),
        Command::Batch { payload, force, json } => commands::batch(&config, &payload, force, json),
        Command::Uri { citekey, advanced } => commands::uri(&config, &citekey, advanced),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("zotmark: {err}");
            ExitCode::FAILURE
        }
    }
}
