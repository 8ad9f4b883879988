//! Command line front-end for the refshelf reference library.
//!
//! This crate provides the `refshelf` binary, a thin caller of the `refshelf` library core.
//! It supports operations like:
//! - Creating a library and adding papers to it
//! - Importing plain-text reviews
//! - Listing by tag and searching by author, year and keyword
//! - Reporting duplicate citation keys and library statistics
//!
//! # Usage
//!
//! ```bash
//! # Start a new library
//! refshelf new "Reading list"
//!
//! # Add a paper, letting refshelf choose the citation key
//! refshelf add --authors "Leslie Lamport" --year 1978 --title "Time, Clocks, ..." --tags classic
//!
//! # Search titles and reviews
//! refshelf search --keywords 'clocks "total order"' --title --body
//!
//! # Show papers tagged with either tag
//! refshelf list --tags classic,ml --any
//! ```
//!
//! Destructive operations ask for confirmation. Logging detail is raised with `-v`.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use refshelf::{
  edit::EditSession,
  library::{Library, Upsert},
  paper::{PaperMeta, Venue},
  search::{KeywordQuery, SearchCriteria, SearchHit},
  tags::{TagFilter, TagMode},
  Config,
};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Manage a personal library of papers and reviews")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the library file. If not specified, uses the configured library.
  #[arg(long, short, global = true)]
  path: Option<PathBuf>,

  /// Directory that ingested documents are moved into. Overrides the configuration.
  #[arg(long, global = true)]
  storage: Option<PathBuf>,

  /// Path to the configuration file. If not specified, uses the platform configuration
  /// directory.
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

impl Cli {
  /// Builds the library configuration from the configuration file and the overrides given on
  /// the command line.
  fn library_config(&self) -> Result<Config> {
    let config_path = self.config.clone().unwrap_or_else(Config::default_path);
    trace!("Using configuration at {}", config_path.display());

    let mut config = Config::load_or_default(&config_path)?;
    if let Some(path) = &self.path {
      config = config.with_library_path(path);
    }
    if let Some(storage) = &self.storage {
      config = config.with_storage_path(storage);
    }
    debug!("Library file: {}", config.library_path.display());
    Ok(config)
  }
}

/// Configures the logging system based on the verbosity level
///
/// # Arguments
///
/// * `verbosity` - Number of times the verbose flag was used
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Entry point for the refshelf CLI application
///
/// Parses the command line, sets up logging, loads the configuration and runs the requested
/// command.
///
/// # Errors
///
/// Returns a [`RefshelfdError`] when the library cannot be read or written, when the
/// arguments do not make sense together, or when prompting the user fails.
#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let config = cli.library_config()?;
  let result = match cli.command.clone() {
    Commands::New(options) => new(&cli, config, options),
    Commands::Add(options) => add(&cli, config, options),
    Commands::Import(options) => import(&cli, config, options),
    Commands::List(options) => list(&cli, config, options),
    Commands::Search(options) => search(&cli, config, options).await,
    Commands::Remove(options) => remove(&cli, config, options),
    Commands::Duplicates => duplicates(&cli, config),
    Commands::Status => status(&cli, config),
    Commands::Tags => tags(&cli, config),
  };

  if let Err(e) = &result {
    eprintln!("{} {}", style(ERROR_PREFIX).red(), e);
  }
  result
}
