//! Subcommands of the `refshelf` binary.
//!
//! Each subcommand lives in its own module and follows the same shape: open the library named
//! by the configuration, do one thing to it, report through [`UserInteraction`], and save when
//! something changed.

use super::*;

pub mod add;
pub mod duplicates;
pub mod import;
pub mod list;
pub mod new;
pub mod remove;
pub mod search;
pub mod status;
pub mod tags;

pub use add::add;
pub use duplicates::duplicates;
pub use import::import;
pub use list::list;
pub use new::new;
pub use remove::remove;
pub use search::search;
pub use status::status;
pub use tags::tags;

/// Available commands for the CLI
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
  /// Start a new, empty library, replacing any library file at the same path
  New(NewOptions),

  /// Add a paper or update an existing one
  Add(AddOptions),

  /// Import plain-text review files as new records
  Import(ImportOptions),

  /// List papers, optionally restricted by tags
  List(ListOptions),

  /// Search by authors, publication years, keywords or document path
  Search(SearchOptions),

  /// Remove a paper from the library
  Remove(RemoveOptions),

  /// Report citation keys that are used more than once
  Duplicates,

  /// Show library statistics
  Status,

  /// List every tag used in the library
  Tags,
}

/// Options for starting a library
#[derive(Args, Clone, Debug)]
pub struct NewOptions {
  /// Display name of the library
  pub name: String,
}

/// Options for adding or updating a paper
#[derive(Args, Clone, Debug)]
pub struct AddOptions {
  /// Citation key. Generated from the authors and year when omitted.
  #[arg(long, short)]
  pub citation: Option<String>,

  /// Authors, separated by " and "
  #[arg(long, short)]
  pub authors: Option<String>,

  /// Title of the paper
  #[arg(long, short)]
  pub title: Option<String>,

  /// Publication year
  #[arg(long, short)]
  pub year: Option<String>,

  /// Kind of venue (Journal, Conference, Thesis, ...)
  #[arg(long, value_parser = parse_venue)]
  pub venue: Option<Venue>,

  /// Name of the journal, proceedings or publisher
  #[arg(long)]
  pub publication: Option<String>,

  /// Digital object identifier
  #[arg(long)]
  pub doi: Option<String>,

  /// Comma separated tags
  #[arg(long)]
  pub tags: Option<String>,

  /// Review text
  #[arg(long)]
  pub review: Option<String>,

  /// Path to the document
  #[arg(long)]
  pub paper: Option<PathBuf>,

  /// Move the document into the storage directory
  #[arg(long, requires = "paper")]
  pub ingest: bool,

  /// Mark the paper as read to the end
  #[arg(long)]
  pub finished: bool,
}

/// Options for importing reviews
#[derive(Args, Clone, Debug)]
pub struct ImportOptions {
  /// Review files; each file name is used as the citation key
  #[arg(required = true)]
  pub files: Vec<PathBuf>,
}

/// Options for listing papers
#[derive(Args, Clone, Debug)]
pub struct ListOptions {
  /// Only show papers with these comma separated tags
  #[arg(long)]
  pub tags: Option<String>,

  /// Show papers with any of the tags instead of all of them
  #[arg(long, requires = "tags")]
  pub any: bool,
}

/// Options for searching
#[derive(Args, Clone, Debug, Default)]
pub struct SearchOptions {
  /// Comma separated author names; a paper by any of them matches
  #[arg(long)]
  pub authors: Option<String>,

  /// Inclusive range of publication years
  #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
  pub years: Option<Vec<i32>>,

  /// Keywords; quote phrases to match them whole
  #[arg(long, short)]
  pub keywords: Option<String>,

  /// Match keywords against titles
  #[arg(long)]
  pub title: bool,

  /// Match keywords against reviews
  #[arg(long)]
  pub body: bool,

  /// Find the paper stored at this path. Other criteria are ignored.
  #[arg(long)]
  pub paper_path: Option<String>,
}

/// Options for removing a paper
#[derive(Args, Clone, Debug)]
pub struct RemoveOptions {
  /// Citation key of the paper
  pub citation: String,
}

/// Parses a venue name as written in library files.
fn parse_venue(value: &str) -> std::result::Result<Venue, String> {
  value.parse().map_err(|_| {
    let names: Vec<&str> = Venue::TOKENS.iter().map(|(_, token)| *token).collect();
    format!("unknown venue {:?}, expected one of {}", value, names.join(", "))
  })
}

/// Opens the configured library, logging where it came from.
fn open_library(config: Config) -> Result<Library> {
  let library = Library::open(config)?;
  debug!("Opened library {:?} with {} records", library.name(), library.len());
  Ok(library)
}
