//! Personal reference library management.
//!
//! `refshelf` keeps structured metadata about academic papers (citation key, authors, venue,
//! review text, ratings) and provides:
//!
//! - A persisted, forward-compatible XML library format
//! - Collision-free citation key generation from author lists
//! - Author, year, keyword and document-path search with streaming, cancelable results
//! - Tag filtering and duplicate key detection
//! - Import of plain-text reviews and ingest of documents into managed storage
//!
//! The library is a pure core: it renders nothing and launches nothing. A front-end (GUI,
//! TUI or the bundled `refshelf` command) owns a [`library::Library`] and calls into it.
//!
//! # Getting Started
//!
//! ```no_run
//! use refshelf::{
//!   edit::EditSession,
//!   library::Library,
//!   paper::{PaperMeta, Venue},
//!   search::{KeywordQuery, SearchCriteria},
//!   Config,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let mut library = Library::open(config)?;
//!
//! // Describe a paper and let the library pick a citation key for it
//! let mut paper = PaperMeta::default();
//! paper.authors = "Ada Lovelace and Charles Babbage".into();
//! paper.year = "1843".into();
//! paper.title = "Notes on the Analytical Engine".into();
//! paper.venue = Venue::Journal;
//! paper.citation = library.generate_citation(&paper.authors, &paper.year).unwrap_or_default();
//!
//! library.upsert(EditSession::new(paper));
//! library.save_default()?;
//!
//! // Search for it again
//! let criteria = SearchCriteria::default().with_keywords(KeywordQuery::title("engine"));
//! for hit in library.search(&criteria) {
//!   println!("{}: {}", hit.citation, hit.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`paper`]: The record model and its enumerations
//! - [`serializer`]: Reading and writing library files
//! - [`citation`]: Citation key derivation
//! - [`search`]: Compound search with streaming results
//! - [`tags`]: Tag filtering and the tag catalogue
//! - [`duplicates`]: Duplicate citation key detection
//! - [`library`]: The authoritative in-memory store
//! - [`edit`]: Transient edit sessions and document ingest
//! - [`review`]: Importing plain-text reviews
//! - [`stats`]: Library statistics
//! - [`prelude`]: Common types for ergonomic imports

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
  str::FromStr,
  sync::Arc,
};

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod citation;
pub mod config;
pub mod duplicates;
pub mod edit;
pub mod error;
pub mod library;
pub mod paper;
pub mod review;
pub mod search;
pub mod serializer;
pub mod stats;
pub mod tags;

pub use crate::config::Config;
use crate::{error::*, paper::*};

/// Common traits and types for ergonomic imports.
///
/// # Usage
///
/// ```no_run
/// use refshelf::prelude::*;
///
/// fn example() -> Result<(), ShelfError> {
///   let library = Library::open(Config::default())?;
///   println!("{} records in {}", library.len(), library.name());
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    edit::EditSession,
    error::ShelfError,
    library::Library,
    paper::PaperMeta,
    search::{SearchCriteria, SearchHit},
    tags::TagMode,
    Config,
  };
}
