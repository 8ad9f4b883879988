//! Error types for the refshelf library.
//!
//! This module provides a single error type that covers every failure mode of the
//! library core:
//! - File system access while loading, saving and ingesting
//! - Malformed library files
//! - Configuration parsing
//! - Out-of-range store operations
//!
//! I/O failures and parse failures are kept in separate variants so that a caller can tell
//! "the file could not be opened" apart from "the file is not a library".
//!
//! # Examples
//!
//! ```no_run
//! use refshelf::{error::ShelfError, library::Library, Config};
//!
//! let mut library = Library::new(Config::default(), "Reading list");
//! match library.load("papers.rodb") {
//!   Err(ShelfError::Io(e)) => println!("Could not open the library: {}", e),
//!   Err(ShelfError::Malformed(msg)) => println!("Library file is damaged: {}", msg),
//!   Err(e) => println!("Other error: {}", e),
//!   Ok(()) => println!("Loaded {} records", library.len()),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`refshelf`](crate) crate.
pub type Result<T> = core::result::Result<T, ShelfError>;

/// Errors that can occur when working with a reference library.
///
/// Nothing in the library core panics on malformed input; every failure ends up as one of
/// these variants and the caller decides whether to alert the user.
#[derive(Error, Debug)]
pub enum ShelfError {
  /// A file system operation failed.
  ///
  /// This occurs when:
  /// - The library file cannot be opened or created
  /// - The destination directory is not writable
  /// - A document cannot be moved during ingest
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The XML stream could not be tokenised.
  ///
  /// Raised by `quick-xml` for syntax errors such as mismatched end tags, invalid
  /// characters or bad escapes.
  #[error(transparent)]
  Xml(#[from] quick_xml::Error),

  /// An element attribute was malformed (duplicated, unquoted, ...).
  #[error(transparent)]
  Attribute(#[from] quick_xml::events::attributes::AttrError),

  /// The library file was well formed XML but did not have the expected structure.
  ///
  /// The string describes what was wrong, e.g. a missing `bibliography` root or a stream
  /// that ended inside a record.
  #[error("Malformed library file: {0}")]
  Malformed(String),

  /// The temporary file holding a fresh save could not replace the target file.
  #[error("Could not replace library file: {0}")]
  Persist(#[from] tempfile::PersistError),

  /// A record index was outside the library.
  #[error("Record index {index} is out of range for a library of {len} records")]
  IndexOutOfRange {
    /// The index that was requested
    index: usize,
    /// The number of records in the library
    len:   usize,
  },

  /// A document could not be moved into managed storage.
  #[error("Could not ingest paper: {0}")]
  Ingest(String),

  /// A configuration file could not be deserialized.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// A configuration could not be serialized.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// A configuration value was missing or invalid.
  #[error("{0}")]
  Config(String),
}
