//! Error types for the refshelf command line front-end.

use refshelf::error::ShelfError;
use thiserror::Error;

/// Error type alias used for the `refshelfd` crate.
pub type Result<T> = core::result::Result<T, RefshelfdError>;

/// Errors that can occur while running a command.
#[derive(Error, Debug)]
pub enum RefshelfdError {
  /// The library core reported a failure
  #[error(transparent)]
  Shelf(#[from] ShelfError),

  /// Reading from or writing to the terminal failed
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// An interactive prompt failed
  #[error(transparent)]
  Dialog(#[from] dialoguer::Error),

  /// The command line arguments do not describe a valid request
  #[error("{0}")]
  Input(String),
}
