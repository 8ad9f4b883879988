//! Reading and writing library files.
//!
//! A library file is an XML document with one `bibliography` root carrying the format
//! `version` and the library `name`, and one `record` child per paper:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <bibliography version="1" name="Reading list">
//!   <record citation="Lamport1978">
//!     <venue>Journal</venue>
//!     <authors>Leslie Lamport</authors>
//!     <title>Time, Clocks, and the Ordering of Events in a Distributed System</title>
//!     <year>1978</year>
//!     <reviewed/>
//!     <reader>
//!       <finished/>
//!       <understanding>8</understanding>
//!       <rating>10</rating>
//!     </reader>
//!   </record>
//! </bibliography>
//! ```
//!
//! Every field of a record is optional and is written only when it differs from its default,
//! so older readers skip what they do not know and newer fields cost nothing when unused. The
//! [`reader`] and [`writer`] submodules hold the two directions; this module adds the file
//! level operations on top of them:
//!
//! - [`save`] writes to a temporary file beside the destination and renames it into place,
//!   so a failed save never leaves a partial library behind
//! - [`load`] returns either the complete library or an error, never a partial one

use std::{
  fs::File,
  io::{BufReader, BufWriter, Write},
};

use tempfile::NamedTempFile;

use super::*;

pub mod reader;
pub mod writer;

pub use self::{reader::read_from, writer::write_to};

/// Version written to the `version` attribute of the root element.
pub const FORMAT_VERSION: u32 = 1;

/// Name of the root element.
pub const ROOT_ELEMENT: &str = "bibliography";

/// Name of the element holding one paper.
pub const RECORD_ELEMENT: &str = "record";

/// Text format of `reviewDate`, e.g. `Sat Mar 2 2019`.
pub const REVIEW_DATE_FORMAT: &str = "%a %b %-d %Y";

/// Writes a library atomically.
///
/// The records are written in the order given; callers keep them sorted.
///
/// # Errors
///
/// - [`ShelfError::Io`] if the destination directory is not writable
/// - [`ShelfError::Persist`] if the finished file cannot replace the destination
pub fn save(destination: impl AsRef<Path>, name: &str, records: &[PaperMeta]) -> Result<()> {
  let destination = destination.as_ref();
  let dir = match destination.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  let mut temp = NamedTempFile::new_in(dir)?;
  {
    let mut out = BufWriter::new(temp.as_file_mut());
    write_to(&mut out, name, records)?;
    out.flush()?;
  }
  temp.as_file().sync_all()?;
  temp.persist(destination)?;

  debug!("Saved {} records to {}", records.len(), destination.display());
  Ok(())
}

/// Reads a library file, returning its name and records.
///
/// # Errors
///
/// - [`ShelfError::Io`] if the file cannot be opened or read
/// - [`ShelfError::Xml`], [`ShelfError::Attribute`] or [`ShelfError::Malformed`] if the
///   content is not a library
pub fn load(source: impl AsRef<Path>) -> Result<(String, Vec<PaperMeta>)> {
  let source = source.as_ref();
  let file = File::open(source)?;
  let (name, records) = read_from(BufReader::new(file))?;
  debug!("Loaded {} records from {}", records.len(), source.display());
  Ok((name, records))
}
