//! Transient edit sessions.
//!
//! An [`EditSession`] carries a record on its way into a [`Library`](crate::library::Library)
//! together with the state that only matters during the edit:
//!
//! - the citation key the record had before the edit, so a renamed record replaces its old
//!   entry instead of being added a second time
//! - whether the source document should be moved into managed storage
//! - whether the record was made up from an unread document rather than typed in
//!
//! None of this is ever written to a library file.

use std::{fs, io};

use super::*;

/// A record being created or edited.
///
/// # Examples
///
/// ```
/// use refshelf::{edit::EditSession, paper::PaperMeta};
///
/// let mut session = EditSession::new(PaperMeta::with_citation("Smith2020"));
/// session.paper.citation = "Smith2020a".into();
/// assert!(session.is_renamed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
  /// The record as edited
  pub paper:             PaperMeta,
  /// Citation key before the edit; empty for a brand-new record
  pub original_citation: String,
  /// Move the source document into managed storage when committing
  pub ingest:            bool,
  /// The record stands in for an unread document and has not been filled in yet
  pub pseudo:            bool,
}

impl EditSession {
  /// Starts editing `paper`, remembering its current citation key.
  pub fn new(paper: PaperMeta) -> Self {
    let original_citation = paper.citation.clone();
    Self { paper, original_citation, ingest: false, pseudo: false }
  }

  /// Starts a placeholder record for an unread document at `path`.
  ///
  /// The title defaults to the file stem so the record is recognisable in a list.
  pub fn for_unread(path: impl AsRef<Path>) -> Self {
    let path = path.as_ref();
    let mut paper = PaperMeta::default();
    paper.paper_path = path.to_string_lossy().into_owned();
    paper.title =
      path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default();
    Self { paper, original_citation: String::new(), ingest: true, pseudo: true }
  }

  /// Builder method requesting (or not) that the document be ingested on commit.
  pub fn with_ingest(mut self, ingest: bool) -> Self {
    self.ingest = ingest;
    self
  }

  /// Whether the citation key changed during the edit.
  pub fn is_renamed(&self) -> bool {
    !self.original_citation.is_empty() && self.original_citation != self.paper.citation
  }

  /// The key an existing entry for this record is stored under.
  pub fn lookup_key(&self) -> &str {
    if self.is_renamed() {
      &self.original_citation
    } else {
      &self.paper.citation
    }
  }

  /// Where the document would be stored: `<storage>/<citation>.<extension>`.
  pub fn storage_target(&self, storage: &Path) -> PathBuf {
    let mut file_name = self.paper.citation.clone();
    if let Some(ext) = Path::new(&self.paper.paper_path).extension() {
      file_name.push('.');
      file_name.push_str(&ext.to_string_lossy());
    }
    storage.join(file_name)
  }

  /// Moves the document into `storage`, renaming it after the citation key, and points
  /// [`PaperMeta::paper_path`] at the new location.
  ///
  /// A document that already lives in `storage` is left where it is.
  ///
  /// # Errors
  ///
  /// - [`ShelfError::Ingest`] if there is no document or citation key, or if the target file
  ///   already exists
  /// - [`ShelfError::Io`] if the document cannot be moved
  pub fn ingest(&mut self, storage: &Path) -> Result<PathBuf> {
    if self.paper.paper_path.is_empty() {
      return Err(ShelfError::Ingest("record has no document".into()));
    }
    if self.paper.citation.is_empty() {
      return Err(ShelfError::Ingest("record has no citation key to name the document".into()));
    }

    let source = PathBuf::from(&self.paper.paper_path);
    if source.starts_with(storage) {
      debug!("{} is already in storage", source.display());
      return Ok(source);
    }

    let target = self.storage_target(storage);
    if target.exists() {
      return Err(ShelfError::Ingest(format!("{} already exists", target.display())));
    }

    fs::create_dir_all(storage)?;
    move_file(&source, &target)?;
    debug!("Ingested {} as {}", source.display(), target.display());

    self.paper.paper_path = target.to_string_lossy().into_owned();
    Ok(target)
  }
}

/// Renames `from` to `to`, copying instead when they are on different file systems.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
  if fs::rename(from, to).is_ok() {
    return Ok(());
  }
  fs::copy(from, to)?;
  fs::remove_file(from)
}
