//! The authoritative in-memory library.
//!
//! A [`Library`] owns a named, citation-sorted collection of [`PaperMeta`] records and the
//! [`Config`] it was created with. It is the single owner of the collection: every mutation
//! goes through it and leaves the records sorted by citation key, and every query (search,
//! tag filtering, duplicate detection, statistics) reads from it.
//!
//! Citation keys are not forced to be unique. Brand-new records should be checked with
//! [`Library::exists`] first; duplicates that slip in anyway (for example from a merged file)
//! are reported by [`Library::duplicate_keys`].
//!
//! # Examples
//!
//! ```no_run
//! use refshelf::{edit::EditSession, library::Library, paper::PaperMeta, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut library = Library::open(Config::default())?;
//!
//! let mut paper = PaperMeta::default();
//! paper.authors = "Barbara Liskov".into();
//! paper.year = "1987".into();
//! paper.citation = library.generate_citation(&paper.authors, &paper.year).unwrap_or_default();
//! library.upsert(EditSession::new(paper));
//!
//! for key in library.duplicate_keys() {
//!   println!("Duplicate citation: {}", key);
//! }
//! library.save_default()?;
//! # Ok(())
//! # }
//! ```

use chrono::Local;

use super::*;
use crate::{
  edit::EditSession,
  search::{spawn_search, CancelFlag, SearchCriteria, SearchHandle, Searcher},
  stats::LibraryStats,
  tags::TagFilter,
};

/// Whether [`Library::upsert`] replaced a record or added one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
  /// No record was stored under the key, so the record was added
  Inserted,
  /// An existing record was replaced
  Updated,
}

/// A named collection of papers.
#[derive(Debug, Clone)]
pub struct Library {
  /// Display name, stored in the library file
  name:    String,
  /// Records, sorted by citation key
  records: Vec<PaperMeta>,
  /// Paths and limits
  config:  Config,
}

impl Library {
  /// Creates an empty library.
  pub fn new(config: Config, name: impl Into<String>) -> Self {
    Self { name: name.into(), records: Vec::new(), config }
  }

  /// Opens the library file named by `config`, or starts an empty library when there is no
  /// such file yet.
  ///
  /// # Errors
  ///
  /// Fails when the file exists but cannot be read or is not a library.
  pub fn open(config: Config) -> Result<Self> {
    let path = config.library_path.clone();
    let name = path
      .file_stem()
      .map(|stem| stem.to_string_lossy().into_owned())
      .unwrap_or_else(|| "References".to_string());
    let mut library = Self::new(config, name);

    if path.exists() {
      library.load(&path)?;
    } else {
      debug!("No library at {}, starting an empty one", path.display());
    }
    Ok(library)
  }

  /// Replaces the contents of this library with the library stored at `path`.
  ///
  /// On failure the current name and records are left untouched. Duplicate citation keys in
  /// the file are accepted and logged; see [`Library::duplicate_keys`].
  pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
    let (name, records) = serializer::load(path)?;
    self.name = name;
    self.records = records;
    self.sort();

    let duplicates = self.duplicate_keys();
    if !duplicates.is_empty() {
      warn!("Library {:?} contains {} duplicate citation keys", self.name, duplicates.len());
    }
    Ok(())
  }

  /// Writes the library to `path` atomically.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    serializer::save(path, &self.name, &self.records)
  }

  /// Writes the library to the file named by its configuration.
  pub fn save_default(&self) -> Result<()> { self.save(&self.config.library_path) }

  /// Discards every record and renames the library.
  pub fn clear(&mut self, name: impl Into<String>) {
    self.name = name.into();
    self.records.clear();
  }

  /// Display name of the library.
  pub fn name(&self) -> &str { &self.name }

  /// Renames the library.
  pub fn set_name(&mut self, name: impl Into<String>) { self.name = name.into(); }

  /// The configuration the library was created with.
  pub fn config(&self) -> &Config { &self.config }

  /// Number of records.
  pub fn len(&self) -> usize { self.records.len() }

  /// Whether the library has no records.
  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  /// All records, sorted by citation key.
  pub fn records(&self) -> &[PaperMeta] { &self.records }

  /// Sorts the records by citation key. Records sharing a key keep their relative order.
  pub fn sort(&mut self) { self.records.sort_by(PaperMeta::cmp_citation); }

  /// Whether a record is stored under `citation`.
  pub fn exists(&self, citation: &str) -> bool { self.position(citation).is_some() }

  /// Index of the first record stored under `citation`.
  pub fn position(&self, citation: &str) -> Option<usize> {
    let index = self.records.partition_point(|paper| paper.citation.as_str() < citation);
    (self.records.get(index)?.citation == citation).then_some(index)
  }

  /// The first record stored under `citation`.
  pub fn get(&self, citation: &str) -> Option<&PaperMeta> {
    self.position(citation).map(|index| &self.records[index])
  }

  /// Generates a citation key that is not yet used in this library.
  ///
  /// Returns `None` when `authors` contains no names or every candidate key is taken.
  pub fn generate_citation(&self, authors: &str, year: &str) -> Option<String> {
    citation::generate(authors, year, |key| self.exists(key), self.config.citation)
  }

  /// Stores the record of an edit session, stamping today's date as its review date.
  ///
  /// See [`Library::upsert_on`].
  pub fn upsert(&mut self, session: EditSession) -> Upsert {
    self.upsert_on(session, Local::now().date_naive())
  }

  /// Stores the record of an edit session, stamping `today` as its review date.
  ///
  /// The record replaces the entry stored under its original citation key when it was
  /// renamed, or under its current key otherwise, and is added when there is no such entry.
  /// A record without a citation key never replaces anything. Tags are sorted ignoring case
  /// and empty ones are dropped; surrounding spaces stay part of the tag.
  pub fn upsert_on(&mut self, session: EditSession, today: NaiveDate) -> Upsert {
    let lookup = session.lookup_key().to_string();
    let mut paper = session.paper;
    paper.review_date = Some(today);
    paper.tags = normalize_tags(&paper.tags);

    let existing = if paper.citation.is_empty() { None } else { self.position(&lookup) };
    let outcome = match existing {
      Some(index) => {
        debug!("Updating record {} (stored as {})", paper.citation, lookup);
        self.records[index] = paper;
        Upsert::Updated
      },
      None => {
        debug!("Adding record {}", paper.citation);
        self.records.push(paper);
        Upsert::Inserted
      },
    };
    self.sort();
    outcome
  }

  /// Moves the document of `session` into the configured storage directory.
  pub fn ingest(&self, session: &mut EditSession) -> Result<PathBuf> {
    session.ingest(&self.config.storage_path)
  }

  /// Ingests the document when the session asks for it, then stores the record.
  ///
  /// Nothing is stored when the ingest fails.
  pub fn commit(&mut self, mut session: EditSession) -> Result<Upsert> {
    if session.ingest {
      self.ingest(&mut session)?;
    }
    Ok(self.upsert(session))
  }

  /// Removes and returns the record at `index`.
  ///
  /// # Errors
  ///
  /// [`ShelfError::IndexOutOfRange`] when there is no such record.
  pub fn remove(&mut self, index: usize) -> Result<PaperMeta> {
    if index >= self.records.len() {
      return Err(ShelfError::IndexOutOfRange { index, len: self.records.len() });
    }
    let paper = self.records.remove(index);
    debug!("Removed record {}", paper.citation);
    Ok(paper)
  }

  /// Adds a record built from a plain-text review file, see [`review::import_review`].
  ///
  /// The record is added even when its key is already in use; the duplicate then shows up in
  /// [`Library::duplicate_keys`]. Returns the citation key of the new record.
  pub fn import_review(&mut self, path: impl AsRef<Path>) -> Result<String> {
    let paper = review::import_review(path, &self.config.storage_path)?;
    if self.exists(&paper.citation) {
      warn!("Citation {} already exists in the library", paper.citation);
    }
    let citation = paper.citation.clone();
    self.records.push(paper);
    self.sort();
    Ok(citation)
  }

  /// Keys that occur more than once, one entry per extra occurrence.
  pub fn duplicate_keys(&self) -> Vec<String> { duplicates::find_duplicate_keys(&self.records) }

  /// A shared copy of the records for searching on another thread.
  pub fn snapshot(&self) -> Arc<[PaperMeta]> { self.records.as_slice().into() }

  /// Searches the library on the current thread.
  pub fn search(&self, criteria: &SearchCriteria) -> Searcher<'_> {
    self.search_with(criteria, CancelFlag::default())
  }

  /// Searches the library on the current thread, stopping when `cancel` is set.
  pub fn search_with(&self, criteria: &SearchCriteria, cancel: CancelFlag) -> Searcher<'_> {
    Searcher::new(&self.records, criteria, cancel)
  }

  /// Searches a snapshot of the library on a tokio worker, see [`spawn_search`].
  pub fn spawn_search(&self, criteria: &SearchCriteria) -> SearchHandle {
    spawn_search(self.snapshot(), criteria)
  }

  /// Records passing a tag filter, in library order.
  pub fn filter_tags<'a>(&'a self, filter: &'a TagFilter) -> impl Iterator<Item = &'a PaperMeta> {
    filter.apply(&self.records)
  }

  /// Every distinct tag in the library, sorted.
  pub fn tags(&self) -> Vec<String> { tags::tag_catalogue(&self.records) }

  /// Earliest and latest publication year.
  pub fn year_range(&self) -> Option<(i32, i32)> { stats::year_range(&self.records) }

  /// Statistics as of `today`.
  pub fn stats(&self, today: NaiveDate) -> LibraryStats {
    LibraryStats::compute(&self.records, today)
  }
}

/// Drops empty tags and sorts the rest ignoring case.
fn normalize_tags(tags: &str) -> String {
  let mut tags: Vec<&str> = tags.split(',').filter(|tag| !tag.is_empty()).collect();
  tags.sort_by_key(|tag| tag.to_lowercase());
  tags.join(",")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn library_with(keys: &[&str]) -> Library {
    let mut library = Library::new(Config::default(), "Test");
    for key in keys {
      library.upsert(EditSession::new(PaperMeta::with_citation(*key)));
    }
    library
  }

  fn keys(library: &Library) -> Vec<&str> {
    library.records().iter().map(|p| p.citation.as_str()).collect()
  }

  #[test]
  fn test_upsert_keeps_sorted() {
    let library = library_with(&["Turing1950", "Church1936", "Shannon1948"]);
    assert_eq!(keys(&library), ["Church1936", "Shannon1948", "Turing1950"]);
  }

  #[test]
  fn test_upsert_insert_then_update() {
    let mut library = Library::new(Config::default(), "Test");
    let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    let mut paper = PaperMeta::with_citation("Codd1970");
    assert_eq!(library.upsert_on(EditSession::new(paper.clone()), today), Upsert::Inserted);

    paper.title = "A Relational Model".into();
    assert_eq!(library.upsert_on(EditSession::new(paper), today), Upsert::Updated);
    assert_eq!(library.len(), 1);
    assert_eq!(library.get("Codd1970").unwrap().title, "A Relational Model");
    assert_eq!(library.get("Codd1970").unwrap().review_date, Some(today));
  }

  #[test]
  fn test_rename_replaces_original_entry() {
    let mut library = library_with(&["X2019", "Y2020"]);

    let mut session = EditSession::new(library.get("X2019").unwrap().clone());
    session.paper.citation = "X2019a".into();
    assert_eq!(library.upsert(session), Upsert::Updated);
    assert_eq!(keys(&library), ["X2019a", "Y2020"]);
  }

  #[test]
  fn test_empty_citation_never_updates() {
    let mut library = library_with(&[""]);
    assert_eq!(library.upsert(EditSession::new(PaperMeta::default())), Upsert::Inserted);
    assert_eq!(library.len(), 2);
    assert_eq!(library.duplicate_keys(), [""]);
  }

  #[test]
  fn test_remove() {
    let mut library = library_with(&["A", "B", "C"]);
    assert_eq!(library.remove(1).unwrap().citation, "B");
    assert_eq!(keys(&library), ["A", "C"]);
    assert!(matches!(library.remove(2), Err(ShelfError::IndexOutOfRange { index: 2, len: 2 })));
  }

  #[test]
  fn test_lookup() {
    let library = library_with(&["Alpha", "Beta", "Gamma"]);
    assert!(library.exists("Beta"));
    assert!(!library.exists("beta"));
    assert!(!library.exists("Delta"));
    assert_eq!(library.position("Gamma"), Some(2));
    assert!(library.get("Omega").is_none());
  }

  #[test]
  fn test_generate_citation_avoids_existing() {
    let library = library_with(&["Knuth1974", "Knuth1974a"]);
    assert_eq!(library.generate_citation("Donald Knuth", "1974").as_deref(), Some("Knuth1974b"));
    assert_eq!(library.generate_citation("", "1974"), None);
  }

  #[test]
  fn test_tags_normalized_on_upsert() {
    let mut library = Library::new(Config::default(), "Test");
    let mut paper = PaperMeta::with_citation("A");
    paper.tags = "nlp,,ML, attention".into();
    library.upsert(EditSession::new(paper));
    assert_eq!(library.get("A").unwrap().tags, " attention,ML,nlp");
    assert_eq!(library.tags(), [" attention", "ML", "nlp"]);
  }

  #[traced_test]
  #[test]
  fn test_failed_load_keeps_records() {
    let dir = tempdir().unwrap();
    let bad = dir.path().join("bad.rodb");
    std::fs::write(&bad, r#"<bibliography version="1" name="Bad"><record citation="Z">"#).unwrap();

    let mut library = library_with(&["A", "B"]);
    assert!(library.load(&bad).is_err());
    assert!(library.load(dir.path().join("missing.rodb")).is_err());
    assert_eq!(library.name(), "Test");
    assert_eq!(keys(&library), ["A", "B"]);
  }

  #[traced_test]
  #[test]
  fn test_load_sorts_and_reports_duplicates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("merged.rodb");
    let records: Vec<_> = ["B", "A", "B"].into_iter().map(PaperMeta::with_citation).collect();
    serializer::save(&path, "Merged", &records).unwrap();

    let mut library = Library::new(Config::default(), "Empty");
    library.load(&path).unwrap();
    assert_eq!(library.name(), "Merged");
    assert_eq!(keys(&library), ["A", "B", "B"]);
    assert_eq!(library.duplicate_keys(), ["B"]);
    assert!(logs_contain("duplicate citation keys"));
  }

  #[test]
  fn test_open_missing_file_starts_empty() {
    let dir = tempdir().unwrap();
    let config = Config::default().with_library_path(dir.path().join("reading.rodb"));
    let library = Library::open(config).unwrap();
    assert!(library.is_empty());
    assert_eq!(library.name(), "reading");
  }

  #[test]
  fn test_clear() {
    let mut library = library_with(&["A"]);
    library.clear("Fresh");
    assert!(library.is_empty());
    assert_eq!(library.name(), "Fresh");
  }

  #[test]
  fn test_commit_with_ingest() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("download.pdf");
    std::fs::write(&source, b"%PDF").unwrap();
    let storage = dir.path().join("storage");
    let mut library = Library::new(Config::default().with_storage_path(&storage), "Test");

    let mut session = EditSession::for_unread(&source);
    session.paper.citation = "Hoare1978".into();
    assert_eq!(library.commit(session).unwrap(), Upsert::Inserted);

    let stored = library.get("Hoare1978").unwrap();
    assert_eq!(PathBuf::from(&stored.paper_path), storage.join("Hoare1978.pdf"));
    assert!(!source.exists());
  }

  #[test]
  fn test_failed_ingest_stores_nothing() {
    let dir = tempdir().unwrap();
    let mut library =
      Library::new(Config::default().with_storage_path(dir.path().join("storage")), "Test");
    let mut session = EditSession::for_unread(dir.path().join("inbox").join("absent.pdf"));
    session.paper.citation = "Absent2020".into();
    assert!(library.commit(session).is_err());
    assert!(library.is_empty());
  }
}
