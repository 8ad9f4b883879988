use std::path::Path;

use refshelf::{
  edit::EditSession,
  library::Library,
  paper::{Acceptance, PaperMeta, ThesisKind, Venue},
  prelude::*,
};
use tempfile::{tempdir, TempDir};
use tracing_test::traced_test;

mod workflows;

pub type TestResult<T> = anyhow::Result<T>;

/// Creates an empty library whose file and storage live in a temporary directory.
pub fn create_test_library() -> (Library, TempDir) {
  let dir = tempdir().unwrap();
  let config = Config::default()
    .with_library_path(dir.path().join("library.rodb"))
    .with_storage_path(dir.path().join("papers"));
  (Library::new(config, "Test library"), dir)
}

/// A handful of records covering every kind of field.
pub fn sample_papers() -> Vec<PaperMeta> {
  let mut lamport = PaperMeta::with_citation("Lamport1978");
  lamport.venue = Venue::Journal;
  lamport.authors = "Leslie Lamport".into();
  lamport.title = "Time, Clocks, and the Ordering of Events in a Distributed System".into();
  lamport.publication = "Communications of the ACM".into();
  lamport.year = "1978".into();
  lamport.tags = "distributed,classic".into();
  lamport.review = "Introduces logical clocks and the happened-before relation.".into();
  lamport.reader.finished = true;
  lamport.reader.rating = 10;

  let mut shannon = PaperMeta::with_citation("Shannon1937");
  shannon.venue = Venue::Thesis;
  shannon.thesis = ThesisKind::Masters;
  shannon.authors = "Claude E. Shannon".into();
  shannon.title = "A Symbolic Analysis of Relay and Switching Circuits".into();
  shannon.institution = "MIT".into();
  shannon.year = "1937".into();
  shannon.tags = "classic,circuits".into();

  let mut vaswani = PaperMeta::with_citation("VaswaniEtAl2017");
  vaswani.venue = Venue::Conference;
  vaswani.authors =
    "Ashish Vaswani, Noam Shazeer, Niki Parmar, Jakob Uszkoreit, Llion Jones, Aidan Gomez and \
     Lukasz Kaiser"
      .into();
  vaswani.title = "Attention Is All You Need".into();
  vaswani.year = "2017".into();
  vaswani.tags = "ml,nlp".into();
  vaswani.review = "Self-attention replaces recurrence. Deep learning at scale.".into();
  vaswani.reviewed = true;
  vaswani.reviewer.accept = Acceptance::StrongAccept;
  vaswani.reviewer.novelty = 9;

  let mut unknown = PaperMeta::with_citation("Anon");
  unknown.title = "Notes of uncertain date".into();
  unknown.year = "unknown".into();

  vec![lamport, shannon, vaswani, unknown]
}

/// A library filled with [`sample_papers`].
pub fn create_sample_library() -> (Library, TempDir) {
  let (mut library, dir) = create_test_library();
  for paper in sample_papers() {
    library.upsert(EditSession::new(paper));
  }
  (library, dir)
}

/// Writes `content` to `dir/name` and returns the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
  let path = dir.join(name);
  std::fs::write(&path, content).unwrap();
  path
}
