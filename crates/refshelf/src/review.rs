//! Importing plain-text reviews.
//!
//! Before a library existed, reviews were kept as loose text files named after the paper's
//! citation key, e.g. `Lamport1978`:
//!
//! ```text
//! Time, Clocks, and the Ordering of Events in a Distributed System
//! Leslie Lamport
//!
//! Defines the happened-before relation and logical clocks...
//! ```
//!
//! The first line is the title and the second the authors (older files have `{filename}`
//! there instead, which is ignored). The year is taken from the digits at the end of the
//! citation key. Importing turns such a file into a minimal [`PaperMeta`].

use std::fs;

use chrono::{DateTime, Local};

use super::*;

/// Document extensions looked for in storage when importing, in order of preference.
pub const PAPER_EXTENSIONS: &[&str] = &["doc", "docx", "dvi", "odt", "pdf", "ps", "ps.gz", "txt"];

lazy_static! {
  /// The last run of digits in a citation key.
  static ref TRAILING_YEAR: Regex = Regex::new(r"(\d+)\D*$").unwrap();
}

/// Derives a four digit year from the digits at the end of a citation key.
///
/// Two digit years below 50 are taken as 20xx, from 50 up as 19xx.
///
/// ```
/// use refshelf::review::year_from_citation;
///
/// assert_eq!(year_from_citation("Lamport1978").as_deref(), Some("1978"));
/// assert_eq!(year_from_citation("Smith04b").as_deref(), Some("2004"));
/// assert_eq!(year_from_citation("Turing50").as_deref(), Some("1950"));
/// assert_eq!(year_from_citation("Anonymous"), None);
/// ```
pub fn year_from_citation(citation: &str) -> Option<String> {
  let digits = TRAILING_YEAR.captures(citation)?.get(1)?.as_str();
  let year: u32 = digits.parse().ok()?;
  let year = match year {
    0..=49 => year + 2000,
    50..=99 => year + 1900,
    _ => year,
  };
  Some(year.to_string())
}

/// Removes the title and author lines, and the blank line after them, from a review.
///
/// Only non-empty leading lines are removed, so a review without a header loses nothing but
/// a leading blank line. Text with fewer than two lines is returned unchanged.
pub fn trim_header(review: &str) -> String {
  let mut lines: Vec<&str> = review.split('\n').collect();
  if lines.len() < 2 {
    return review.to_string();
  }

  let mut start = 0;
  for _ in 0..2 {
    if lines.get(start).is_some_and(|line| !line.is_empty()) {
      start += 1;
    }
  }
  if lines.get(start).is_some_and(|line| line.is_empty()) {
    start += 1;
  }

  lines.drain(..start.min(lines.len()));
  lines.iter().map(|line| format!("{line}\n")).collect()
}

/// Builds a record from the text of a review stored under `citation`.
///
/// The returned record has no document path and no review date; [`import_review`] fills
/// those in from the file system.
pub fn parse_review(citation: &str, text: &str) -> PaperMeta {
  let mut lines = text.split('\n').map(|line| line.trim_end_matches('\r'));
  let title = lines.next().unwrap_or_default().to_string();
  let second = lines.next().map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "));
  let authors = match second {
    // Older reviews name their own file here
    Some(line) if line.starts_with('{') && line.ends_with('}') => String::new(),
    Some(line) => line,
    None => String::new(),
  };

  PaperMeta {
    citation: citation.to_string(),
    title,
    authors,
    year: year_from_citation(citation).unwrap_or_default(),
    review: trim_header(text).trim().to_string(),
    ..PaperMeta::default()
  }
}

/// The first `<storage>/<citation>.<ext>` that exists, for each of [`PAPER_EXTENSIONS`].
pub fn find_paper(storage: &Path, citation: &str) -> Option<PathBuf> {
  PAPER_EXTENSIONS
    .iter()
    .map(|ext| storage.join(format!("{citation}.{ext}")))
    .find(|candidate| candidate.is_file())
}

/// Reads a review file and builds a record from it.
///
/// The file name is the citation key. The review date is the file's modification date and
/// the document path is set when a matching document is found in `storage`.
///
/// # Errors
///
/// - [`ShelfError::Io`] if the file cannot be read
/// - [`ShelfError::Ingest`] if the path has no file name to use as a key
pub fn import_review(path: impl AsRef<Path>, storage: &Path) -> Result<PaperMeta> {
  let path = path.as_ref();
  let citation = path
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .ok_or_else(|| ShelfError::Ingest(format!("{} has no file name", path.display())))?;

  let bytes = fs::read(path)?;
  let mut paper = parse_review(&citation, &String::from_utf8_lossy(&bytes));

  let modified: DateTime<Local> = fs::metadata(path)?.modified()?.into();
  paper.review_date = Some(modified.date_naive());

  if let Some(document) = find_paper(storage, &citation) {
    paper.paper_path = document.to_string_lossy().into_owned();
  }

  debug!("Imported review {} from {}", citation, path.display());
  Ok(paper)
}

#[cfg(test)]
mod tests {
  use super::*;

  const REVIEW: &str = "Time, Clocks, and the Ordering of Events\n  Leslie   Lamport \n\nLogical \
                        clocks.\n\nTotal order from partial order.\n";

  #[test]
  fn test_year_from_citation() {
    assert_eq!(year_from_citation("Knuth1974a").as_deref(), Some("1974"));
    assert_eq!(year_from_citation("Lee99").as_deref(), Some("1999"));
    assert_eq!(year_from_citation("Lee00").as_deref(), Some("2000"));
    assert_eq!(year_from_citation("Lee49").as_deref(), Some("2049"));
    assert_eq!(year_from_citation("2004").as_deref(), Some("2004"));
    assert_eq!(year_from_citation("V2Paper2015").as_deref(), Some("2015"));
    assert_eq!(year_from_citation(""), None);
  }

  #[test]
  fn test_trim_header() {
    assert_eq!(trim_header(REVIEW), "Logical clocks.\n\nTotal order from partial order.\n\n");
    assert_eq!(trim_header("single line"), "single line");
    assert_eq!(trim_header("\nbody"), "body\n");
    assert_eq!(trim_header("Title\n\nbody"), "body\n");
  }

  #[test]
  fn test_parse_review() {
    let paper = parse_review("Lamport1978", REVIEW);
    assert_eq!(paper.citation, "Lamport1978");
    assert_eq!(paper.title, "Time, Clocks, and the Ordering of Events");
    assert_eq!(paper.authors, "Leslie Lamport");
    assert_eq!(paper.year, "1978");
    assert_eq!(paper.review, "Logical clocks.\n\nTotal order from partial order.");
  }

  #[test]
  fn test_parse_legacy_header() {
    let paper = parse_review("Old", "A title\r\n{Old}\r\n\r\nText\r\n");
    assert_eq!(paper.title, "A title");
    assert_eq!(paper.authors, "");
    assert_eq!(paper.year, "");
    assert_eq!(paper.review, "Text");
  }

  #[traced_test]
  #[test]
  fn test_import_review_file() {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("papers");
    fs::create_dir_all(&storage).unwrap();
    fs::write(storage.join("Lamport1978.ps.gz"), b"gz").unwrap();
    fs::write(storage.join("Lamport1978.txt"), b"text").unwrap();
    let review = dir.path().join("Lamport1978");
    fs::write(&review, REVIEW).unwrap();

    let paper = import_review(&review, &storage).unwrap();
    assert_eq!(paper.citation, "Lamport1978");
    assert_eq!(paper.paper_path, storage.join("Lamport1978.ps.gz").to_string_lossy());
    assert!(paper.review_date.is_some());
  }

  #[test]
  fn test_import_missing_file() {
    let dir = tempdir().unwrap();
    let missing = import_review(dir.path().join("Nope2020"), dir.path());
    assert!(matches!(missing, Err(ShelfError::Io(_))));
  }
}
