//! Streaming reader for library files.
//!
//! The document is read in a single forward pass over `quick-xml` events. A stack of open
//! elements tells the reader where it is; anything it does not recognise (at any depth) is
//! skipped along with its children, which is what lets newer files open in older builds.
//!
//! Values that cannot be interpreted are not errors: an unknown enumeration token keeps the
//! default, a non-numeric score reads as `0` and an unreadable date reads as unset. Each of
//! these logs a warning.

use std::io::BufRead;

use quick_xml::{
  events::{BytesStart, Event},
  Reader,
};

use super::*;
use crate::paper::{Acceptance, ThesisKind};

/// Where an open element sits in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
  /// The `bibliography` root
  Root,
  /// A `record` element
  Record,
  /// The `reader` block of a record
  ReaderBlock,
  /// The `reviewer` block of a record
  ReviewerBlock,
  /// A value element whose text is being collected
  Leaf,
  /// An element (or a descendant of one) that is not understood
  Skipped,
}

/// Value elements allowed directly inside a `record`.
const RECORD_LEAVES: &[&str] = &[
  "paperPath",
  "review",
  "venue",
  "authors",
  "title",
  "publication",
  "volume",
  "issue",
  "month",
  "year",
  "dates",
  "pageStart",
  "pageEnd",
  "url",
  "thesis",
  "institution",
  "location",
  "publisher",
  "ISBN",
  "DOI",
  "note",
  "reviewDate",
  "tags",
  "reviewed",
];

/// Value elements allowed inside a `reader` block.
const READER_LEAVES: &[&str] = &["finished", "understanding", "rating"];

/// Value elements allowed inside a `reviewer` block.
const REVIEWER_LEAVES: &[&str] = &[
  "accept",
  "suitability",
  "correctness",
  "novelty",
  "clarity",
  "relevance",
  "corrections",
  "authorComments",
  "editorComments",
];

/// Parser state for one document.
#[derive(Default)]
struct LibraryReader {
  /// Open elements, innermost last
  stack:     Vec<(Scope, String)>,
  /// Library name from the root element
  name:      String,
  /// Whether the root element has been opened
  seen_root: bool,
  /// Completed records
  records:   Vec<PaperMeta>,
  /// The record currently open
  current:   Option<PaperMeta>,
  /// Text of the value element currently open
  text:      String,
}

/// Reads a library from any buffered source.
///
/// Returns the library name and its records in file order.
///
/// # Errors
///
/// Fails on XML syntax errors, on a document without a `bibliography` root and on a document
/// that ends before all elements are closed. No records are returned on failure.
///
/// # Examples
///
/// ```
/// use refshelf::serializer::read_from;
///
/// let xml = r#"<bibliography version="1" name="Demo">
///   <record citation="Knuth1974"><year>1974</year><futureField>ignored</futureField></record>
/// </bibliography>"#;
/// let (name, records) = read_from(xml.as_bytes()).unwrap();
/// assert_eq!(name, "Demo");
/// assert_eq!(records[0].citation, "Knuth1974");
/// assert_eq!(records[0].year, "1974");
/// ```
pub fn read_from<R: BufRead>(source: R) -> Result<(String, Vec<PaperMeta>)> {
  let mut reader = Reader::from_reader(source);
  let mut state = LibraryReader::default();
  let mut buf = Vec::new();

  loop {
    match reader.read_event_into(&mut buf)? {
      Event::Start(e) => state.open(&e)?,
      Event::Empty(e) => {
        state.open(&e)?;
        state.close();
      },
      Event::Text(t) => {
        if state.collecting() {
          let text = t.unescape()?;
          state.text.push_str(&text);
        }
      },
      Event::CData(c) => {
        if state.collecting() {
          state.text.push_str(&String::from_utf8_lossy(&c));
        }
      },
      Event::End(_) => state.close(),
      Event::Eof => break,
      _ => (),
    }
    buf.clear();
  }

  state.finish()
}

impl LibraryReader {
  /// Whether text events belong to a value element.
  fn collecting(&self) -> bool { matches!(self.stack.last(), Some((Scope::Leaf, _))) }

  /// Handles an opening tag.
  fn open(&mut self, e: &BytesStart) -> Result<()> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let parent = self.stack.last().map(|(scope, _)| *scope);

    let scope = match parent {
      None if name == ROOT_ELEMENT => {
        if self.seen_root {
          return Err(ShelfError::Malformed("more than one bibliography root".into()));
        }
        self.seen_root = true;
        self.read_root_attributes(e)?;
        Scope::Root
      },
      None => {
        return Err(ShelfError::Malformed(format!(
          "expected a {ROOT_ELEMENT} root element, found <{name}>"
        )))
      },
      Some(Scope::Root) if name == RECORD_ELEMENT => {
        let citation = match e.try_get_attribute("citation")? {
          Some(attr) => attr.unescape_value()?.into_owned(),
          None => {
            warn!("Record #{} has no citation attribute", self.records.len() + 1);
            String::new()
          },
        };
        // An absent year element must read back as blank, not as the unset marker
        self.current = Some(PaperMeta { citation, year: String::new(), ..PaperMeta::default() });
        Scope::Record
      },
      Some(Scope::Record) if name == "reader" => Scope::ReaderBlock,
      Some(Scope::Record) if name == "reviewer" => Scope::ReviewerBlock,
      Some(Scope::Record) if RECORD_LEAVES.contains(&name.as_str()) => Scope::Leaf,
      Some(Scope::ReaderBlock) if READER_LEAVES.contains(&name.as_str()) => Scope::Leaf,
      Some(Scope::ReviewerBlock) if REVIEWER_LEAVES.contains(&name.as_str()) => Scope::Leaf,
      Some(Scope::Leaf | Scope::Skipped) => Scope::Skipped,
      Some(_) => {
        trace!("Skipping unknown element <{}>", name);
        Scope::Skipped
      },
    };

    if scope == Scope::Leaf {
      self.text.clear();
    }
    self.stack.push((scope, name));
    Ok(())
  }

  /// Handles a closing tag. Mismatched tags are rejected by `quick-xml` before this point.
  fn close(&mut self) {
    let Some((scope, name)) = self.stack.pop() else { return };
    let parent = self.stack.last().map(|(scope, _)| *scope);

    match scope {
      Scope::Leaf => {
        let text = std::mem::take(&mut self.text);
        if let (Some(record), Some(parent)) = (self.current.as_mut(), parent) {
          assign(record, parent, &name, text);
        }
      },
      Scope::Record => {
        if let Some(record) = self.current.take() {
          self.records.push(record);
        }
      },
      _ => (),
    }
  }

  /// Reads `version` and `name` from the root element.
  fn read_root_attributes(&mut self, e: &BytesStart) -> Result<()> {
    if let Some(attr) = e.try_get_attribute("name")? {
      self.name = attr.unescape_value()?.into_owned();
    }

    match e.try_get_attribute("version")? {
      Some(attr) => {
        let version = attr.unescape_value()?;
        match version.trim().parse::<u32>() {
          Ok(v) if v > FORMAT_VERSION => warn!(
            "Library format version {} is newer than {}, reading what is understood",
            v, FORMAT_VERSION
          ),
          Ok(_) => (),
          Err(_) => warn!("Unreadable library format version {:?}", version),
        }
      },
      None => warn!("Library file does not declare a format version"),
    }
    Ok(())
  }

  /// Returns the parsed library once the whole document has been consumed.
  fn finish(self) -> Result<(String, Vec<PaperMeta>)> {
    if let Some((_, open)) = self.stack.last() {
      return Err(ShelfError::Malformed(format!("file ends inside <{open}>")));
    }
    if !self.seen_root {
      return Err(ShelfError::Malformed(format!("no {ROOT_ELEMENT} root element")));
    }
    Ok((self.name, self.records))
  }
}

/// Stores the text of a value element on the record it belongs to.
fn assign(record: &mut PaperMeta, parent: Scope, element: &str, text: String) {
  match (parent, element) {
    (Scope::Record, "paperPath") => record.paper_path = text,
    (Scope::Record, "review") => record.review = text,
    (Scope::Record, "venue") => record.venue = token(element, &text, record.venue),
    (Scope::Record, "authors") => record.authors = text,
    (Scope::Record, "title") => record.title = text,
    (Scope::Record, "publication") => record.publication = text,
    (Scope::Record, "volume") => record.volume = text,
    (Scope::Record, "issue") => record.issue = text,
    (Scope::Record, "month") => record.month = text,
    (Scope::Record, "year") => record.year = text,
    (Scope::Record, "dates") => record.dates = text,
    (Scope::Record, "pageStart") => record.page_start = text,
    (Scope::Record, "pageEnd") => record.page_end = text,
    (Scope::Record, "url") => record.url = text,
    (Scope::Record, "thesis") => record.thesis = token::<ThesisKind>(element, &text, record.thesis),
    (Scope::Record, "institution") => record.institution = text,
    (Scope::Record, "location") => record.location = text,
    (Scope::Record, "publisher") => record.publisher = text,
    (Scope::Record, "ISBN") => record.isbn = text,
    (Scope::Record, "DOI") => record.doi = text,
    (Scope::Record, "note") => record.note = text,
    (Scope::Record, "reviewDate") => record.review_date = review_date(&text),
    (Scope::Record, "tags") => record.tags = text,
    (Scope::Record, "reviewed") => record.reviewed = true,

    (Scope::ReaderBlock, "finished") => record.reader.finished = true,
    (Scope::ReaderBlock, "understanding") => record.reader.understanding = score(element, &text),
    (Scope::ReaderBlock, "rating") => record.reader.rating = score(element, &text),

    (Scope::ReviewerBlock, "accept") => {
      record.reviewer.accept = token::<Acceptance>(element, &text, record.reviewer.accept)
    },
    (Scope::ReviewerBlock, "suitability") => record.reviewer.suitability = score(element, &text),
    (Scope::ReviewerBlock, "correctness") => record.reviewer.correctness = score(element, &text),
    (Scope::ReviewerBlock, "novelty") => record.reviewer.novelty = score(element, &text),
    (Scope::ReviewerBlock, "clarity") => record.reviewer.clarity = score(element, &text),
    (Scope::ReviewerBlock, "relevance") => record.reviewer.relevance = score(element, &text),
    (Scope::ReviewerBlock, "corrections") => record.reviewer.corrections_required = true,
    (Scope::ReviewerBlock, "authorComments") => record.reviewer.author_comments = text,
    (Scope::ReviewerBlock, "editorComments") => record.reviewer.editor_comments = text,

    _ => trace!("Ignoring <{}> in {:?}", element, parent),
  }
}

/// Parses an enumeration token, keeping `current` when the token is unknown.
fn token<T: FromStr<Err = ShelfError>>(element: &str, text: &str, current: T) -> T {
  match text.trim().parse() {
    Ok(value) => value,
    Err(_) => {
      warn!("Unknown <{}> token {:?}, keeping the default", element, text);
      current
    },
  }
}

/// Parses a score, reading anything non-numeric as 0.
fn score(element: &str, text: &str) -> u8 {
  text.trim().parse().unwrap_or_else(|_| {
    warn!("Non-numeric <{}> value {:?}, reading as 0", element, text);
    0
  })
}

/// Parses a review date in either the written form or ISO `YYYY-MM-DD`.
fn review_date(text: &str) -> Option<NaiveDate> {
  let text = text.trim();
  if text.is_empty() {
    return None;
  }
  let parsed = NaiveDate::parse_from_str(text, "%a %b %d %Y")
    .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
    .ok();
  if parsed.is_none() {
    warn!("Unreadable review date {:?}, leaving it unset", text);
  }
  parsed
}
