//! Writer for library files.
//!
//! Only non-default content is written: empty strings, default enumerations and untouched
//! opinion blocks are omitted entirely. Presence-only flags (`reviewed`, `finished`,
//! `corrections`) are written as empty elements.

use std::io::Write;

use quick_xml::{
  events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
  Writer,
};

use super::*;
use crate::paper::{ReaderOpinion, ReviewerOpinion, ThesisKind, Venue};

/// Writes a library document to `sink`.
///
/// # Examples
///
/// ```
/// use refshelf::{paper::PaperMeta, serializer::write_to};
///
/// let mut out = Vec::new();
/// write_to(&mut out, "Demo", &[PaperMeta::with_citation("Knuth1974")]).unwrap();
/// let xml = String::from_utf8(out).unwrap();
/// assert!(xml.contains(r#"<bibliography version="1" name="Demo">"#));
/// assert!(xml.contains(r#"<record citation="Knuth1974">"#));
/// ```
pub fn write_to<W: Write>(sink: W, name: &str, records: &[PaperMeta]) -> Result<()> {
  let mut writer = Writer::new_with_indent(sink, b' ', 2);
  writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

  let version = FORMAT_VERSION.to_string();
  let root =
    BytesStart::new(ROOT_ELEMENT).with_attributes([("version", version.as_str()), ("name", name)]);
  writer.write_event(Event::Start(root))?;

  for record in records {
    write_record(&mut writer, record)?;
  }

  writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
  writer.into_inner().write_all(b"\n")?;
  Ok(())
}

/// Writes one `record` element.
fn write_record<W: Write>(writer: &mut Writer<W>, paper: &PaperMeta) -> Result<()> {
  let start =
    BytesStart::new(RECORD_ELEMENT).with_attributes([("citation", paper.citation.as_str())]);
  writer.write_event(Event::Start(start))?;

  text(writer, "paperPath", &paper.paper_path)?;
  text(writer, "review", &paper.review)?;
  if paper.venue != Venue::default() {
    text(writer, "venue", paper.venue.as_token())?;
  }
  text(writer, "authors", &paper.authors)?;
  text(writer, "title", &paper.title)?;
  text(writer, "publication", &paper.publication)?;
  text(writer, "volume", &paper.volume)?;
  text(writer, "issue", &paper.issue)?;
  text(writer, "month", &paper.month)?;
  text(writer, "year", &paper.year)?;
  text(writer, "dates", &paper.dates)?;
  text(writer, "pageStart", &paper.page_start)?;
  text(writer, "pageEnd", &paper.page_end)?;
  text(writer, "url", &paper.url)?;
  if paper.thesis != ThesisKind::default() {
    text(writer, "thesis", paper.thesis.as_token())?;
  }
  text(writer, "institution", &paper.institution)?;
  text(writer, "location", &paper.location)?;
  text(writer, "publisher", &paper.publisher)?;
  text(writer, "ISBN", &paper.isbn)?;
  text(writer, "DOI", &paper.doi)?;
  text(writer, "note", &paper.note)?;
  if let Some(date) = paper.review_date {
    text(writer, "reviewDate", &date.format(REVIEW_DATE_FORMAT).to_string())?;
  }
  text(writer, "tags", &paper.tags)?;
  flag(writer, "reviewed", paper.reviewed)?;

  write_reader(writer, &paper.reader)?;
  write_reviewer(writer, &paper.reviewer)?;

  writer.write_event(Event::End(BytesEnd::new(RECORD_ELEMENT)))?;
  Ok(())
}

/// Writes the `reader` block when it carries anything.
fn write_reader<W: Write>(writer: &mut Writer<W>, reader: &ReaderOpinion) -> Result<()> {
  if !reader.is_set() {
    return Ok(());
  }
  writer.write_event(Event::Start(BytesStart::new("reader")))?;
  flag(writer, "finished", reader.finished)?;
  text(writer, "understanding", &reader.understanding.to_string())?;
  text(writer, "rating", &reader.rating.to_string())?;
  writer.write_event(Event::End(BytesEnd::new("reader")))?;
  Ok(())
}

/// Writes the `reviewer` block when any of it differs from the defaults.
fn write_reviewer<W: Write>(writer: &mut Writer<W>, reviewer: &ReviewerOpinion) -> Result<()> {
  if !reviewer.is_set() {
    return Ok(());
  }
  writer.write_event(Event::Start(BytesStart::new("reviewer")))?;
  text(writer, "accept", reviewer.accept.as_token())?;
  let names = ["suitability", "correctness", "novelty", "clarity", "relevance"];
  for (name, score) in names.into_iter().zip(reviewer.scores()) {
    text(writer, name, &score.to_string())?;
  }
  flag(writer, "corrections", reviewer.corrections_required)?;
  text(writer, "authorComments", &reviewer.author_comments)?;
  text(writer, "editorComments", &reviewer.editor_comments)?;
  writer.write_event(Event::End(BytesEnd::new("reviewer")))?;
  Ok(())
}

/// Writes `<element>value</element>`, or nothing when `value` is empty.
fn text<W: Write>(writer: &mut Writer<W>, element: &str, value: &str) -> Result<()> {
  if value.is_empty() {
    return Ok(());
  }
  writer.write_event(Event::Start(BytesStart::new(element)))?;
  writer.write_event(Event::Text(BytesText::new(value)))?;
  writer.write_event(Event::End(BytesEnd::new(element)))?;
  Ok(())
}

/// Writes `<element/>` when `set`.
fn flag<W: Write>(writer: &mut Writer<W>, element: &str, set: bool) -> Result<()> {
  if set {
    writer.write_event(Event::Empty(BytesStart::new(element)))?;
  }
  Ok(())
}
