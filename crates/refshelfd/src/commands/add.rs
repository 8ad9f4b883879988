//! Module for adding papers to, and updating papers in, the library.
//!
//! An existing citation key selects the record to update; only the fields given on the
//! command line change. Without a citation key a new record is created and a key is
//! generated from its authors and year. A new record for a document with nothing else known
//! about it starts as a placeholder titled after the file.

use refshelf::paper::UNSET_YEAR;

use super::*;

/// Function for the [`Commands::Add`] in the CLI.
pub fn add<I: UserInteraction>(interaction: &I, config: Config, options: AddOptions) -> Result<()> {
  let mut library = open_library(config)?;

  let existing = options.citation.as_deref().and_then(|citation| library.get(citation)).cloned();
  let mut session = match (existing, &options.paper) {
    (Some(paper), _) => EditSession::new(paper),
    (None, Some(path)) => EditSession::for_unread(path),
    (None, None) => EditSession::new(PaperMeta::default()),
  }
  .with_ingest(options.ingest);

  apply_options(&mut session.paper, &options);

  if session.paper.citation.is_empty() {
    if session.paper.authors.trim().is_empty() {
      session.paper.authors = interaction.prompt("Authors")?;
    }
    let year = if session.paper.year.is_empty() { UNSET_YEAR } else { session.paper.year.as_str() };
    session.paper.citation =
      library.generate_citation(&session.paper.authors, year).ok_or_else(|| {
        RefshelfdError::Input(
          "no free citation key could be derived; give --citation or at least one author".into(),
        )
      })?;
    trace!("Generated citation key {}", session.paper.citation);
  }

  let citation = session.paper.citation.clone();
  let placeholder = session.pseudo && options.title.is_none();
  let outcome = library.commit(session)?;
  library.save_default()?;

  let message = match outcome {
    Upsert::Inserted => format!("Added {}", citation),
    Upsert::Updated => format!("Updated {}", citation),
  };
  interaction.reply(ResponseContent::Success(&message))?;
  if let Some(paper) = library.get(&citation) {
    interaction.reply(ResponseContent::Paper(paper))?;
  }
  if placeholder {
    interaction.reply(ResponseContent::Info(&format!(
      "{} is a placeholder titled after its document; fill it in with `add --citation {}`",
      citation, citation
    )))?;
  }
  Ok(())
}

/// Copies every field given on the command line into `paper`.
fn apply_options(paper: &mut PaperMeta, options: &AddOptions) {
  let text_fields = [
    (&mut paper.citation, &options.citation),
    (&mut paper.authors, &options.authors),
    (&mut paper.title, &options.title),
    (&mut paper.year, &options.year),
    (&mut paper.publication, &options.publication),
    (&mut paper.doi, &options.doi),
    (&mut paper.tags, &options.tags),
    (&mut paper.review, &options.review),
  ];
  for (field, value) in text_fields {
    if let Some(value) = value {
      *field = value.clone();
    }
  }

  if let Some(venue) = options.venue {
    paper.venue = venue;
  }
  if let Some(path) = &options.paper {
    paper.paper_path = path.to_string_lossy().into_owned();
  }
  if options.finished {
    paper.reader.finished = true;
  }
}
