//! Module for searching the library.
//!
//! The scan runs on a worker thread and hits are printed in library order as they arrive.
//! Author, year and keyword criteria are combined: a paper must satisfy every criterion that
//! was given. Keywords are matched against both titles and reviews unless `--title` or
//! `--body` narrows them.

use super::*;

/// Function for the [`Commands::Search`] in the CLI.
pub async fn search<I: UserInteraction>(
  interaction: &I,
  config: Config,
  options: SearchOptions,
) -> Result<()> {
  let library = open_library(config)?;
  let criteria = criteria_from(&options)?;
  debug!("Searching {} records with {:?}", library.len(), criteria);

  let mut handle = library.spawn_search(&criteria);
  let mut hits = Vec::new();
  while let Some(hit) = handle.recv().await {
    trace!("Hit {}", hit.citation);
    hits.push(hit);
  }

  if hits.is_empty() {
    return interaction.reply(ResponseContent::Info("No papers found"));
  }
  interaction.reply(ResponseContent::Info(&format!("Found {} papers", hits.len())))?;
  interaction.reply(ResponseContent::Hits(&hits))
}

/// Turns the command line options into search criteria.
fn criteria_from(options: &SearchOptions) -> Result<SearchCriteria> {
  let mut criteria = SearchCriteria::default();

  if let Some(path) = &options.paper_path {
    return Ok(criteria.with_paper_path(path.as_str()));
  }
  if let Some(authors) = &options.authors {
    criteria = criteria.with_authors(authors.as_str());
  }
  if let Some(years) = &options.years {
    let [start, end] = years.as_slice() else {
      return Err(RefshelfdError::Input("--years takes exactly two years".into()));
    };
    if start > end {
      return Err(RefshelfdError::Input(format!("year range {}-{} is empty", start, end)));
    }
    criteria = criteria.with_years(*start, *end);
  }
  if let Some(text) = &options.keywords {
    let keywords = match (options.title, options.body) {
      (true, false) => KeywordQuery::title(text.as_str()),
      (false, true) => KeywordQuery::body(text.as_str()),
      _ => KeywordQuery::anywhere(text.as_str()),
    };
    criteria = criteria.with_keywords(keywords);
  }
  Ok(criteria)
}
