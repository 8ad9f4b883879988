//! Module for listing papers, optionally filtered by tags.

use super::*;

/// Function for the [`Commands::List`] in the CLI.
///
/// By default a paper must carry every requested tag; `--any` shows papers carrying at least
/// one of them.
pub fn list<I: UserInteraction>(
  interaction: &I,
  config: Config,
  options: ListOptions,
) -> Result<()> {
  let library = open_library(config)?;

  let mode = if options.any { TagMode::Or } else { TagMode::And };
  let filter = TagFilter::new(options.tags.as_deref().unwrap_or_default(), mode);
  let papers: Vec<&PaperMeta> = library.filter_tags(&filter).collect();

  if papers.is_empty() {
    return interaction.reply(ResponseContent::Info("No papers found"));
  }
  interaction.reply(ResponseContent::Info(&format!(
    "{}: {} of {} papers",
    library.name(),
    papers.len(),
    library.len()
  )))?;
  interaction.reply(ResponseContent::Papers(&papers))
}
