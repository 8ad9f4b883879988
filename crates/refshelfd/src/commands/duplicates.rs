//! Module for reporting citation keys that are used more than once.

use super::*;

/// Function for the [`Commands::Duplicates`] in the CLI.
pub fn duplicates<I: UserInteraction>(interaction: &I, config: Config) -> Result<()> {
  let library = open_library(config)?;

  let keys = library.duplicate_keys();
  if keys.is_empty() {
    return interaction.reply(ResponseContent::Success("No duplicate citation keys"));
  }

  interaction.reply(ResponseContent::Warning(&format!(
    "{} duplicate citation keys",
    keys.len()
  )))?;
  let papers: Vec<&PaperMeta> =
    library.records().iter().filter(|paper| keys.contains(&paper.citation)).collect();
  interaction.reply(ResponseContent::Papers(&papers))
}
