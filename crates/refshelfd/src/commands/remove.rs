//! Module for removing papers from the library.
//!
//! Only the record is removed; a document in storage stays on disk.

use super::*;

/// Function for the [`Commands::Remove`] in the CLI.
pub fn remove<I: UserInteraction>(
  interaction: &I,
  config: Config,
  options: RemoveOptions,
) -> Result<()> {
  let mut library = open_library(config)?;

  let Some(index) = library.position(&options.citation) else {
    return interaction.reply(ResponseContent::Info(&format!(
      "No paper with citation {}",
      options.citation
    )));
  };

  interaction.reply(ResponseContent::Paper(&library.records()[index]))?;
  if !interaction.confirm("Remove this paper?")? {
    return interaction.reply(ResponseContent::Info("Nothing removed"));
  }

  let paper = library.remove(index)?;
  library.save_default()?;
  interaction.reply(ResponseContent::Success(&format!("Removed {}", paper.citation)))
}
