//! Module for listing the tags used in the library.

use super::*;

/// Function for the [`Commands::Tags`] in the CLI.
pub fn tags<I: UserInteraction>(interaction: &I, config: Config) -> Result<()> {
  let library = open_library(config)?;

  let tags = library.tags();
  if tags.is_empty() {
    return interaction.reply(ResponseContent::Info("No tags in use"));
  }
  interaction.reply(ResponseContent::Info(&tags.join(", ")))
}
