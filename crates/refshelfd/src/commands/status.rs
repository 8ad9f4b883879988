//! Module for showing library statistics.

use chrono::Local;

use super::*;

/// Function for the [`Commands::Status`] in the CLI.
pub fn status<I: UserInteraction>(interaction: &I, config: Config) -> Result<()> {
  let library = open_library(config)?;
  let stats = library.stats(Local::now().date_naive());

  interaction.reply(ResponseContent::Info(&format!("Library {}", library.name())))?;
  interaction.reply(ResponseContent::Stats(&stats))
}
