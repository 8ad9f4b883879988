//! Module for importing plain-text reviews.
//!
//! Every file becomes a new record named after the file. A file that cannot be read is
//! reported and skipped; the other files are still imported.

use super::*;

/// Function for the [`Commands::Import`] in the CLI.
pub fn import<I: UserInteraction>(
  interaction: &I,
  config: Config,
  options: ImportOptions,
) -> Result<()> {
  let mut library = open_library(config)?;

  let mut imported = 0;
  for file in &options.files {
    match library.import_review(file) {
      Ok(citation) => {
        imported += 1;
        if library.duplicate_keys().contains(&citation) {
          interaction.reply(ResponseContent::Warning(&format!(
            "{} is now a duplicate citation key",
            citation
          )))?;
        } else {
          interaction.reply(ResponseContent::Info(&format!("Imported {}", citation)))?;
        }
      },
      Err(e) => {
        interaction.reply(ResponseContent::Warning(&format!(
          "Skipped {}: {}",
          file.display(),
          e
        )))?;
      },
    }
  }

  if imported > 0 {
    library.save_default()?;
  }
  interaction.reply(ResponseContent::Success(&format!(
    "Imported {} of {} reviews",
    imported,
    options.files.len()
  )))
}
