//! Module for starting a new library.

use super::*;

/// Function for the [`Commands::New`] in the CLI.
///
/// Asks before replacing a library file that already exists.
pub fn new<I: UserInteraction>(interaction: &I, config: Config, options: NewOptions) -> Result<()> {
  let path = config.library_path.clone();
  if path.exists() {
    let message = format!("Replace the library at {}?", path.display());
    if !interaction.confirm(&message)? {
      return interaction.reply(ResponseContent::Info("Library left unchanged"));
    }
    debug!("Replacing library at {}", path.display());
  }

  let library = Library::new(config, options.name);
  library.save_default()?;
  interaction.reply(ResponseContent::Success(&format!(
    "Created library {:?} at {}",
    library.name(),
    path.display()
  )))
}
