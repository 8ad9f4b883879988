//! Configuration injected into a [`Library`](crate::library::Library) at construction.
//!
//! Nothing in the core reads global state: where the library file lives, where ingested
//! documents are stored and the citation key limits all come from a [`Config`] value the
//! caller owns. A `Config` can be persisted as TOML:
//!
//! ```toml
//! library_path = "/home/ada/.local/share/refshelf/library.rodb"
//! storage_path = "/home/ada/Documents/refshelf/papers"
//!
//! [citation]
//! max_authors = 5
//! max_chars = 32
//! ```
//!
//! Missing keys fall back to their defaults, so a partial file is valid.

use std::fs;

use super::*;
use crate::citation::CitationLimits;

/// Name of the directory created under the platform data, config and document directories.
const APP_DIR: &str = "refshelf";

/// Settings for a library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Library file opened by [`Library::open`](crate::library::Library::open)
  pub library_path: PathBuf,
  /// Directory that ingested documents are moved into
  pub storage_path: PathBuf,
  /// Limits applied when generating citation keys
  pub citation:     CitationLimits,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      library_path: Self::default_library_path(),
      storage_path: Self::default_storage_path(),
      citation:     CitationLimits::default(),
    }
  }
}

impl Config {
  /// Default location of the library file.
  ///
  /// - On Unix: `~/.local/share/refshelf/library.rodb`
  /// - On macOS: `~/Library/Application Support/refshelf/library.rodb`
  /// - On Windows: `%APPDATA%\refshelf\library.rodb`
  /// - Fallback: `./refshelf/library.rodb`
  pub fn default_library_path() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR).join("library.rodb")
  }

  /// Default directory for ingested documents, `~/Documents/refshelf/papers` on most
  /// platforms.
  pub fn default_storage_path() -> PathBuf {
    dirs::document_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR).join("papers")
  }

  /// Default location of the configuration file itself.
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR).join("config.toml")
  }

  /// Builder method pointing the configuration at another library file.
  pub fn with_library_path(mut self, path: impl AsRef<Path>) -> Self {
    self.library_path = path.as_ref().to_path_buf();
    self
  }

  /// Builder method pointing the configuration at another storage directory.
  pub fn with_storage_path(mut self, path: impl AsRef<Path>) -> Self {
    self.storage_path = path.as_ref().to_path_buf();
    self
  }

  /// Reads a configuration from a TOML file.
  ///
  /// # Errors
  ///
  /// - [`ShelfError::Io`] if the file cannot be read
  /// - [`ShelfError::TomlDe`] if it is not valid TOML for this structure
  /// - [`ShelfError::Config`] if a citation limit is zero
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = fs::read_to_string(path)?;
    let config: Self = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
  }

  /// Like [`Config::load`], but a missing file yields the defaults.
  pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if path.exists() {
      Self::load(path)
    } else {
      debug!("No configuration at {}, using defaults", path.display());
      Ok(Self::default())
    }
  }

  /// Writes the configuration as TOML, creating parent directories as needed.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(self)?)?;
    debug!("Saved configuration to {}", path.display());
    Ok(())
  }

  /// Checks values that deserialize fine but cannot be used.
  fn validate(&self) -> Result<()> {
    if self.citation.max_authors == 0 {
      return Err(ShelfError::Config("citation.max_authors must be at least 1".into()));
    }
    if self.citation.max_chars == 0 {
      return Err(ShelfError::Config("citation.max_chars must be at least 1".into()));
    }
    Ok(())
  }
}
