//! Citation key derivation.
//!
//! A citation key is built from the authors' surnames and the year, falling back to shorter
//! forms when the author list is long:
//!
//! | authors                       | key                   |
//! |-------------------------------|-----------------------|
//! | `Ada Lovelace and C. Babbage` | `LovelaceBabbage1843` |
//! | more than `max_authors` names | `LovelaceEtAl1843`    |
//! | `...EtAl...` already taken    | `LB1843`              |
//!
//! Whatever form is chosen, a letter suffix (`a`..`z`, then `_a`..`_z`, ...) is appended
//! until the key is free. Generation is deterministic: the only input besides the authors and
//! year is the `exists` predicate.
//!
//! ```
//! use refshelf::citation::{generate, CitationLimits};
//!
//! let taken = ["TuringChurch1936"];
//! let key = generate(
//!   "Alan Turing and Alonzo Church",
//!   "1936",
//!   |k| taken.contains(&k),
//!   CitationLimits::default(),
//! );
//! assert_eq!(key.as_deref(), Some("TuringChurch1936a"));
//! ```

use super::*;

lazy_static! {
  /// Matches the word "and" joining the last two names of an author list.
  static ref AND_SEPARATOR: Regex = Regex::new(r"(?i)\s+and\s+").unwrap();
}

/// Underscores appended to a base key before key generation gives up.
pub const MAX_UNDERSCORES: usize = 8;

/// Bounds on the primary (all surnames) form of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitationLimits {
  /// Above this many authors the `EtAl` form is used
  pub max_authors: usize,
  /// Above this many characters the `EtAl` form is used
  pub max_chars:   usize,
}

impl Default for CitationLimits {
  fn default() -> Self { Self { max_authors: 5, max_chars: 32 } }
}

/// Extracts the surname of every author in a delimited author string.
///
/// Names are separated by commas or by the word "and"; hyphens are dropped and the last
/// whitespace-separated word of each name is taken as its surname.
///
/// ```
/// use refshelf::citation::surnames;
///
/// assert_eq!(surnames("Jean-Paul Sartre, Simone de Beauvoir AND Albert Camus"), [
///   "Sartre", "Beauvoir", "Camus"
/// ]);
/// assert!(surnames(" , ,").is_empty());
/// ```
pub fn surnames(authors: &str) -> Vec<String> {
  let normalized = AND_SEPARATOR.replace_all(authors, ", ").replace('-', "");
  normalized
    .split(',')
    .filter_map(|name| name.split_whitespace().last())
    .map(str::to_string)
    .collect()
}

/// Derives a citation key that `exists` does not report as taken.
///
/// Returns `None` when `authors` contains no names, or when `exists` rejects every candidate
/// up to [`MAX_UNDERSCORES`] underscores; the caller keeps whatever key it had. The year is
/// appended as given, without normalization.
pub fn generate(
  authors: &str,
  year: &str,
  exists: impl Fn(&str) -> bool,
  limits: CitationLimits,
) -> Option<String> {
  let names = surnames(authors);
  let first = names.first()?;

  let mut key = if names.len() <= limits.max_authors {
    format!("{}{}", names.concat(), year)
  } else {
    String::new()
  };

  if names.len() > limits.max_authors || key.chars().count() > limits.max_chars {
    key = format!("{first}EtAl{year}");
    if exists(&key) {
      let acronym: String = names.iter().filter_map(|name| name.chars().next()).collect();
      key = format!("{acronym}{year}");
    }
  }
  trace!("Citation key candidate for {:?}: {}", authors, key);

  disambiguate(key, exists)
}

/// Appends `a`..`z` to `base` until the result is free, adding an underscore to the base
/// each time the alphabet runs out. Gives up after [`MAX_UNDERSCORES`] underscores.
fn disambiguate(mut base: String, exists: impl Fn(&str) -> bool) -> Option<String> {
  if !exists(&base) {
    return Some(base);
  }
  for _ in 0..=MAX_UNDERSCORES {
    for suffix in 'a'..='z' {
      let candidate = format!("{base}{suffix}");
      if !exists(&candidate) {
        debug!("Disambiguated citation key {} as {}", base, candidate);
        return Some(candidate);
      }
    }
    base.push('_');
  }
  warn!("No free citation key left for {}", base.trim_end_matches('_'));
  None
}
