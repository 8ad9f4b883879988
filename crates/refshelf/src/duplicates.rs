//! Duplicate citation key detection.
//!
//! Libraries assembled by hand or merged from several files can contain the same key twice.
//! Loading accepts them; these functions report them afterwards so a person can resolve them.
//! Both only compare neighbours, so the records must already be sorted by citation key.

use super::*;

/// Keys that equal the key of the record before them.
///
/// Each extra occurrence is reported once, so a key stored three times appears twice.
///
/// ```
/// use refshelf::{duplicates::find_duplicate_keys, paper::PaperMeta};
///
/// let records: Vec<_> =
///   ["A2020", "A2020", "B2021"].into_iter().map(PaperMeta::with_citation).collect();
/// assert_eq!(find_duplicate_keys(&records), ["A2020"]);
/// ```
pub fn find_duplicate_keys(sorted: &[PaperMeta]) -> Vec<String> {
  find_duplicate_pairs(sorted)
    .into_iter()
    .map(|(_, current)| sorted[current].citation.clone())
    .collect()
}

/// Index pairs `(previous, current)` of neighbouring records that share a key.
///
/// Useful for reporting how the two records differ, e.g. when they point at different
/// documents.
pub fn find_duplicate_pairs(sorted: &[PaperMeta]) -> Vec<(usize, usize)> {
  let pairs: Vec<_> = sorted
    .windows(2)
    .enumerate()
    .filter(|(_, pair)| pair[0].citation == pair[1].citation)
    .map(|(i, _)| (i, i + 1))
    .collect();
  if !pairs.is_empty() {
    debug!("Found {} duplicate citation keys", pairs.len());
  }
  pairs
}
