//! Tag filtering.
//!
//! Tags are short user-curated tokens stored in one comma separated field. Comparison is
//! exact: `ML` and `ml` are different tags and surrounding spaces are part of the tag.
//!
//! ```
//! use refshelf::tags::{matches, split_tags, TagMode};
//!
//! let record = split_tags("ml,vision");
//! let query = split_tags("ml,nlp");
//! assert!(!matches(&record, &query, TagMode::And));
//! assert!(matches(&record, &query, TagMode::Or));
//! ```

use std::collections::BTreeSet;

use super::*;

/// How the tags of a query combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagMode {
  /// Every query tag must be present
  #[default]
  And,
  /// At least one query tag must be present
  Or,
}

/// Splits a comma separated tag field into a set, dropping empty segments.
pub fn split_tags(field: &str) -> BTreeSet<&str> {
  field.split(',').filter(|tag| !tag.is_empty()).collect()
}

/// Whether a record carrying `record_tags` passes a query for `query_tags`.
///
/// An empty query matches everything.
pub fn matches(record_tags: &BTreeSet<&str>, query_tags: &BTreeSet<&str>, mode: TagMode) -> bool {
  if query_tags.is_empty() {
    return true;
  }
  match mode {
    TagMode::And => query_tags.is_subset(record_tags),
    TagMode::Or => !query_tags.is_disjoint(record_tags),
  }
}

/// A tag query bound to a mode, applied to whole records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
  /// Tags to look for
  pub tags: BTreeSet<String>,
  /// How the tags combine
  pub mode: TagMode,
}

impl TagFilter {
  /// Builds a filter from a comma separated query.
  pub fn new(query: &str, mode: TagMode) -> Self {
    Self { tags: split_tags(query).into_iter().map(str::to_string).collect(), mode }
  }

  /// Whether the filter has no tags and so matches everything.
  pub fn is_empty(&self) -> bool { self.tags.is_empty() }

  /// Whether `paper` passes the filter.
  pub fn matches(&self, paper: &PaperMeta) -> bool {
    let query = self.tags.iter().map(String::as_str).collect();
    matches(&paper.tag_set(), &query, self.mode)
  }

  /// The records of `records` that pass the filter, in order.
  pub fn apply<'a>(&'a self, records: &'a [PaperMeta]) -> impl Iterator<Item = &'a PaperMeta> + 'a {
    records.iter().filter(move |paper| self.matches(paper))
  }
}

/// Every distinct tag used in `records`, sorted.
pub fn tag_catalogue(records: &[PaperMeta]) -> Vec<String> {
  let tags: BTreeSet<&str> = records.iter().flat_map(|paper| paper.tag_set()).collect();
  trace!("Found {} distinct tags across {} records", tags.len(), records.len());
  tags.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tagged(citation: &str, tags: &str) -> PaperMeta {
    let mut paper = PaperMeta::with_citation(citation);
    paper.tags = tags.into();
    paper
  }

  #[test]
  fn test_split_drops_empty_segments_only() {
    let tags = split_tags("ml,,nlp, vision,");
    assert_eq!(tags.into_iter().collect::<Vec<_>>(), [" vision", "ml", "nlp"]);
    assert!(split_tags("").is_empty());
  }

  #[test]
  fn test_modes() {
    let record = split_tags("ml");
    let query = split_tags("ml,nlp");
    assert!(!matches(&record, &query, TagMode::And));
    assert!(matches(&record, &query, TagMode::Or));
    assert!(matches(&split_tags("nlp,ml,cv"), &query, TagMode::And));
    assert!(!matches(&split_tags("cv"), &query, TagMode::Or));
  }

  #[test]
  fn test_empty_query_matches_everything() {
    let empty = BTreeSet::new();
    assert!(matches(&BTreeSet::new(), &empty, TagMode::And));
    assert!(matches(&split_tags("ml"), &empty, TagMode::Or));
  }

  #[test]
  fn test_comparison_is_exact() {
    let query = split_tags("ML");
    assert!(!matches(&split_tags("ml"), &query, TagMode::Or));
    assert!(!matches(&split_tags(" ML"), &query, TagMode::Or));
  }

  #[test]
  fn test_filter_and_catalogue() {
    let records = vec![
      tagged("A2020", "ml,nlp"),
      tagged("B2021", "ml"),
      tagged("C2022", ""),
      tagged("D2023", "nlp,speech"),
    ];

    let filter = TagFilter::new("ml,nlp", TagMode::And);
    let hits: Vec<_> = filter.apply(&records).map(|p| p.citation.as_str()).collect();
    assert_eq!(hits, ["A2020"]);

    let filter = TagFilter::new("speech,ml", TagMode::Or);
    let hits: Vec<_> = filter.apply(&records).map(|p| p.citation.as_str()).collect();
    assert_eq!(hits, ["A2020", "B2021", "D2023"]);

    assert_eq!(TagFilter::default().apply(&records).count(), 4);
    assert_eq!(tag_catalogue(&records), ["ml", "nlp", "speech"]);
  }
}
