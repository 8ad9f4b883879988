//! Search criteria and how they are matched against records.

use regex::RegexBuilder;

use super::*;

/// Free-text keyword query over a record's title and review.
///
/// Terms are separated by whitespace or commas; a double-quoted phrase is one term. A record
/// matches when ANY term appears as a whole word in any enabled field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordQuery {
  /// The raw query, e.g. `neural "deep learning"`
  pub text:        String,
  /// Look in the title
  pub match_title: bool,
  /// Look in the review text
  pub match_body:  bool,
}

impl KeywordQuery {
  /// Query matched against titles only.
  pub fn title(text: impl Into<String>) -> Self {
    Self { text: text.into(), match_title: true, match_body: false }
  }

  /// Query matched against review text only.
  pub fn body(text: impl Into<String>) -> Self {
    Self { text: text.into(), match_title: false, match_body: true }
  }

  /// Query matched against both titles and review text.
  pub fn anywhere(text: impl Into<String>) -> Self {
    Self { text: text.into(), match_title: true, match_body: true }
  }

  /// The individual terms of the query, quoted phrases first.
  ///
  /// ```
  /// use refshelf::search::KeywordQuery;
  ///
  /// let query = KeywordQuery::title(r#"neural, "deep learning" nets"#);
  /// assert_eq!(query.terms(), ["deep learning", "neural", "nets"]);
  /// ```
  pub fn terms(&self) -> Vec<String> { split_terms(&self.text) }

  /// Whether the query looks at any field at all.
  fn is_active(&self) -> bool { self.match_title || self.match_body }
}

/// Independently enabled filters combined with AND.
///
/// ```
/// use refshelf::search::{KeywordQuery, SearchCriteria};
///
/// let criteria = SearchCriteria::default()
///   .with_authors("Smith, Jones")
///   .with_years(2000, 2010)
///   .with_keywords(KeywordQuery::anywhere("consensus"));
/// assert!(criteria.paper_path.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
  /// Comma separated author names; any of them may match
  pub authors:    Option<String>,
  /// Inclusive publication year range
  pub year_range: Option<(i32, i32)>,
  /// Keyword query
  pub keywords:   Option<KeywordQuery>,
  /// Exact document path; when set, no other filter is evaluated
  pub paper_path: Option<String>,
}

impl SearchCriteria {
  /// Restricts results to records by any of the comma separated `authors`.
  pub fn with_authors(mut self, authors: impl Into<String>) -> Self {
    self.authors = Some(authors.into());
    self
  }

  /// Restricts results to records published from `start` to `end`, both included.
  pub fn with_years(mut self, start: i32, end: i32) -> Self {
    self.year_range = Some((start, end));
    self
  }

  /// Restricts results to records matching a keyword query.
  pub fn with_keywords(mut self, keywords: KeywordQuery) -> Self {
    self.keywords = Some(keywords);
    self
  }

  /// Looks for the record(s) pointing at exactly this document.
  pub fn with_paper_path(mut self, path: impl Into<String>) -> Self {
    self.paper_path = Some(path.into());
    self
  }
}

/// Splits a keyword string into terms.
///
/// Commas count as spaces. Quoted phrases are taken out first; a quote without a partner
/// ends phrase extraction and is then treated as part of the plain words.
pub(crate) fn split_terms(text: &str) -> Vec<String> {
  let mut rest = text.replace(',', " ");
  let mut terms = Vec::new();

  while let Some(open) = rest.find('"') {
    let Some(len) = rest[open + 1..].find('"') else { break };
    let close = open + 1 + len;
    let phrase = rest[open + 1..close].trim().to_string();
    rest.replace_range(open..=close, " ");
    if !phrase.is_empty() {
      terms.push(phrase);
    }
  }

  terms.extend(rest.split_whitespace().map(str::to_string));
  terms
}

/// Builds a case-insensitive `\b(t1|t2|...)\b` pattern from literal terms.
///
/// Returns `None` when there are no terms or the pattern cannot be compiled.
fn word_alternation(terms: &[String]) -> Option<Regex> {
  if terms.is_empty() {
    return None;
  }
  let alternation = terms.iter().map(|term| regex::escape(term)).collect::<Vec<_>>().join("|");
  let pattern = format!(r"\b({alternation})\b");
  match RegexBuilder::new(&pattern).case_insensitive(true).build() {
    Ok(regex) => Some(regex),
    Err(e) => {
      warn!("Could not build search pattern {}: {}", pattern, e);
      None
    },
  }
}

/// Outcome of compiling one optional filter.
#[derive(Debug)]
enum Filter<T> {
  /// Not part of the search
  Inactive,
  /// Part of the search, but nothing can satisfy it
  Unsatisfiable,
  /// Part of the search
  Active(T),
}

impl<T> Filter<T> {
  /// Applies `test` when active.
  fn passes(&self, test: impl FnOnce(&T) -> bool) -> bool {
    match self {
      Filter::Inactive => true,
      Filter::Unsatisfiable => false,
      Filter::Active(value) => test(value),
    }
  }
}

/// [`SearchCriteria`] compiled once for a whole scan.
#[derive(Debug)]
pub(crate) struct Matcher {
  /// Exact path to compare against
  paper_path: Option<String>,
  /// Author alternation
  authors:    Filter<Regex>,
  /// Inclusive year range
  years:      Option<(i32, i32)>,
  /// Keyword alternation and the fields it applies to
  keywords:   Filter<(Regex, bool, bool)>,
}

impl Matcher {
  /// Compiles the patterns of `criteria`.
  pub(crate) fn new(criteria: &SearchCriteria) -> Self {
    let authors = match &criteria.authors {
      None => Filter::Inactive,
      Some(query) => {
        let names: Vec<String> = query
          .split(',')
          .map(str::trim)
          .filter(|name| !name.is_empty())
          .map(str::to_string)
          .collect();
        if names.is_empty() {
          // A blank author box does not constrain anything
          Filter::Inactive
        } else {
          word_alternation(&names).map_or(Filter::Unsatisfiable, Filter::Active)
        }
      },
    };

    let keywords = match &criteria.keywords {
      Some(query) if query.is_active() => match word_alternation(&query.terms()) {
        Some(regex) => Filter::Active((regex, query.match_title, query.match_body)),
        None => Filter::Unsatisfiable,
      },
      _ => Filter::Inactive,
    };

    trace!("Compiled search criteria: {:?}", criteria);
    Self { paper_path: criteria.paper_path.clone(), authors, years: criteria.year_range, keywords }
  }

  /// Whether `paper` satisfies every active filter.
  pub(crate) fn matches(&self, paper: &PaperMeta) -> bool {
    if let Some(path) = &self.paper_path {
      return paper.paper_path == *path;
    }

    self.authors.passes(|regex| regex.is_match(&paper.authors))
      && self.years.map_or(true, |(start, end)| {
        paper.year_number().is_some_and(|year| (start..=end).contains(&year))
      })
      && self.keywords.passes(|(regex, title, body)| {
        (*title && regex.is_match(&paper.title)) || (*body && regex.is_match(&paper.review))
      })
  }
}
