//! The record model for papers kept in a reference library.
//!
//! A [`PaperMeta`] holds everything needed to find a paper again (bibliographic fields),
//! the owner's review text, and two embedded opinion blocks:
//!
//! - [`ReaderOpinion`]: how far the owner got and how much they liked it
//! - [`ReviewerOpinion`]: a peer-review style verdict with sub-scores and comments
//!
//! Every enumeration stored in a library file ([`Venue`], [`ThesisKind`], [`Acceptance`])
//! maps to a fixed string token through one table per type, so reordering variants in code
//! never changes the file format. The same table drives both directions of the mapping:
//!
//! ```
//! use std::str::FromStr;
//!
//! use refshelf::paper::Venue;
//!
//! assert_eq!(Venue::NoVenue.as_token(), "None");
//! assert_eq!(Venue::from_str("Journal").unwrap(), Venue::Journal);
//! ```

use std::{cmp::Ordering, collections::BTreeSet};

use super::*;

/// Lowest value of every opinion score. Zero is reserved for "not applicable".
pub const MIN_SCORE: u8 = 1;

/// Highest value of every opinion score.
pub const MAX_SCORE: u8 = 10;

/// Year value of a freshly created record, meaning "not set".
pub const UNSET_YEAR: &str = "-1";

/// Implements the persisted token mapping for a fieldless enum.
///
/// Generates an exhaustive `as_token`, a `TOKENS` table, [`Display`] and [`FromStr`] from a
/// single list so the two directions cannot drift apart.
macro_rules! token_table {
  ($ty:ident { $($variant:ident => $token:literal),+ $(,)? }) => {
    impl $ty {
      /// Every variant with its persisted token, in declaration order.
      pub const TOKENS: &'static [($ty, &'static str)] = &[$(($ty::$variant, $token)),+];

      /// The token written to library files for this variant.
      pub fn as_token(&self) -> &'static str {
        match self {
          $($ty::$variant => $token),+
        }
      }
    }

    impl Display for $ty {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
      }
    }

    impl FromStr for $ty {
      type Err = ShelfError;

      fn from_str(s: &str) -> Result<Self> {
        Self::TOKENS.iter().find(|(_, token)| *token == s).map(|(variant, _)| *variant).ok_or_else(
          || ShelfError::Malformed(format!("unknown {} token {:?}", stringify!($ty), s)),
        )
      }
    }
  };
}

/// Kind of outlet a paper was published in.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Venue {
  /// Peer-reviewed journal
  Journal,
  /// Conference proceedings
  Conference,
  /// Symposium proceedings
  Symposium,
  /// Book or book chapter
  Book,
  /// Preprint server (arXiv, ePrint, ...)
  Preprint,
  /// Thesis, see [`ThesisKind`] for the degree
  Thesis,
  /// Technical report
  Report,
  /// Published by the authors themselves
  SelfPublished,
  /// Written but never published
  NotPublished,
  /// Explicitly has no venue
  NoVenue,
  /// Venue has not been recorded
  #[default]
  Unknown,
}

token_table!(Venue {
  Journal => "Journal",
  Conference => "Conference",
  Symposium => "Symposium",
  Book => "Book",
  Preprint => "Preprint",
  Thesis => "Thesis",
  Report => "Report",
  SelfPublished => "SelfPublished",
  NotPublished => "NotPublished",
  NoVenue => "None",
  Unknown => "Unknown",
});

/// Degree a thesis was written for. Only meaningful when the venue is [`Venue::Thesis`].
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ThesisKind {
  /// PhD or equivalent
  Doctorate,
  /// Master's degree
  Masters,
  /// Bachelor's degree
  Bachelors,
  /// College diploma
  College,
  /// Degree has not been recorded
  #[default]
  Unknown,
}

token_table!(ThesisKind {
  Doctorate => "Doctorate",
  Masters => "Masters",
  Bachelors => "Bachelors",
  College => "College",
  Unknown => "Unknown",
});

/// A reviewer's overall verdict.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Acceptance {
  /// Accept with enthusiasm
  StrongAccept,
  /// Accept with reservations
  WeakAccept,
  /// No recommendation either way
  #[default]
  Neutral,
  /// Lean towards rejection
  WeakReject,
  /// Reject
  StrongReject,
}

token_table!(Acceptance {
  StrongAccept => "AcceptStrong",
  WeakAccept => "AcceptWeak",
  Neutral => "AcceptNeutral",
  WeakReject => "RejectWeak",
  StrongReject => "RejectStrong",
});

/// The reader's own summary of a paper.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReaderOpinion {
  /// The paper has been read to the end
  pub finished:      bool,
  /// 1-10, fully understood = 10
  pub understanding: u8,
  /// 1-10, uninteresting = 1
  pub rating:        u8,
}

impl Default for ReaderOpinion {
  fn default() -> Self { Self { finished: false, understanding: MIN_SCORE, rating: MIN_SCORE } }
}

impl ReaderOpinion {
  /// Whether anything differs from a fresh opinion, i.e. whether it is worth persisting.
  pub fn is_set(&self) -> bool {
    self.finished || self.understanding > MIN_SCORE || self.rating > MIN_SCORE
  }
}

/// A peer-review style assessment of a paper.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReviewerOpinion {
  /// Overall verdict
  pub accept:               Acceptance,
  /// Suitability of the paper for the venue
  pub suitability:          u8,
  /// Technical correctness
  pub correctness:          u8,
  /// Novelty and inventiveness
  pub novelty:              u8,
  /// Quality of writing and figures
  pub clarity:              u8,
  /// Relevance to the reviewer's background
  pub relevance:            u8,
  /// The paper needs changes before publication
  pub corrections_required: bool,
  /// Comments sent back to the authors
  pub author_comments:      String,
  /// Comments sent to the chair or editor
  pub editor_comments:      String,
}

impl Default for ReviewerOpinion {
  fn default() -> Self {
    Self {
      accept:               Acceptance::Neutral,
      suitability:          MIN_SCORE,
      correctness:          MIN_SCORE,
      novelty:              MIN_SCORE,
      clarity:              MIN_SCORE,
      relevance:            MIN_SCORE,
      corrections_required: false,
      author_comments:      String::new(),
      editor_comments:      String::new(),
    }
  }
}

impl ReviewerOpinion {
  /// Whether anything differs from a fresh opinion, i.e. whether it is worth persisting.
  pub fn is_set(&self) -> bool { *self != Self::default() }

  /// The five sub-scores in file order: suitability, correctness, novelty, clarity, relevance.
  pub fn scores(&self) -> [u8; 5] {
    [self.suitability, self.correctness, self.novelty, self.clarity, self.relevance]
  }
}

/// Everything the library knows about one paper.
///
/// Equality is structural over every field and is what a front-end uses to detect unsaved
/// edits. Ordering inside a library is by citation key only, see
/// [`PaperMeta::cmp_citation`]; it is deliberately not an [`Ord`] implementation because two
/// records with the same key are not equal.
///
/// # Examples
///
/// ```
/// use refshelf::paper::{PaperMeta, Venue};
///
/// let mut paper = PaperMeta::default();
/// assert_eq!(paper.year, "-1");
///
/// paper.citation = "Knuth1974".into();
/// paper.venue = Venue::Journal;
/// paper.reset();
/// assert_eq!(paper, PaperMeta::default());
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PaperMeta {
  /// Citation key, intended to be unique within a library
  pub citation:    String,
  /// Free-text review
  pub review:      String,
  /// Path to the source document
  pub paper_path:  String,
  /// How the paper was published
  pub venue:       Venue,
  /// Authors as one delimited string ("A. Smith, B. Jones and C. Lee")
  pub authors:     String,
  /// Paper title
  pub title:       String,
  /// Name of the journal, conference, ...
  pub publication: String,
  /// Volume number
  pub volume:      String,
  /// Issue number
  pub issue:       String,
  /// Month of publication
  pub month:       String,
  /// Year of publication; text because it may be blank or malformed
  pub year:        String,
  /// Range of dates of a conference
  pub dates:       String,
  /// First page
  pub page_start:  String,
  /// Last page
  pub page_end:    String,
  /// Link(s) to the paper, comma separated
  pub url:         String,
  /// Degree, when the venue is a thesis
  pub thesis:      ThesisKind,
  /// University or company
  pub institution: String,
  /// Location of a conference or symposium
  pub location:    String,
  /// Name of the publishing company
  pub publisher:   String,
  /// International Standard Book Number
  pub isbn:        String,
  /// Digital Object Identifier, e.g. "10.1000/182"
  pub doi:         String,
  /// Free-text reference note
  pub note:        String,
  /// Date the review was last edited
  pub review_date: Option<NaiveDate>,
  /// User tags, comma separated
  pub tags:        String,
  /// The paper has been peer reviewed by the owner, see [`PaperMeta::reviewer`]
  pub reviewed:    bool,
  /// Reader's opinion
  pub reader:      ReaderOpinion,
  /// Reviewer's opinion
  pub reviewer:    ReviewerOpinion,
}

impl Default for PaperMeta {
  fn default() -> Self {
    Self {
      citation:    String::new(),
      review:      String::new(),
      paper_path:  String::new(),
      venue:       Venue::Unknown,
      authors:     String::new(),
      title:       String::new(),
      publication: String::new(),
      volume:      String::new(),
      issue:       String::new(),
      month:       String::new(),
      year:        UNSET_YEAR.to_string(),
      dates:       String::new(),
      page_start:  String::new(),
      page_end:    String::new(),
      url:         String::new(),
      thesis:      ThesisKind::Unknown,
      institution: String::new(),
      location:    String::new(),
      publisher:   String::new(),
      isbn:        String::new(),
      doi:         String::new(),
      note:        String::new(),
      review_date: None,
      tags:        String::new(),
      reviewed:    false,
      reader:      ReaderOpinion::default(),
      reviewer:    ReviewerOpinion::default(),
    }
  }
}

impl PaperMeta {
  /// Creates an otherwise default record with the given citation key.
  pub fn with_citation(citation: impl Into<String>) -> Self {
    Self { citation: citation.into(), ..Self::default() }
  }

  /// Restores every field to its default value.
  pub fn reset(&mut self) { *self = Self::default(); }

  /// Compares two records by citation key, the order a library is kept in.
  pub fn cmp_citation(&self, other: &Self) -> Ordering { self.citation.cmp(&other.citation) }

  /// The year as a number, or `None` when it is blank or not numeric. The unset marker
  /// reads as `-1`.
  ///
  /// ```
  /// use refshelf::paper::PaperMeta;
  ///
  /// let mut paper = PaperMeta::default();
  /// paper.year = "2004".into();
  /// assert_eq!(paper.year_number(), Some(2004));
  /// paper.year = "unknown".into();
  /// assert_eq!(paper.year_number(), None);
  /// ```
  pub fn year_number(&self) -> Option<i32> { self.year.trim().parse().ok() }

  /// Tags of this record as a set, see [`tags::split_tags`].
  pub fn tag_set(&self) -> BTreeSet<&str> { tags::split_tags(&self.tags) }

  /// Whether the owner has written a review for this paper.
  pub fn has_review(&self) -> bool { !self.review.is_empty() }
}
