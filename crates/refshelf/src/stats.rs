//! Library statistics.
//!
//! A summary of how much of a library has been read and reviewed, and how recently, plus a
//! light-hearted ranking of the owner by number of written reviews.

use chrono::{Datelike, Months};

use super::*;

/// The earliest and latest publication year in `records`.
///
/// Years that are blank, not numeric or negative (the unset marker) are ignored. Returns
/// `None` when no record has a usable year.
pub fn year_range(records: &[PaperMeta]) -> Option<(i32, i32)> {
  records.iter().filter_map(PaperMeta::year_number).filter(|year| *year >= 0).fold(
    None,
    |range, year| match range {
      None => Some((year, year)),
      Some((start, end)) => Some((start.min(year), end.max(year))),
    },
  )
}

/// Rank earned by writing reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ranking {
  /// Up to 20 reviews
  Novice,
  /// More than 20
  MostlyNovice,
  /// More than 50
  Student,
  /// More than 100
  Advisor,
  /// More than 200
  Teacher,
  /// More than 500
  Consultant,
  /// More than 800
  Expert,
  /// More than 1000
  Master,
  /// More than 1500
  Superstar,
  /// More than 2000
  Guru,
  /// More than 4000
  Elite,
}

impl Ranking {
  /// The rank for a number of reviewed papers.
  pub fn for_reviews(reviews: usize) -> Self {
    match reviews {
      0..=20 => Self::Novice,
      21..=50 => Self::MostlyNovice,
      51..=100 => Self::Student,
      101..=200 => Self::Advisor,
      201..=500 => Self::Teacher,
      501..=800 => Self::Consultant,
      801..=1000 => Self::Expert,
      1001..=1500 => Self::Master,
      1501..=2000 => Self::Superstar,
      2001..=4000 => Self::Guru,
      _ => Self::Elite,
    }
  }
}

impl Display for Ranking {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Self::Novice => "Novice",
      Self::MostlyNovice => "Mostly Novice",
      Self::Student => "Student",
      Self::Advisor => "Advisor",
      Self::Teacher => "Teacher",
      Self::Consultant => "Consultant",
      Self::Expert => "Expert",
      Self::Master => "Master",
      Self::Superstar => "Superstar",
      Self::Guru => "Guru",
      Self::Elite => "Elite",
    };
    f.write_str(name)
  }
}

/// Counts describing a library at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStats {
  /// Number of records
  pub total:               usize,
  /// Records with a written review
  pub with_reviews:        usize,
  /// Records without a written review
  pub without_reviews:     usize,
  /// Records the reader has marked as finished
  pub completed:           usize,
  /// Reviews last edited in the current month
  pub reviewed_this_month: usize,
  /// Reviews last edited in the current month or the three before it
  pub reviewed_recently:   usize,
  /// Extra occurrences of citation keys
  pub duplicate_keys:      usize,
  /// Earliest and latest publication year
  pub year_range:          Option<(i32, i32)>,
}

impl LibraryStats {
  /// Computes statistics for sorted `records` as of `today`.
  pub fn compute(records: &[PaperMeta], today: NaiveDate) -> Self {
    let month_start = today.with_day(1).unwrap_or(today);
    let recent_start = month_start.checked_sub_months(Months::new(3)).unwrap_or(month_start);

    let mut stats = Self {
      total: records.len(),
      duplicate_keys: duplicates::find_duplicate_pairs(records).len(),
      year_range: year_range(records),
      ..Self::default()
    };

    for paper in records {
      if paper.has_review() {
        stats.with_reviews += 1;
      } else {
        stats.without_reviews += 1;
      }
      if paper.reader.finished {
        stats.completed += 1;
      }
      if let Some(date) = paper.review_date.filter(|date| *date <= today) {
        if date >= month_start {
          stats.reviewed_this_month += 1;
        }
        if date >= recent_start {
          stats.reviewed_recently += 1;
        }
      }
    }
    stats
  }

  /// Rank earned by the number of written reviews.
  pub fn ranking(&self) -> Ranking { Ranking::for_reviews(self.with_reviews) }
}
