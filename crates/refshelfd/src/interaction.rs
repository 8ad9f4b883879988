//! Terminal interaction: confirmations, prompts and formatted replies.

use console::style;
use dialoguer::{Confirm, Input};
use refshelf::stats::LibraryStats;

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for warning messages
pub static WARNING_PREFIX: &str = "! ";
/// Prefix for every entry of a list but the last
pub static ITEM_PREFIX: &str = "├─";
/// Prefix for the last entry of a list
pub static LAST_ITEM_PREFIX: &str = "└─";

/// Something a command wants to show the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// Full details of one record
  Paper(&'a PaperMeta),
  /// One line per record
  Papers(&'a [&'a PaperMeta]),
  /// One line per search hit
  Hits(&'a [SearchHit]),
  /// Library statistics
  Stats(&'a LibraryStats),
  /// An operation completed
  Success(&'a str),
  /// Something looks wrong but the command carried on
  Warning(&'a str),
  /// Neutral information
  Info(&'a str),
}

/// How commands talk to the user.
pub trait UserInteraction {
  /// Asks a yes/no question.
  fn confirm(&self, message: &str) -> Result<bool>;
  /// Asks for a line of text.
  fn prompt(&self, message: &str) -> Result<String>;
  /// Shows a response.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

impl UserInteraction for Cli {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      return Ok(true);
    }
    Ok(Confirm::new().with_prompt(message).default(false).interact()?)
  }

  fn prompt(&self, message: &str) -> Result<String> {
    if self.accept_defaults {
      return Ok(String::new());
    }
    Ok(Input::<String>::new().with_prompt(message).allow_empty(true).interact_text()?)
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Paper(paper) => print_paper(paper),
      ResponseContent::Papers(papers) => {
        for (i, paper) in papers.iter().enumerate() {
          let prefix = if i + 1 == papers.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
          println!("{} {}  {}", prefix, style(&paper.citation).cyan(), paper.title);
        }
      },
      ResponseContent::Hits(hits) => {
        for (i, hit) in hits.iter().enumerate() {
          let prefix = if i + 1 == hits.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
          println!("{} {}  {}", prefix, style(&hit.citation).cyan(), hit.title);
        }
      },
      ResponseContent::Stats(stats) => print_stats(stats),
      ResponseContent::Success(message) => {
        println!("{} {}", style(SUCCESS_PREFIX).green(), style(message).green())
      },
      ResponseContent::Warning(message) => {
        println!("{} {}", style(WARNING_PREFIX).yellow(), style(message).yellow())
      },
      ResponseContent::Info(message) => println!("{} {}", style(INFO_PREFIX).blue(), message),
    }
    Ok(())
  }
}

/// Prints the non-empty fields of a record.
fn print_paper(paper: &PaperMeta) {
  println!("{} {}", style(INFO_PREFIX).blue(), style(&paper.citation).bold().cyan());
  let fields = [
    ("Title", paper.title.as_str()),
    ("Authors", paper.authors.as_str()),
    ("Year", paper.year.as_str()),
    ("Venue", paper.venue.as_token()),
    ("Publication", paper.publication.as_str()),
    ("DOI", paper.doi.as_str()),
    ("Tags", paper.tags.as_str()),
    ("Document", paper.paper_path.as_str()),
  ];
  for (name, value) in fields.iter().filter(|(_, value)| !value.is_empty()) {
    println!("   {}: {}", style(name).yellow(), value);
  }
  if let Some(date) = paper.review_date {
    println!("   {}: {}", style("Reviewed").yellow(), date);
  }
}

/// Prints library statistics.
fn print_stats(stats: &LibraryStats) {
  let rows = [
    ("Total records", stats.total),
    ("Papers with reviews", stats.with_reviews),
    ("Reviews marked complete", stats.completed),
    ("Records missing review", stats.without_reviews),
    ("Reviewed this month", stats.reviewed_this_month),
    ("Reviewed last 3 months", stats.reviewed_recently),
    ("Duplicate citations", stats.duplicate_keys),
  ];
  for (name, value) in rows {
    println!("   {:<24} {}", style(name).yellow(), value);
  }
  if let Some((start, end)) = stats.year_range {
    println!("   {:<24} {}-{}", style("Publication years").yellow(), start, end);
  }
  println!(
    "{} Your library ranking is {}",
    style(INFO_PREFIX).blue(),
    style(stats.ranking()).italic()
  );
}
