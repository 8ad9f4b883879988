//! Compound search over a library with streaming, cancelable results.
//!
//! A search combines up to four filters (authors, publication years, keywords and an exact
//! document path, see [`SearchCriteria`]) and yields a [`SearchHit`] for every matching record
//! in library order. Results are produced one at a time so a front-end can show them as they
//! arrive and stop the scan early:
//!
//! - [`Searcher`] is a plain iterator over a borrowed slice of records
//! - [`spawn_search`] runs the same scan on a blocking tokio worker over a shared snapshot and
//!   streams hits through a bounded channel
//!
//! Both check a [`CancelFlag`] before each record, so cancelling stops the scan at the next
//! record boundary.
//!
//! # Examples
//!
//! ```
//! use refshelf::{
//!   paper::PaperMeta,
//!   search::{CancelFlag, SearchCriteria, Searcher},
//! };
//!
//! let mut paper = PaperMeta::with_citation("Lamport1978");
//! paper.authors = "Leslie Lamport".into();
//! paper.title = "Time, Clocks, and the Ordering of Events".into();
//! let records = vec![paper];
//!
//! let criteria = SearchCriteria::default().with_authors("lamport");
//! let hits: Vec<_> = Searcher::new(&records, &criteria, CancelFlag::default()).collect();
//! assert_eq!(hits[0].citation, "Lamport1978");
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;

use super::*;

pub mod criteria;

pub use self::criteria::{KeywordQuery, SearchCriteria};
use self::criteria::Matcher;

/// Number of hits a worker search may run ahead of its receiver.
const HIT_BUFFER: usize = 64;

/// One matching record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
  /// Citation key of the record
  pub citation: String,
  /// Title of the record
  pub title:    String,
}

impl From<&PaperMeta> for SearchHit {
  fn from(paper: &PaperMeta) -> Self {
    Self { citation: paper.citation.clone(), title: paper.title.clone() }
  }
}

/// Shared flag asking a running search to stop.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
  /// Asks every search holding this flag to stop.
  pub fn cancel(&self) { self.0.store(true, Ordering::Relaxed); }

  /// Whether [`CancelFlag::cancel`] has been called.
  pub fn is_cancelled(&self) -> bool { self.0.load(Ordering::Relaxed) }
}

/// Iterator over the records of a slice that match some criteria.
pub struct Searcher<'a> {
  /// Records not looked at yet
  records: std::slice::Iter<'a, PaperMeta>,
  /// Compiled criteria
  matcher: Matcher,
  /// Checked before every record
  cancel:  CancelFlag,
}

impl<'a> Searcher<'a> {
  /// Starts a scan of `records`.
  pub fn new(records: &'a [PaperMeta], criteria: &SearchCriteria, cancel: CancelFlag) -> Self {
    Self { records: records.iter(), matcher: Matcher::new(criteria), cancel }
  }
}

impl Iterator for Searcher<'_> {
  type Item = SearchHit;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      if self.cancel.is_cancelled() {
        trace!("Search cancelled with {} records left", self.records.len());
        return None;
      }
      let paper = self.records.next()?;
      if self.matcher.matches(paper) {
        return Some(paper.into());
      }
    }
  }
}

/// Receiving end of a search running on a worker thread.
#[derive(Debug)]
pub struct SearchHandle {
  /// Hits in library order
  hits:   mpsc::Receiver<SearchHit>,
  /// Flag shared with the worker
  cancel: CancelFlag,
}

impl SearchHandle {
  /// Waits for the next hit. Returns `None` once the scan is complete or cancelled.
  pub async fn recv(&mut self) -> Option<SearchHit> { self.hits.recv().await }

  /// Asks the worker to stop. Hits already in flight may still be received.
  pub fn cancel(&self) { self.cancel.cancel(); }

  /// The flag shared with the worker, e.g. to cancel from another task.
  pub fn cancel_flag(&self) -> CancelFlag { self.cancel.clone() }

  /// Waits for the scan to finish and returns every hit.
  pub async fn collect(mut self) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    while let Some(hit) = self.recv().await {
      hits.push(hit);
    }
    hits
  }
}

/// Runs a search on a blocking tokio worker.
///
/// The worker owns a reference to `records`, so the caller may keep mutating its own library
/// while the scan runs; the results reflect the snapshot. The worker stops when the scan
/// finishes, when the handle is cancelled or when the handle is dropped.
///
/// Must be called from within a tokio runtime.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use refshelf::{paper::PaperMeta, search::{spawn_search, SearchCriteria}};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let records: Arc<[PaperMeta]> = vec![PaperMeta::with_citation("Knuth1974")].into();
/// let mut handle = spawn_search(records, &SearchCriteria::default());
/// while let Some(hit) = handle.recv().await {
///   println!("{}", hit.citation);
/// }
/// # }
/// ```
pub fn spawn_search(records: Arc<[PaperMeta]>, criteria: &SearchCriteria) -> SearchHandle {
  let (sender, hits) = mpsc::channel(HIT_BUFFER);
  let cancel = CancelFlag::default();
  let searcher_cancel = cancel.clone();
  let criteria = criteria.clone();

  tokio::task::spawn_blocking(move || {
    let mut sent = 0usize;
    for hit in Searcher::new(&records, &criteria, searcher_cancel) {
      if sender.blocking_send(hit).is_err() {
        debug!("Search receiver dropped after {} hits", sent);
        return;
      }
      sent += 1;
    }
    debug!("Search finished with {} hits", sent);
  });

  SearchHandle { hits, cancel }
}
