use refshelf::{
  search::{CancelFlag, KeywordQuery},
  tags::{TagFilter, TagMode},
};

use super::*;

fn citations(hits: impl Iterator<Item = SearchHit>) -> Vec<String> {
  hits.map(|hit| hit.citation).collect()
}

#[traced_test]
#[test]
fn test_compound_search() {
  let (library, _dir) = create_sample_library();

  let criteria = SearchCriteria::default().with_authors("lamport, Shannon");
  assert_eq!(citations(library.search(&criteria)), ["Lamport1978", "Shannon1937"]);

  let criteria = criteria.with_years(1950, 2020);
  assert_eq!(citations(library.search(&criteria)), ["Lamport1978"]);

  let criteria = SearchCriteria::default()
    .with_years(1900, 2100)
    .with_keywords(KeywordQuery::anywhere(r#""deep learning" circuits"#));
  assert_eq!(citations(library.search(&criteria)), ["Shannon1937", "VaswaniEtAl2017"]);
}

#[traced_test]
#[test]
fn test_search_by_paper_path() {
  let (mut library, _dir) = create_sample_library();
  let mut session = EditSession::new(library.get("Shannon1937").unwrap().clone());
  session.paper.paper_path = "/papers/Shannon1937.pdf".into();
  library.upsert(session);

  let criteria = SearchCriteria::default().with_paper_path("/papers/Shannon1937.pdf");
  let hits: Vec<_> = library.search(&criteria).collect();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].title, "A Symbolic Analysis of Relay and Switching Circuits");
}

#[test]
fn test_cancelled_search_yields_nothing() {
  let (library, _dir) = create_sample_library();
  let cancel = CancelFlag::default();
  cancel.cancel();
  assert_eq!(library.search_with(&SearchCriteria::default(), cancel).count(), 0);
}

#[traced_test]
#[tokio::test]
async fn test_worker_search_uses_snapshot() {
  let (mut library, _dir) = create_sample_library();
  let criteria = SearchCriteria::default().with_keywords(KeywordQuery::title("attention"));
  let handle = library.spawn_search(&criteria);

  // The library may change while the worker scans its snapshot
  library.clear("Gone");

  let hits = handle.collect().await;
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].citation, "VaswaniEtAl2017");
}

#[test]
fn test_tag_filtering() {
  let (library, _dir) = create_sample_library();

  let filter = TagFilter::new("classic,ml", TagMode::Or);
  let hits: Vec<_> = library.filter_tags(&filter).map(|p| p.citation.as_str()).collect();
  assert_eq!(hits, ["Lamport1978", "Shannon1937", "VaswaniEtAl2017"]);

  let filter = TagFilter::new("classic,circuits", TagMode::And);
  let hits: Vec<_> = library.filter_tags(&filter).map(|p| p.citation.as_str()).collect();
  assert_eq!(hits, ["Shannon1937"]);
}
