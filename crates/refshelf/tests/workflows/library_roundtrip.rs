use refshelf::library::Upsert;

use super::*;

#[traced_test]
#[test]
fn test_save_and_reopen() -> TestResult<()> {
  let (library, _dir) = create_sample_library();
  library.save_default()?;

  let reopened = Library::open(library.config().clone())?;
  assert_eq!(reopened.name(), "Test library");
  assert_eq!(reopened.len(), 4);

  for (saved, loaded) in library.records().iter().zip(reopened.records()) {
    assert_eq!(saved, loaded);
  }
  Ok(())
}

#[traced_test]
#[test]
fn test_empty_year_reads_back_empty() -> TestResult<()> {
  let (mut library, _dir) = create_test_library();
  let mut paper = PaperMeta::with_citation("Blank");
  paper.year = String::new();
  library.upsert(EditSession::new(paper));
  library.save_default()?;

  let reopened = Library::open(library.config().clone())?;
  assert_eq!(reopened.get("Blank").unwrap().year, "");
  Ok(())
}

#[traced_test]
#[test]
fn test_sorted_after_every_mutation() -> TestResult<()> {
  let (mut library, _dir) = create_sample_library();
  let is_sorted = |library: &Library| {
    library.records().windows(2).all(|pair| pair[0].citation <= pair[1].citation)
  };
  assert!(is_sorted(&library));

  let mut session = EditSession::new(library.get("Anon").unwrap().clone());
  session.paper.citation = "Zeta2000".into();
  assert_eq!(library.upsert(session), Upsert::Updated);
  assert!(is_sorted(&library));
  assert!(!library.exists("Anon"));

  let index = library.position("Lamport1978").unwrap();
  library.remove(index)?;
  assert!(is_sorted(&library));

  library.upsert(EditSession::new(PaperMeta::with_citation("Aaron1999")));
  assert!(is_sorted(&library));
  assert_eq!(library.records()[0].citation, "Aaron1999");
  Ok(())
}

#[traced_test]
#[test]
fn test_new_paper_gets_free_key() -> TestResult<()> {
  let (mut library, _dir) = create_sample_library();

  let mut paper = PaperMeta::default();
  paper.authors = "Leslie Lamport".into();
  paper.year = "1978".into();
  paper.title = "State the Problem Before Describing the Solution".into();
  let key = library.generate_citation(&paper.authors, &paper.year).unwrap();
  assert_eq!(key, "Lamport1978a");
  assert!(!library.exists(&key));

  paper.citation = key;
  assert_eq!(library.upsert(EditSession::new(paper)), Upsert::Inserted);
  assert!(library.duplicate_keys().is_empty());

  // Seven authors exceed the default limit of five
  let long = library.get("VaswaniEtAl2017").unwrap();
  let key = library.generate_citation(&long.authors, &long.year).unwrap();
  assert_eq!(key, "VSPUJGK2017");
  Ok(())
}

#[traced_test]
#[test]
fn test_statistics() -> TestResult<()> {
  let (library, _dir) = create_sample_library();
  let today = chrono::Local::now().date_naive();
  let stats = library.stats(today);

  assert_eq!(stats.total, 4);
  assert_eq!(stats.with_reviews, 2);
  assert_eq!(stats.completed, 1);
  // Every upsert stamps today's date
  assert_eq!(stats.reviewed_this_month, 4);
  assert_eq!(stats.year_range, Some((1937, 2017)));
  assert_eq!(library.tags(), ["circuits", "classic", "distributed", "ml", "nlp"]);
  Ok(())
}
