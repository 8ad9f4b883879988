use super::*;

#[traced_test]
#[test]
fn test_import_reviews() -> TestResult<()> {
  let (mut library, dir) = create_sample_library();
  let storage = library.config().storage_path.clone();
  std::fs::create_dir_all(&storage)?;
  std::fs::write(storage.join("Liskov87.pdf"), b"%PDF")?;

  let review = write_file(
    dir.path(),
    "Liskov87",
    "Data Abstraction and Hierarchy\nBarbara Liskov\n\nThe substitution principle.\n",
  );
  let citation = library.import_review(&review)?;
  assert_eq!(citation, "Liskov87");

  let paper = library.get("Liskov87").unwrap();
  assert_eq!(paper.title, "Data Abstraction and Hierarchy");
  assert_eq!(paper.authors, "Barbara Liskov");
  assert_eq!(paper.year, "1987");
  assert_eq!(paper.review, "The substitution principle.");
  assert!(paper.paper_path.ends_with("Liskov87.pdf"));
  assert!(paper.review_date.is_some());
  Ok(())
}

#[traced_test]
#[test]
fn test_import_existing_key_is_reported_as_duplicate() -> TestResult<()> {
  let (mut library, dir) = create_sample_library();
  let review = write_file(dir.path(), "Lamport1978", "Time, Clocks\nLeslie Lamport\n\nAgain.\n");

  library.import_review(&review)?;
  assert_eq!(library.duplicate_keys(), ["Lamport1978"]);
  Ok(())
}
