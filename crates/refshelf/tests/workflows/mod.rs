use super::*;

mod library_roundtrip;
mod review_import;
mod searching;
