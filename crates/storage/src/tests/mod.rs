//! Test utilities and module declarations for storage tests.

use crate::Storage;
use cardbox_core::{NewCard, NewCategory};
use tempfile::TempDir;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

pub fn new_category(name: &str) -> NewCategory {
    NewCategory { name: name.to_owned(), description: None }
}

pub fn new_card(title: &str, categories: &[&str]) -> NewCard {
    NewCard {
        title: title.to_owned(),
        description: format!("{title} description"),
        category_names: categories.iter().map(|c| (*c).to_owned()).collect(),
    }
}

mod card_tests;
mod category_tests;
mod concurrency_tests;
