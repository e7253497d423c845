//! Service tests against a throwaway SQLite database.

use std::sync::Arc;

use cardbox_storage::StorageBackend;
use serde_json::Value;
use tempfile::TempDir;

use crate::{CardDraft, CardService, CategoryDraft, CategoryService, Submitted};

pub struct TestServices {
    pub categories: CategoryService,
    pub cards: CardService,
    pub storage: Arc<StorageBackend>,
    _temp_dir: TempDir,
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_services() -> TestServices {
    let temp_dir = TempDir::new().unwrap();
    let storage = Arc::new(StorageBackend::new_sqlite(&temp_dir.path().join("test.db")).unwrap());
    TestServices {
        categories: CategoryService::new(Arc::clone(&storage)),
        cards: CardService::new(Arc::clone(&storage)),
        storage,
        _temp_dir: temp_dir,
    }
}

pub fn text(s: &str) -> Submitted<Value> {
    Submitted::Value(Value::from(s))
}

pub fn names(items: &[&str]) -> Submitted<Value> {
    Submitted::Value(Value::from(items.to_vec()))
}

pub fn category_draft(name: &str) -> CategoryDraft {
    CategoryDraft { name: text(name), description: Submitted::Absent }
}

pub fn card_draft(title: &str, categories: &[&str]) -> CardDraft {
    CardDraft {
        title: text(title),
        description: text(&format!("{title} body")),
        categories: names(categories),
    }
}
