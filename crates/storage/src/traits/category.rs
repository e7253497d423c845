use async_trait::async_trait;
use cardbox_core::{Category, CategoryId, CategoryPatch, NewCategory};

use crate::error::StorageError;

/// Category persistence.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Get category by ID. `NotFound` if absent.
    async fn get_category(&self, id: CategoryId) -> Result<Category, StorageError>;

    /// All categories in id order.
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError>;

    /// Categories whose name contains `needle`, ignoring case.
    async fn find_categories_by_name_contains(
        &self,
        needle: &str,
    ) -> Result<Vec<Category>, StorageError>;

    /// Insert a category with the name exactly as given.
    async fn create_category(&self, input: &NewCategory) -> Result<Category, StorageError>;

    /// Apply the supplied fields only. `NotFound` if absent.
    async fn update_category(
        &self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> Result<Category, StorageError>;

    /// Exact-name lookup, inserting when missing. The flag is `true` when a
    /// row was created. Safe under concurrent callers for the same name.
    async fn get_or_create_category(&self, name: &str)
    -> Result<(Category, bool), StorageError>;
}
