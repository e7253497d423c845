use std::sync::Arc;

use cardbox_core::{Category, CategoryId};
use cardbox_storage::StorageBackend;
use cardbox_storage::traits::CategoryStore;

use crate::ServiceError;
use crate::input::{CategoryChanges, CategoryDraft};

pub struct CategoryService {
    storage: Arc<StorageBackend>,
}

impl CategoryService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    pub async fn get(&self, id: CategoryId) -> Result<Category, ServiceError> {
        Ok(self.storage.get_category(id).await?)
    }

    /// Every category name, in creation order.
    pub async fn list(&self) -> Result<Vec<String>, ServiceError> {
        let categories = self.storage.list_categories().await?;
        Ok(categories.into_iter().map(|c| c.name).collect())
    }

    pub async fn create(&self, draft: &CategoryDraft) -> Result<Category, ServiceError> {
        let input = draft.validate()?;
        let category = self.storage.create_category(&input).await?;
        tracing::debug!(id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    /// Applies only the supplied fields. A missing category is reported
    /// before any validation error.
    pub async fn update(
        &self,
        id: CategoryId,
        changes: &CategoryChanges,
    ) -> Result<Category, ServiceError> {
        let current = self.storage.get_category(id).await?;
        let patch = changes.validate()?;
        if patch.is_empty() {
            return Ok(current);
        }
        Ok(self.storage.update_category(id, &patch).await?)
    }

    /// Names containing `query`, ignoring case. An empty query matches all.
    pub async fn suggest(&self, query: &str) -> Result<Vec<String>, ServiceError> {
        let matches = self.storage.find_categories_by_name_contains(query).await?;
        Ok(matches.into_iter().map(|c| c.name).collect())
    }
}
