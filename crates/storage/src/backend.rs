//! Unified storage backend with enum dispatch.

#[cfg(feature = "sqlite")]
use std::path::Path;

use async_trait::async_trait;
use cardbox_core::{
    Card, CardId, CardPatch, Category, CategoryId, CategoryPatch, NewCard, NewCategory,
};

use crate::error::StorageError;
use crate::traits::{CardStore, CategoryStore};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite(s) => <crate::Storage as $trait>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::pg_storage::PgStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::Storage),
    #[cfg(feature = "postgres")]
    Postgres(crate::pg_storage::PgStorage),
}

impl StorageBackend {
    #[cfg(feature = "sqlite")]
    pub fn new_sqlite(db_path: &Path) -> Result<Self, StorageError> {
        Ok(Self::Sqlite(crate::Storage::new(db_path)?))
    }

    #[cfg(feature = "postgres")]
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::pg_storage::PgStorage::new(database_url).await?))
    }

    /// Short backend name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }
}

// ── CategoryStore ────────────────────────────────────────────────

#[async_trait]
impl CategoryStore for StorageBackend {
    async fn get_category(&self, id: CategoryId) -> Result<Category, StorageError> {
        dispatch!(self, CategoryStore, get_category(id))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        dispatch!(self, CategoryStore, list_categories())
    }

    async fn find_categories_by_name_contains(
        &self,
        needle: &str,
    ) -> Result<Vec<Category>, StorageError> {
        dispatch!(self, CategoryStore, find_categories_by_name_contains(needle))
    }

    async fn create_category(&self, input: &NewCategory) -> Result<Category, StorageError> {
        dispatch!(self, CategoryStore, create_category(input))
    }

    async fn update_category(
        &self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> Result<Category, StorageError> {
        dispatch!(self, CategoryStore, update_category(id, patch))
    }

    async fn get_or_create_category(
        &self,
        name: &str,
    ) -> Result<(Category, bool), StorageError> {
        dispatch!(self, CategoryStore, get_or_create_category(name))
    }
}

// ── CardStore ────────────────────────────────────────────────────

#[async_trait]
impl CardStore for StorageBackend {
    async fn get_card(&self, id: CardId) -> Result<Card, StorageError> {
        dispatch!(self, CardStore, get_card(id))
    }

    async fn list_cards(&self, category: Option<CategoryId>) -> Result<Vec<Card>, StorageError> {
        dispatch!(self, CardStore, list_cards(category))
    }

    async fn create_card(&self, input: &NewCard) -> Result<Card, StorageError> {
        dispatch!(self, CardStore, create_card(input))
    }

    async fn update_card(&self, id: CardId, patch: &CardPatch) -> Result<Card, StorageError> {
        dispatch!(self, CardStore, update_card(id, patch))
    }
}
