//! Async trait implementations for SQLite `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use cardbox_core::{
    Card, CardId, CardPatch, Category, CategoryId, CategoryPatch, NewCard, NewCategory,
};

use crate::Storage;
use crate::error::StorageError;
use crate::traits::{CardStore, CategoryStore};

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`      — `.clone()` a `&T`, pass as `&arg`
/// - `@str arg`      — `.to_owned()` a `&str`, pass as `&arg`
/// - `@val arg`      — move directly (Copy/owned types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture val $arg:ident) => { };
    (@pass ref $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

// ── CategoryStore ────────────────────────────────────────────────

#[async_trait]
impl CategoryStore for Storage {
    async fn get_category(&self, id: CategoryId) -> Result<Category, StorageError> {
        delegate!(self, get_category, @val id)
    }
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        delegate!(self, list_categories)
    }
    async fn find_categories_by_name_contains(
        &self,
        needle: &str,
    ) -> Result<Vec<Category>, StorageError> {
        delegate!(self, find_categories_by_name_contains, @str needle)
    }
    async fn create_category(&self, input: &NewCategory) -> Result<Category, StorageError> {
        delegate!(self, create_category, @ref input)
    }
    async fn update_category(
        &self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> Result<Category, StorageError> {
        delegate!(self, update_category, @val id, @ref patch)
    }
    async fn get_or_create_category(
        &self,
        name: &str,
    ) -> Result<(Category, bool), StorageError> {
        delegate!(self, get_or_create_category, @str name)
    }
}

// ── CardStore ────────────────────────────────────────────────────

#[async_trait]
impl CardStore for Storage {
    async fn get_card(&self, id: CardId) -> Result<Card, StorageError> {
        delegate!(self, get_card, @val id)
    }
    async fn list_cards(&self, category: Option<CategoryId>) -> Result<Vec<Card>, StorageError> {
        delegate!(self, list_cards, @val category)
    }
    async fn create_card(&self, input: &NewCard) -> Result<Card, StorageError> {
        delegate!(self, create_card, @ref input)
    }
    async fn update_card(&self, id: CardId, patch: &CardPatch) -> Result<Card, StorageError> {
        delegate!(self, update_card, @val id, @ref patch)
    }
}
