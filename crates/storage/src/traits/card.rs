use async_trait::async_trait;
use cardbox_core::{Card, CardId, CardPatch, CategoryId, NewCard};

use crate::error::StorageError;

/// Card persistence, including the card-category association.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Get card by ID with category names resolved. `NotFound` if absent.
    async fn get_card(&self, id: CardId) -> Result<Card, StorageError>;

    /// All cards in id order, optionally only those filed under `category`.
    async fn list_cards(&self, category: Option<CategoryId>) -> Result<Vec<Card>, StorageError>;

    /// Insert the card, get-or-create each category name and attach them,
    /// all in one transaction.
    async fn create_card(&self, input: &NewCard) -> Result<Card, StorageError>;

    /// Update supplied fields and refresh `updated`; a supplied category list
    /// replaces the association set. One transaction. `NotFound` if absent.
    async fn update_card(&self, id: CardId, patch: &CardPatch) -> Result<Card, StorageError>;
}
