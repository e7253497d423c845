use std::future::Future;
use std::sync::Arc;

use cardbox_core::{CARD_WRITE_ATTEMPTS, Card, CardId, CategoryId};
use cardbox_storage::traits::CardStore;
use cardbox_storage::{StorageBackend, StorageError};

use crate::ServiceError;
use crate::input::{CardChanges, CardDraft};

pub struct CardService {
    storage: Arc<StorageBackend>,
}

/// Runs a card write, repeating it while the store reports a write
/// conflict, up to [`CARD_WRITE_ATTEMPTS`] times in total.
async fn with_conflict_retry<F, Fut>(op: &'static str, mut write: F) -> Result<Card, ServiceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Card, StorageError>>,
{
    let mut attempt = 1;
    loop {
        match write().await {
            Err(e) if e.is_conflict() && attempt < CARD_WRITE_ATTEMPTS => {
                tracing::warn!(op, attempt, error = %e, "card write conflicted, retrying");
                attempt += 1;
            },
            result => return Ok(result?),
        }
    }
}

impl CardService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    pub async fn get(&self, id: CardId) -> Result<Card, ServiceError> {
        Ok(self.storage.get_card(id).await?)
    }

    /// All cards, or only those filed under `category`.
    pub async fn list(&self, category: Option<CategoryId>) -> Result<Vec<Card>, ServiceError> {
        Ok(self.storage.list_cards(category).await?)
    }

    /// Validates the draft, canonicalizes its category names and stores the
    /// card together with its category links in one transaction.
    pub async fn create(&self, draft: &CardDraft) -> Result<Card, ServiceError> {
        let input = draft.validate()?;
        let (storage, input) = (&*self.storage, &input);
        let card = with_conflict_retry("create", move || storage.create_card(input)).await?;
        tracing::debug!(
            id = %card.id,
            categories = ?card.category_names,
            "card created"
        );
        Ok(card)
    }

    /// Partial update. A supplied category list replaces the current links
    /// entirely; an empty list clears them.
    pub async fn update(&self, id: CardId, changes: &CardChanges) -> Result<Card, ServiceError> {
        self.storage.get_card(id).await?;
        let patch = changes.validate()?;
        let (storage, patch) = (&*self.storage, &patch);
        let card = with_conflict_retry("update", move || storage.update_card(id, patch)).await?;
        tracing::debug!(id = %card.id, "card updated");
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;

    use super::*;

    fn sample_card() -> Card {
        let now = Utc::now();
        Card {
            id: CardId(1),
            title: "t".to_owned(),
            description: String::new(),
            category_names: Vec::new(),
            created: now,
            updated: now,
        }
    }

    #[tokio::test]
    async fn retries_a_single_conflict() {
        let calls = AtomicUsize::new(0);
        let card = with_conflict_retry("create", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(StorageError::Conflict("database is locked".into()))
                } else {
                    Ok(sample_card())
                }
            }
        })
        .await
        .unwrap();
        assert_eq!(card.id, CardId(1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_after_repeated_conflicts() {
        let calls = AtomicUsize::new(0);
        let err = with_conflict_retry("update", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(StorageError::Conflict("deadlock detected".into())) }
        })
        .await
        .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(calls.load(Ordering::SeqCst), CARD_WRITE_ATTEMPTS);
    }

    #[tokio::test]
    async fn other_errors_are_not_retried() {
        let calls = AtomicUsize::new(0);
        let err = with_conflict_retry("update", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(StorageError::not_found("card", 9)) }
        })
        .await
        .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
