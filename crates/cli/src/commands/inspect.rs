use anyhow::Result;
use cardbox_core::CategoryId;
use cardbox_service::{CardService, CategoryService};
use std::sync::Arc;

use crate::open_storage;

pub(crate) async fn run_cards(category: Option<CategoryId>) -> Result<()> {
    let service = CardService::new(Arc::new(open_storage().await?));
    let cards = service.list(category).await?;
    println!("{}", serde_json::to_string_pretty(&cards)?);
    Ok(())
}

pub(crate) async fn run_categories() -> Result<()> {
    let service = CategoryService::new(Arc::new(open_storage().await?));
    for name in service.list().await? {
        println!("{name}");
    }
    Ok(())
}

pub(crate) async fn run_suggest(query: &str) -> Result<()> {
    let service = CategoryService::new(Arc::new(open_storage().await?));
    for name in service.suggest(query).await? {
        println!("{name}");
    }
    Ok(())
}
