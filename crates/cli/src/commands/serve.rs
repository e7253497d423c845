use anyhow::Result;
use cardbox_http::{AppState, create_router};
use std::sync::Arc;

use crate::open_storage;

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let storage = Arc::new(open_storage().await?);
    let state = Arc::new(AppState::new(storage));

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

