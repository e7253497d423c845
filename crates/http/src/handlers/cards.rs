use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use cardbox_core::Card;
use cardbox_service::CardDraft;

use crate::api_error::ApiError;
use crate::query_types::{CardsQuery, CreateCardRequest, QueryParams, UpdateCardRequest};
use crate::response_types::Envelope;
use crate::AppState;

/// `?id=` returns one card; otherwise every card, optionally only those
/// filed under `?category=`.
pub async fn get_cards(
    State(state): State<Arc<AppState>>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let query = CardsQuery::from(params);
    if let Some(id) = query.card_id()? {
        let card = state.card_service.get(id).await?;
        return Ok(Envelope::ok(card).into_response());
    }
    let cards = state.card_service.list(query.category_id()?).await?;
    Ok(Envelope::ok(cards).into_response())
}

pub async fn create_card(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateCardRequest>, JsonRejection>,
) -> Result<Envelope<Card>, ApiError> {
    let Json(req) = body?;
    let card = state.card_service.create(&CardDraft::from(req)).await?;
    Ok(Envelope::ok(card))
}

pub async fn update_card(
    State(state): State<Arc<AppState>>,
    body: Result<Json<UpdateCardRequest>, JsonRejection>,
) -> Result<Envelope<Card>, ApiError> {
    let Json(req) = body?;
    let (id, changes) = req.into_parts()?;
    let card = state.card_service.update(id, &changes).await?;
    Ok(Envelope::ok(card))
}
