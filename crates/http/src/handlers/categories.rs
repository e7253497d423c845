use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use cardbox_core::Category;
use cardbox_service::CategoryDraft;

use crate::api_error::ApiError;
use crate::query_types::{
    CategoriesQuery, CreateCategoryRequest, QueryParams, SuggestQuery, UpdateCategoryRequest,
};
use crate::response_types::Envelope;
use crate::AppState;

/// `?id=` returns one category record; otherwise the list of all names.
pub async fn get_categories(
    State(state): State<Arc<AppState>>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let query = CategoriesQuery::from(params);
    if let Some(id) = query.category_id()? {
        let category = state.category_service.get(id).await?;
        return Ok(Envelope::ok(category).into_response());
    }
    let names = state.category_service.list().await?;
    Ok(Envelope::ok(names).into_response())
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<Envelope<Category>, ApiError> {
    let Json(req) = body?;
    let category = state.category_service.create(&CategoryDraft::from(req)).await?;
    Ok(Envelope::ok(category))
}

pub async fn update_category(
    State(state): State<Arc<AppState>>,
    body: Result<Json<UpdateCategoryRequest>, JsonRejection>,
) -> Result<Envelope<Category>, ApiError> {
    let Json(req) = body?;
    let (id, changes) = req.into_parts()?;
    let category = state.category_service.update(id, &changes).await?;
    Ok(Envelope::ok(category))
}

pub async fn suggest_categories(
    State(state): State<Arc<AppState>>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Envelope<Vec<String>>, ApiError> {
    let Query(params) = params?;
    let query = SuggestQuery::from(params);
    let names = state.category_service.suggest(&query.q).await?;
    Ok(Envelope::ok(names))
}
