//! Request/query types (Deserialize)

use std::str::FromStr;

use cardbox_core::{CardId, CategoryId, ParseIdError};
use cardbox_service::{CardChanges, CardDraft, CategoryChanges, CategoryDraft, Submitted};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::api_error::{ApiError, ID_REQUIRED_MESSAGE};

/// Keeps "field sent as null" apart from "field left out": absent stays
/// `None` through `#[serde(default)]`, anything present becomes `Some`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Empty query values (`?id=`) count as not given.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_param<T>(value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr<Err = ParseIdError>,
{
    Ok(non_empty(value).map(str::parse::<T>).transpose()?)
}

/// Raw query-string pairs in request order. A repeated key resolves to its
/// last value.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    fn last(&self, key: &str) -> Option<String> {
        self.0.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }
}

#[derive(Debug, Default)]
pub struct CardsQuery {
    pub id: Option<String>,
    pub category: Option<String>,
}

impl From<QueryParams> for CardsQuery {
    fn from(params: QueryParams) -> Self {
        Self { id: params.last("id"), category: params.last("category") }
    }
}

impl CardsQuery {
    pub fn card_id(&self) -> Result<Option<CardId>, ApiError> {
        parse_param(self.id.as_deref())
    }

    pub fn category_id(&self) -> Result<Option<CategoryId>, ApiError> {
        parse_param(self.category.as_deref())
    }
}

#[derive(Debug, Default)]
pub struct CategoriesQuery {
    pub id: Option<String>,
}

impl From<QueryParams> for CategoriesQuery {
    fn from(params: QueryParams) -> Self {
        Self { id: params.last("id") }
    }
}

impl CategoriesQuery {
    pub fn category_id(&self) -> Result<Option<CategoryId>, ApiError> {
        parse_param(self.id.as_deref())
    }
}

#[derive(Debug, Default)]
pub struct SuggestQuery {
    pub q: String,
}

impl From<QueryParams> for SuggestQuery {
    fn from(params: QueryParams) -> Self {
        Self { q: params.last("q").unwrap_or_default() }
    }
}

/// A record id in a JSON body, sent either as a number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BodyId {
    Number(i64),
    Text(String),
}

impl BodyId {
    fn parse<T: FromStr<Err = ParseIdError>>(&self) -> Result<T, ApiError> {
        match self {
            Self::Number(n) => Ok(n.to_string().parse::<T>()?),
            Self::Text(s) if s.trim().is_empty() => {
                Err(ApiError::BadRequest(ID_REQUIRED_MESSAGE.to_owned()))
            },
            Self::Text(s) => Ok(s.parse()?),
        }
    }
}

fn required_id<T: FromStr<Err = ParseIdError>>(id: Option<&BodyId>) -> Result<T, ApiError> {
    match id {
        Some(id) => id.parse(),
        None => Err(ApiError::BadRequest(ID_REQUIRED_MESSAGE.to_owned())),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<Value>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<Value>>,
}

impl From<CreateCategoryRequest> for CategoryDraft {
    fn from(req: CreateCategoryRequest) -> Self {
        Self { name: Submitted::from(req.name), description: Submitted::from(req.description) }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub id: Option<BodyId>,
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<Value>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<Value>>,
}

impl UpdateCategoryRequest {
    /// Splits the request into the target id and the field changes.
    pub fn into_parts(self) -> Result<(CategoryId, CategoryChanges), ApiError> {
        let id = required_id(self.id.as_ref())?;
        let changes = CategoryChanges {
            name: Submitted::from(self.name),
            description: Submitted::from(self.description),
        };
        Ok((id, changes))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateCardRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<Value>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<Value>>,
    #[serde(default, deserialize_with = "double_option")]
    pub categories: Option<Option<Value>>,
}

impl From<CreateCardRequest> for CardDraft {
    fn from(req: CreateCardRequest) -> Self {
        Self {
            title: Submitted::from(req.title),
            description: Submitted::from(req.description),
            categories: Submitted::from(req.categories),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCardRequest {
    #[serde(default)]
    pub id: Option<BodyId>,
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<Value>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<Value>>,
    #[serde(default, deserialize_with = "double_option")]
    pub categories: Option<Option<Value>>,
}

impl UpdateCardRequest {
    pub fn into_parts(self) -> Result<(CardId, CardChanges), ApiError> {
        let id = required_id(self.id.as_ref())?;
        let changes = CardChanges {
            title: Submitted::from(self.title),
            description: Submitted::from(self.description),
            categories: Submitted::from(self.categories),
        };
        Ok((id, changes))
    }
}
