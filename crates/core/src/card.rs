//! Card entity and its write inputs.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ParseIdError;

/// Database identifier of a [`Card`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "sqlx-types", derive(sqlx::Type), sqlx(transparent))]
pub struct CardId(pub i64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CardId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ParseIdError { entity: "card", value: s.to_owned() })
    }
}

/// A card together with the names of the categories it is filed under.
///
/// Category names are resolved by the store and ordered by category id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    pub description: String,
    #[serde(rename = "categories_names")]
    pub category_names: Vec<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Input for card creation as the store receives it.
///
/// `category_names` must already be canonical and free of duplicates; the
/// store looks each one up by exact name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub title: String,
    pub description: String,
    pub category_names: Vec<String>,
}

/// Partial update of a card. `None` leaves the field untouched.
///
/// `category_names: Some(..)` replaces the whole association set, so
/// `Some(vec![])` detaches every category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_names: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_serializes_category_names_under_wire_key() {
        let now = Utc::now();
        let card = Card {
            id: CardId(1),
            title: "Borrow checker".to_owned(),
            description: String::new(),
            category_names: vec!["Rust".to_owned()],
            created: now,
            updated: now,
        };
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["categories_names"][0], "Rust");
        assert!(value.get("category_names").is_none());
    }

    #[test]
    fn card_id_rejects_negative_garbage() {
        assert!("-x".parse::<CardId>().is_err());
        assert_eq!("999999".parse::<CardId>(), Ok(CardId(999_999)));
    }
}
