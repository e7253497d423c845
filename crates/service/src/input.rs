//! Caller-supplied write requests and their validation.
//!
//! Requests keep every field as [`Submitted`] so "left out" and "sent as
//! null" stay distinguishable until validation decides what each means.
//! Field values arrive as raw JSON; a value of the wrong type is reported
//! under its field like any other validation failure. Text values are
//! trimmed before they are checked or stored.

use cardbox_core::{
    CARD_TITLE_MAX_LEN, CATEGORY_NAME_MAX_LEN, CardPatch, CategoryPatch, FieldErrors, MSG_BLANK,
    MSG_NOT_A_STRING, MSG_NULL, MSG_REQUIRED, NewCard, NewCategory, canonical_category_names,
    title_case,
};
use serde_json::Value;

/// A request field as the client sent it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Submitted<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> From<Option<Option<T>>> for Submitted<T> {
    fn from(value: Option<Option<T>>) -> Self {
        match value {
            None => Self::Absent,
            Some(None) => Self::Null,
            Some(Some(v)) => Self::Value(v),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryDraft {
    pub name: Submitted<Value>,
    pub description: Submitted<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Submitted<Value>,
    pub description: Submitted<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct CardDraft {
    pub title: Submitted<Value>,
    pub description: Submitted<Value>,
    pub categories: Submitted<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct CardChanges {
    pub title: Submitted<Value>,
    pub description: Submitted<Value>,
    pub categories: Submitted<Value>,
}

/// Strings are trimmed and numbers rendered as text. Anything else is not
/// a string.
fn coerce_text(value: &Value) -> Result<String, &'static str> {
    match value {
        Value::String(s) => Ok(s.trim().to_owned()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Err(MSG_NULL),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => Err(MSG_NOT_A_STRING),
    }
}

/// Type name used in the "expected a list" message.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: &Submitted<Value>,
    max_len: usize,
) -> String {
    match value {
        Submitted::Absent => {
            errors.add(field, MSG_REQUIRED);
            String::new()
        },
        Submitted::Null => {
            errors.add(field, MSG_NULL);
            String::new()
        },
        Submitted::Value(v) => match coerce_text(v) {
            Ok(text) => {
                errors.check_present_text(field, &text, max_len);
                text
            },
            Err(msg) => {
                errors.add(field, msg);
                String::new()
            },
        },
    }
}

/// Like [`required_text`] but absence means "leave unchanged".
fn optional_text(
    errors: &mut FieldErrors,
    field: &str,
    value: &Submitted<Value>,
    max_len: usize,
) -> Option<String> {
    match value {
        Submitted::Absent => None,
        _ => Some(required_text(errors, field, value, max_len)),
    }
}

/// Free text that may be blank: no length limit, no blank check.
fn free_text(errors: &mut FieldErrors, field: &str, value: &Value) -> String {
    coerce_text(value).unwrap_or_else(|msg| {
        errors.add(field, msg);
        String::new()
    })
}

/// Validates a category name list and returns it title-cased and
/// deduplicated.
///
/// Item errors are reported under `field` as `"Item <index>: <message>"`.
/// The length limit applies to the canonical form, which can be longer than
/// what was sent.
fn canonical_names(errors: &mut FieldErrors, field: &str, value: &Value) -> Vec<String> {
    let Value::Array(items) = value else {
        errors.add(
            field,
            format!("Expected a list of items but got type \"{}\".", json_type_name(value)),
        );
        return Vec::new();
    };

    let mut names = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let name = match coerce_text(item) {
            Ok(name) => name,
            Err(msg) => {
                errors.add(field, format!("Item {index}: {msg}"));
                continue;
            },
        };
        if name.is_empty() {
            errors.add(field, format!("Item {index}: {MSG_BLANK}"));
        } else if title_case(&name).chars().count() > CATEGORY_NAME_MAX_LEN {
            errors.add(
                field,
                format!(
                    "Item {index}: Ensure this field has no more than {CATEGORY_NAME_MAX_LEN} characters."
                ),
            );
        }
        names.push(name);
    }
    canonical_category_names(&names)
}

impl CategoryDraft {
    pub fn validate(&self) -> Result<NewCategory, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = required_text(&mut errors, "name", &self.name, CATEGORY_NAME_MAX_LEN);
        let description = match &self.description {
            Submitted::Absent | Submitted::Null => None,
            Submitted::Value(d) => Some(free_text(&mut errors, "description", d)),
        };
        errors.into_result()?;
        Ok(NewCategory { name, description })
    }
}

impl CategoryChanges {
    pub fn validate(&self) -> Result<CategoryPatch, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = optional_text(&mut errors, "name", &self.name, CATEGORY_NAME_MAX_LEN);
        let description = match &self.description {
            Submitted::Absent => None,
            Submitted::Null => Some(None),
            Submitted::Value(d) => Some(Some(free_text(&mut errors, "description", d))),
        };
        errors.into_result()?;
        Ok(CategoryPatch { name, description })
    }
}

impl CardDraft {
    pub fn validate(&self) -> Result<NewCard, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = required_text(&mut errors, "title", &self.title, CARD_TITLE_MAX_LEN);
        let description = match &self.description {
            Submitted::Absent => String::new(),
            Submitted::Null => {
                errors.add("description", MSG_NULL);
                String::new()
            },
            Submitted::Value(d) => free_text(&mut errors, "description", d),
        };
        let category_names = match &self.categories {
            Submitted::Absent => Vec::new(),
            Submitted::Null => {
                errors.add("categories", MSG_NULL);
                Vec::new()
            },
            Submitted::Value(names) => canonical_names(&mut errors, "categories", names),
        };
        errors.into_result()?;
        Ok(NewCard { title, description, category_names })
    }
}

impl CardChanges {
    pub fn validate(&self) -> Result<CardPatch, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = optional_text(&mut errors, "title", &self.title, CARD_TITLE_MAX_LEN);
        let description = match &self.description {
            Submitted::Absent => None,
            Submitted::Null => {
                errors.add("description", MSG_NULL);
                None
            },
            Submitted::Value(d) => Some(free_text(&mut errors, "description", d)),
        };
        let category_names = match &self.categories {
            Submitted::Absent => None,
            Submitted::Null => {
                errors.add("categories", MSG_NULL);
                None
            },
            Submitted::Value(names) => Some(canonical_names(&mut errors, "categories", names)),
        };
        errors.into_result()?;
        Ok(CardPatch { title, description, category_names })
    }
}
