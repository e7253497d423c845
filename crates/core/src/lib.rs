//! Core types for cardbox
//!
//! Domain entities, write inputs and validation primitives shared by the
//! storage, service and HTTP crates. Nothing here touches a database.

mod card;
mod category;
mod constants;
mod env_config;
mod error;
mod title_case;
mod validation;

pub use card::*;
pub use category::*;
pub use constants::*;
pub use env_config::env_parse_with_default;
pub use error::*;
pub use title_case::{canonical_category_names, title_case};
pub use validation::{FieldErrors, MSG_BLANK, MSG_NOT_A_STRING, MSG_NULL, MSG_REQUIRED};
