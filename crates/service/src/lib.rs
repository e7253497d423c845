//! Service layer for cardbox
//!
//! Validation, category name canonicalization and write retries between the
//! HTTP/CLI front ends and storage.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod card_service;
mod category_service;
pub mod error;
mod input;
#[cfg(test)]
mod tests;

pub use card_service::CardService;
pub use category_service::CategoryService;
pub use error::ServiceError;
pub use input::{CardChanges, CardDraft, CategoryChanges, CategoryDraft, Submitted};
