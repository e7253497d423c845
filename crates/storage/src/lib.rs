//! Storage layer for cardbox
//!
//! Categories, cards and their association behind the [`CategoryStore`] and
//! [`CardStore`] traits. `SQLite` (default) and `PostgreSQL` backends are
//! selected through [`StorageBackend`].

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]

#[cfg(not(any(feature = "sqlite", feature = "postgres")))]
compile_error!("cardbox-storage needs at least one of the `sqlite` or `postgres` features");

mod backend;
pub mod error;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
mod pg_storage;
pub mod traits;

#[cfg(feature = "sqlite")]
mod migrations;
#[cfg(feature = "sqlite")]
mod sqlite_async;
#[cfg(feature = "sqlite")]
mod storage;
#[cfg(all(test, feature = "sqlite"))]
mod tests;

pub use backend::StorageBackend;
pub use error::StorageError;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
#[cfg(feature = "sqlite")]
pub use storage::Storage;
pub use traits::{CardStore, CategoryStore};
