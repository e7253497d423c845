//! Shared constants for cardbox.

/// Maximum length of a category name, in characters.
pub const CATEGORY_NAME_MAX_LEN: usize = 100;

/// Maximum length of a card title, in characters.
pub const CARD_TITLE_MAX_LEN: usize = 255;

/// Default SQLite connection pool size.
pub const DEFAULT_DB_POOL_SIZE: u32 = 8;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// How many times a card write is attempted when the store reports a
/// write conflict.
pub const CARD_WRITE_ATTEMPTS: usize = 2;

/// Default port for `cardbox serve`.
pub const DEFAULT_HTTP_PORT: u16 = 8000;
