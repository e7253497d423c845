//! Storage backend trait abstraction
//!
//! Async domain traits implemented by every backend, so services never see
//! which database sits underneath.

pub mod card;
pub mod category;

pub use card::CardStore;
pub use category::CategoryStore;
