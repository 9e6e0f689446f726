//! Storage layer for habitlog
//!
//! SQLite behind an r2d2 pool. Synchronous methods live on [`Storage`];
//! the async traits in [`traits`] wrap them with `spawn_blocking` for use
//! from the service layer.

mod error;
mod migrations;
mod sqlite_async;
mod storage;
#[cfg(test)]
mod tests;
pub mod traits;

pub use error::StorageError;
pub use migrations::SCHEMA_VERSION;
pub use storage::{Storage, StorageStats};
