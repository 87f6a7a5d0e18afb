//! SQLite document store for Rolodex contacts.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Each contact is stored as a JSON
//! document keyed by its id.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{MEMORY_URI, SqliteStore};
