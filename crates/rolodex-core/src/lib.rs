//! Core types and trait definitions for the Rolodex contact store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod contact;
pub mod error;
pub mod store;

pub use contact::{Contact, ContactFields, ContactId};
pub use error::{Error, Result};
