//! The `ContactStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `rolodex-store-sqlite`).
//! Higher layers (`rolodex-api`, `rolodex-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::contact::{Contact, ContactFields, ContactId};

/// Abstraction over the document store holding the contact collection.
///
/// Every operation touches at most one document and is atomic at that level.
/// Nothing spans multiple documents.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All contacts, in insertion order.
  fn list(&self) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Persist a new contact and return the stored document.
  ///
  /// The identifier and `create_date` are assigned by the store. Server-owned
  /// keys in `fields.extra` are discarded. No name check happens here.
  fn insert(
    &self,
    fields: ContactFields,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn get(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Replace the writable fields of a contact.
  ///
  /// The stored `id` and `create_date` are never altered. Returns `false` if
  /// no contact matched.
  fn update(
    &self,
    id: ContactId,
    fields: ContactFields,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Remove a contact. Returns `false` if no contact matched.
  fn delete(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
