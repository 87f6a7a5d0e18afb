//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | All contacts, insertion order |
//! | `POST`   | `/contacts` | Body: contact fields; 400 without a name; 201 + stored contact |
//! | `GET`    | `/contacts/:id` | 200 + contact, or 200 + `null` if unknown |
//! | `PUT`    | `/contacts/:id` | Body: replacement fields, `_id` ignored; 204 |
//! | `DELETE` | `/contacts/:id` | 204 whether or not the contact existed |
//!
//! A malformed `:id` is reported like any other store failure (500). A body
//! that does not parse as contact fields is a 400.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use rolodex_core::{Contact, ContactFields, ContactId, store::ContactStore};

use crate::error::ApiError;

const LIST_FAILED: &str = "Failed to get contacts.";
const CREATE_FAILED: &str = "Failed to create new contact.";
const MISSING_NAME: &str = "Please provide a first- or last name.";
const GET_FAILED: &str = "Could not get the contact.";
const UPDATE_FAILED: &str = "Failed to update the contact.";
const DELETE_FAILED: &str = "Failed to delete the contact.";

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  let contacts = store.list().await.map_err(ApiError::store(LIST_FAILED))?;
  Ok(Json(contacts))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts` — returns 201 + the stored [`Contact`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<ContactFields>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  let Json(fields) = body?;
  fields.require_name().map_err(|e| ApiError::BadRequest {
    reason:  e.to_string(),
    message: MISSING_NAME,
  })?;

  let contact = store
    .insert(fields)
    .await
    .map_err(ApiError::store(CREATE_FAILED))?;
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/:id` — an unknown id yields `null`, not 404.
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Option<Contact>>, ApiError>
where
  S: ContactStore,
{
  let id: ContactId = id.parse().map_err(ApiError::store(GET_FAILED))?;
  let contact = store.get(id).await.map_err(ApiError::store(GET_FAILED))?;
  Ok(Json(contact))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /contacts/:id` — full replacement of the writable fields.
///
/// Any `_id` in the body is dropped by the store before writing.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  body: Result<Json<ContactFields>, JsonRejection>,
) -> Result<StatusCode, ApiError>
where
  S: ContactStore,
{
  let Json(fields) = body?;
  let id: ContactId = id.parse().map_err(ApiError::store(UPDATE_FAILED))?;
  store
    .update(id, fields)
    .await
    .map_err(ApiError::store(UPDATE_FAILED))?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/:id`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: ContactStore,
{
  let id: ContactId = id.parse().map_err(ApiError::store(DELETE_FAILED))?;
  store
    .delete(id)
    .await
    .map_err(ApiError::store(DELETE_FAILED))?;
  Ok(StatusCode::NO_CONTENT)
}
