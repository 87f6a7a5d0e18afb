//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! This is the single error responder for every handler: the underlying
//! reason is logged server-side, the client only sees a short message.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub(crate) const INVALID_BODY: &str = "Invalid contact data.";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Client input rejected before the store was touched.
  #[error("bad request: {reason}")]
  BadRequest {
    reason:  String,
    message: &'static str,
  },

  /// The store (or the id conversion in front of it) failed.
  #[error("store error: {source}")]
  Store {
    message: &'static str,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Adapter for `map_err` that wraps any error as [`ApiError::Store`].
  pub fn store<E>(message: &'static str) -> impl FnOnce(E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    move |e| ApiError::Store { message, source: Box::new(e) }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
      ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// The client-facing message.
  pub fn message(&self) -> &'static str {
    match self {
      ApiError::BadRequest { message, .. } | ApiError::Store { message, .. } => *message,
    }
  }
}

/// Body the handlers could not read as contact fields: malformed JSON, a
/// missing content type, or a name that is not a string.
impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest {
      reason:  rejection.body_text(),
      message: INVALID_BODY,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    tracing::error!(status = status.as_u16(), reason = %self, "{}", self.message());
    (status, Json(json!({ "error": self.message() }))).into_response()
  }
}
