//! JSON REST API for Rolodex.
//!
//! Exposes an axum [`Router`] backed by any [`rolodex_core::store::ContactStore`].
//! Static files, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! Router::new().merge(rolodex_api::api_router(store.clone()))
//! ```

pub mod contacts;
pub mod error;

use std::sync::Arc;

use axum::{Router, routing::get};
use rolodex_core::store::ContactStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ContactStore + 'static,
{
  Router::new()
    .route(
      "/contacts",
      get(contacts::list::<S>).post(contacts::create::<S>),
    )
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::update::<S>)
        .delete(contacts::delete::<S>),
    )
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use rolodex_core::{Contact, ContactFields, ContactId};
  use rolodex_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_router() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app:    Router,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_empty_returns_empty_array() {
    let app = make_router().await;
    let (status, body) = send(app, "GET", "/contacts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
  }

  #[tokio::test]
  async fn list_returns_contacts_in_insertion_order() {
    let app = make_router().await;
    for name in ["Ada", "Grace", "Barbara"] {
      send(app.clone(), "POST", "/contacts", Some(json!({ "firstName": name }))).await;
    }

    let (status, body) = send(app, "GET", "/contacts", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|c| c["firstName"].as_str().unwrap())
      .collect();
    assert_eq!(names, ["Ada", "Grace", "Barbara"]);
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_201_with_generated_fields() {
    let app = make_router().await;
    let (status, body) = send(
      app,
      "POST",
      "/contacts",
      Some(json!({ "firstName": "Ada", "email": "ada@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["firstName"], "Ada");
    assert_eq!(body["email"], "ada@example.com");
    assert!(body["_id"].as_str().unwrap().parse::<ContactId>().is_ok());
    assert!(body["createDate"].is_string());
  }

  #[tokio::test]
  async fn create_without_name_returns_400_and_persists_nothing() {
    let app = make_router().await;

    for payload in [
      json!({ "email": "nobody@example.com" }),
      json!({ "firstName": "", "lastName": "" }),
    ] {
      let (status, body) = send(app.clone(), "POST", "/contacts", Some(payload)).await;
      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert_eq!(body, json!({ "error": "Please provide a first- or last name." }));
    }

    let (_, list) = send(app, "GET", "/contacts", None).await;
    assert_eq!(list, json!([]));
  }

  #[tokio::test]
  async fn create_with_only_last_name_is_accepted() {
    let app = make_router().await;
    let (status, body) =
      send(app, "POST", "/contacts", Some(json!({ "lastName": "Hopper" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["lastName"], "Hopper");
    assert!(body.get("firstName").is_none());
  }

  #[tokio::test]
  async fn create_with_malformed_json_is_rejected() {
    let app = make_router().await;
    let req = Request::builder()
      .method("POST")
      .uri("/contacts")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": crate::error::INVALID_BODY }));

    let (_, list) = send(app, "GET", "/contacts", None).await;
    assert_eq!(list, json!([]));
  }

  #[tokio::test]
  async fn create_without_content_type_is_400_json() {
    let app = make_router().await;
    let req = Request::builder()
      .method("POST")
      .uri("/contacts")
      .body(Body::from(r#"{"firstName":"Ada"}"#))
      .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": crate::error::INVALID_BODY }));

    let (_, list) = send(app, "GET", "/contacts", None).await;
    assert_eq!(list, json!([]));
  }

  #[tokio::test]
  async fn non_string_names_are_400_json() {
    let app = make_router().await;

    for bad in [
      json!({ "firstName": 42 }),
      json!({ "firstName": "Ada", "lastName": { "x": 1 } }),
    ] {
      let (status, body) = send(app.clone(), "POST", "/contacts", Some(bad)).await;
      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert_eq!(body, json!({ "error": crate::error::INVALID_BODY }));
    }

    let (_, created) = send(
      app.clone(),
      "POST",
      "/contacts",
      Some(json!({ "firstName": "Ada" })),
    )
    .await;
    let uri = format!("/contacts/{}", created["_id"].as_str().unwrap());

    let (status, body) =
      send(app.clone(), "PUT", &uri, Some(json!({ "lastName": 7 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": crate::error::INVALID_BODY }));

    let (_, stored) = send(app, "GET", &uri, None).await;
    assert_eq!(stored["firstName"], "Ada");
    assert!(stored.get("lastName").is_none());
  }

  // ── Get one ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_unknown_id_returns_200_null() {
    let app = make_router().await;
    let (status, body) =
      send(app, "GET", &format!("/contacts/{}", ContactId::new()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
  }

  #[tokio::test]
  async fn malformed_id_returns_500() {
    let app = make_router().await;

    let (status, body) = send(app.clone(), "GET", "/contacts/not-an-id", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Could not get the contact." }));

    let (status, _) = send(
      app.clone(),
      "PUT",
      "/contacts/not-an-id",
      Some(json!({ "firstName": "X" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(app, "DELETE", "/contacts/not-an-id", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  }

  // ── Update ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_ignores_id_in_body() {
    let app = make_router().await;
    let (_, created) =
      send(app.clone(), "POST", "/contacts", Some(json!({ "firstName": "Ada" }))).await;
    let id = created["_id"].as_str().unwrap().to_owned();
    let forged = ContactId::new().to_string();

    let (status, body) = send(
      app.clone(),
      "PUT",
      &format!("/contacts/{id}"),
      Some(json!({ "_id": forged, "firstName": "Ada", "lastName": "Lovelace" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, fetched) = send(app.clone(), "GET", &format!("/contacts/{id}"), None).await;
    assert_eq!(fetched["_id"], id);
    assert_eq!(fetched["lastName"], "Lovelace");
    assert_eq!(fetched["createDate"], created["createDate"]);

    let (_, ghost) = send(app, "GET", &format!("/contacts/{forged}"), None).await;
    assert_eq!(ghost, Value::Null);
  }

  #[tokio::test]
  async fn update_unknown_id_returns_204() {
    let app = make_router().await;
    let (status, _) = send(
      app,
      "PUT",
      &format!("/contacts/{}", ContactId::new()),
      Some(json!({ "firstName": "Nobody" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_nonexistent_returns_204() {
    let app = make_router().await;
    let (status, body) =
      send(app, "DELETE", &format!("/contacts/{}", ContactId::new()), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
  }

  // ── End to end ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_get_update_delete_roundtrip() {
    let app = make_router().await;

    let (status, created) =
      send(app.clone(), "POST", "/contacts", Some(json!({ "firstName": "Ada" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Contact = serde_json::from_value(created).unwrap();
    let uri = format!("/contacts/{}", created.id);

    let (status, fetched) = send(app.clone(), "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_value::<Contact>(fetched).unwrap(), created);

    let (status, _) = send(
      app.clone(),
      "PUT",
      &uri,
      Some(json!({ "firstName": "Ada", "lastName": "Lovelace" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, fetched) = send(app.clone(), "GET", &uri, None).await;
    let fetched: Contact = serde_json::from_value(fetched).unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.last_name.as_deref(), Some("Lovelace"));

    let (status, _) = send(app.clone(), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, gone) = send(app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gone, Value::Null);
  }

  // ── Store failures ──────────────────────────────────────────────────────────

  #[derive(Debug, thiserror::Error)]
  #[error("connection reset by peer")]
  struct Offline;

  /// A store whose every operation fails.
  struct OfflineStore;

  impl ContactStore for OfflineStore {
    type Error = Offline;

    async fn list(&self) -> Result<Vec<Contact>, Offline> { Err(Offline) }

    async fn insert(&self, _: ContactFields) -> Result<Contact, Offline> { Err(Offline) }

    async fn get(&self, _: ContactId) -> Result<Option<Contact>, Offline> { Err(Offline) }

    async fn update(&self, _: ContactId, _: ContactFields) -> Result<bool, Offline> {
      Err(Offline)
    }

    async fn delete(&self, _: ContactId) -> Result<bool, Offline> { Err(Offline) }
  }

  #[tokio::test]
  async fn store_failures_return_500_with_generic_message() {
    let app = api_router(Arc::new(OfflineStore));
    let id = ContactId::new();

    let cases = [
      ("GET", "/contacts".to_owned(), None, "Failed to get contacts."),
      (
        "POST",
        "/contacts".to_owned(),
        Some(json!({ "firstName": "Ada" })),
        "Failed to create new contact.",
      ),
      ("GET", format!("/contacts/{id}"), None, "Could not get the contact."),
      (
        "PUT",
        format!("/contacts/{id}"),
        Some(json!({ "firstName": "Ada" })),
        "Failed to update the contact.",
      ),
      ("DELETE", format!("/contacts/{id}"), None, "Failed to delete the contact."),
    ];

    for (method, uri, body, message) in cases {
      let (status, body) = send(app.clone(), method, &uri, body).await;
      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
      assert_eq!(body, json!({ "error": message }), "{method} {uri}");
    }
  }

  #[tokio::test]
  async fn validation_runs_before_the_store() {
    let app = api_router(Arc::new(OfflineStore));
    let (status, _) = send(app, "POST", "/contacts", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }
}
