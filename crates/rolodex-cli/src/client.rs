//! Async HTTP client wrapping the rolodex JSON API.
//!
//! One method per endpoint. Nothing is cached: every call goes to the server.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use rolodex_core::{Contact, ContactFields};

/// Connection settings for the rolodex API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the rolodex JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  pub fn base_url(&self) -> &str { &self.config.base_url }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// `GET /contacts`
  pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let resp = self
      .client
      .get(self.url("/contacts"))
      .send()
      .await
      .context("GET /contacts failed")?;

    check(resp, "GET /contacts")
      .await?
      .json()
      .await
      .context("deserialising contacts")
  }

  /// `POST /contacts` — returns the stored contact with its new `_id`.
  pub async fn create_contact(&self, fields: &ContactFields) -> Result<Contact> {
    let resp = self
      .client
      .post(self.url("/contacts"))
      .json(fields)
      .send()
      .await
      .context("POST /contacts failed")?;

    check(resp, "POST /contacts")
      .await?
      .json()
      .await
      .context("deserialising created contact")
  }

  /// `GET /contacts/:id` — `None` when the server answers `null`.
  ///
  /// `id` is passed through verbatim; the server rejects malformed ids.
  pub async fn get_contact(&self, id: &str) -> Result<Option<Contact>> {
    let resp = self
      .client
      .get(self.url(&format!("/contacts/{id}")))
      .send()
      .await
      .with_context(|| format!("GET /contacts/{id} failed"))?;

    check(resp, "GET /contacts/:id")
      .await?
      .json()
      .await
      .context("deserialising contact")
  }

  /// `PUT /contacts/:id` with the whole contact as body.
  pub async fn edit_contact(&self, contact: &Contact) -> Result<()> {
    tracing::debug!(id = %contact.id, "updating contact");
    let resp = self
      .client
      .put(self.url(&format!("/contacts/{}", contact.id)))
      .json(contact)
      .send()
      .await
      .with_context(|| format!("PUT /contacts/{} failed", contact.id))?;

    check(resp, "PUT /contacts/:id").await?;
    Ok(())
  }

  /// `DELETE /contacts/:id`
  pub async fn delete_contact(&self, id: &str) -> Result<()> {
    let resp = self
      .client
      .delete(self.url(&format!("/contacts/{id}")))
      .send()
      .await
      .with_context(|| format!("DELETE /contacts/{id} failed"))?;

    check(resp, "DELETE /contacts/:id").await?;
    Ok(())
  }
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn check(resp: Response, what: &str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let message = resp
    .json::<serde_json::Value>()
    .await
    .ok()
    .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned));
  match message {
    Some(m) => Err(anyhow!("{what} → {status}: {m}")),
    None => Err(anyhow!("{what} → {status}")),
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

/// Start a real API server on an ephemeral port and return a client for it.
#[cfg(test)]
pub(crate) async fn spawn_test_server() -> ApiClient {
  use std::sync::Arc;

  use rolodex_store_sqlite::SqliteStore;

  let store = SqliteStore::open_in_memory().await.unwrap();
  let app = rolodex_api::api_router(Arc::new(store));
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

  ApiClient::new(ApiConfig { base_url: format!("http://{addr}") }).unwrap()
}
