//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use rolodex_core::{Contact, ContactFields, ContactId, store::ContactStore};

use crate::{
  Result,
  encode::{RawContact, encode_document, encode_dt, encode_id},
  schema::SCHEMA,
};

/// URI that selects a private in-memory database.
pub const MEMORY_URI: &str = "sqlite::memory:";

// ─── Store ───────────────────────────────────────────────────────────────────

/// The contact collection backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open the store named by a connection string.
  ///
  /// Accepts `sqlite::memory:`, `sqlite://<path>` or a bare path. A leading
  /// `~/` in the path is expanded to `$HOME`.
  pub async fn connect(uri: &str) -> Result<Self> {
    match store_path(uri) {
      None => Self::open_in_memory().await,
      Some(path) => Self::open(path).await,
    }
  }

  /// Flush and close the underlying connection.
  ///
  /// Other clones of this store fail with a closed-connection error afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Resolve a connection string to a database path; `None` means in-memory.
fn store_path(uri: &str) -> Option<PathBuf> {
  if uri == MEMORY_URI || uri == ":memory:" {
    return None;
  }
  let path = uri.strip_prefix("sqlite://").unwrap_or(uri);
  Some(expand_tilde(Path::new(path)))
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  async fn list(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT contact_id, created_at, document FROM contacts ORDER BY seq",
        )?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn insert(&self, fields: ContactFields) -> Result<Contact> {
    let contact = Contact::from_fields(ContactId::new(), Utc::now(), fields);

    let id_str   = encode_id(contact.id);
    let at_str   = encode_dt(contact.create_date);
    let document = encode_document(contact.fields())?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (contact_id, created_at, document) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, at_str, document],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(id = %contact.id, "inserted contact");
    Ok(contact)
  }

  async fn get(&self, id: ContactId) -> Result<Option<Contact>> {
    let id_str = encode_id(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT contact_id, created_at, document FROM contacts WHERE contact_id = ?1",
              rusqlite::params![id_str],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn update(&self, id: ContactId, fields: ContactFields) -> Result<bool> {
    let id_str   = encode_id(id);
    let document = encode_document(fields)?;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE contacts SET document = ?2 WHERE contact_id = ?1",
          rusqlite::params![id_str, document],
        )?)
      })
      .await?;

    tracing::debug!(%id, matched = changed > 0, "updated contact");
    Ok(changed > 0)
  }

  async fn delete(&self, id: ContactId) -> Result<bool> {
    let id_str = encode_id(id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM contacts WHERE contact_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    tracing::debug!(%id, matched = changed > 0, "deleted contact");
    Ok(changed > 0)
  }
}
