//! Contact — the sole persisted entity.
//!
//! A contact is a schema-less document with a handful of well-known fields
//! (`_id`, `firstName`, `lastName`, `createDate`). Everything else the client
//! sends is carried verbatim in the flattened `extra` map.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{Error, Result};

/// JSON keys owned by the server. Never accepted from a client payload.
pub const RESERVED_KEYS: [&str; 2] = ["_id", "createDate"];

// ─── Identifier ──────────────────────────────────────────────────────────────

/// Store-assigned identifier of a contact.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContactId(Uuid);

impl ContactId {
  /// Generate a fresh identifier.
  pub fn new() -> Self { Self(Uuid::new_v4()) }
}

impl Default for ContactId {
  fn default() -> Self { Self::new() }
}

impl From<Uuid> for ContactId {
  fn from(id: Uuid) -> Self { Self(id) }
}

impl fmt::Display for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.hyphenated())
  }
}

impl FromStr for ContactId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Uuid::parse_str(s)
      .map(Self)
      .map_err(|_| Error::InvalidId(s.to_owned()))
  }
}

// ─── Writable fields ─────────────────────────────────────────────────────────

/// The client-writable part of a contact; the body of create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactFields {
  #[serde(
    rename = "firstName",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub first_name: Option<String>,
  #[serde(
    rename = "lastName",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub last_name:  Option<String>,
  /// Arbitrary additional attributes supplied by the client.
  #[serde(flatten)]
  pub extra:      Map<String, Value>,
}

impl ContactFields {
  /// `true` if a non-empty first or last name is present.
  pub fn has_name(&self) -> bool {
    let present = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.is_empty());
    present(&self.first_name) || present(&self.last_name)
  }

  /// Fail with [`Error::MissingName`] unless [`has_name`](Self::has_name).
  pub fn require_name(&self) -> Result<()> {
    if self.has_name() { Ok(()) } else { Err(Error::MissingName) }
  }

  /// Drop the server-owned keys (`_id`, `createDate`) from `extra`.
  pub fn sanitized(mut self) -> Self {
    for key in RESERVED_KEYS {
      self.extra.remove(key);
    }
    self
  }
}

// ─── Stored document ─────────────────────────────────────────────────────────

/// A persisted contact as returned by the store and the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
  #[serde(rename = "_id")]
  pub id:          ContactId,
  #[serde(
    rename = "firstName",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub first_name:  Option<String>,
  #[serde(
    rename = "lastName",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub last_name:   Option<String>,
  /// Set by the server at insert time.
  #[serde(rename = "createDate")]
  pub create_date: DateTime<Utc>,
  #[serde(flatten)]
  pub extra:       Map<String, Value>,
}

impl Contact {
  /// Assemble a stored contact from its writable fields.
  pub fn from_fields(
    id: ContactId,
    create_date: DateTime<Utc>,
    fields: ContactFields,
  ) -> Self {
    let ContactFields { first_name, last_name, extra } = fields.sanitized();
    Self { id, first_name, last_name, create_date, extra }
  }

  /// The writable fields of this contact, e.g. for an update payload.
  pub fn fields(&self) -> ContactFields {
    ContactFields {
      first_name: self.first_name.clone(),
      last_name:  self.last_name.clone(),
      extra:      self.extra.clone(),
    }
  }

  /// "First Last", whichever parts are present.
  pub fn display_name(&self) -> String {
    [self.first_name.as_deref(), self.last_name.as_deref()]
      .into_iter()
      .flatten()
      .filter(|s| !s.is_empty())
      .collect::<Vec<_>>()
      .join(" ")
  }
}
