//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, ids as hyphenated lowercase
//! UUIDs, and the writable part of a contact as a compact JSON object.

use chrono::{DateTime, Utc};
use rolodex_core::{Contact, ContactFields, ContactId};
use serde_json::Value;

use crate::{Error, Result};

// ─── ContactId ────────────────────────────────────────────────────────────────

pub fn encode_id(id: ContactId) -> String { id.to_string() }

pub fn decode_id(s: &str) -> Result<ContactId> { Ok(s.parse::<ContactId>()?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Document ─────────────────────────────────────────────────────────────────

/// Serialise the writable fields, minus any server-owned keys.
pub fn encode_document(fields: ContactFields) -> Result<String> {
  Ok(serde_json::to_string(&fields.sanitized())?)
}

pub fn decode_document(contact_id: &str, s: &str) -> Result<ContactFields> {
  let value: Value = serde_json::from_str(s)?;
  if !value.is_object() {
    return Err(Error::InvalidDocument(contact_id.to_owned()));
  }
  Ok(serde_json::from_value(value)?)
}

// ─── Raw rows ─────────────────────────────────────────────────────────────────

/// Raw strings read directly from a `contacts` row.
pub struct RawContact {
  pub contact_id: String,
  pub created_at: String,
  pub document:   String,
}

impl RawContact {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      contact_id: row.get(0)?,
      created_at: row.get(1)?,
      document:   row.get(2)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    let fields = decode_document(&self.contact_id, &self.document)?;
    Ok(Contact::from_fields(
      decode_id(&self.contact_id)?,
      decode_dt(&self.created_at)?,
      fields,
    ))
  }
}
