//! SQL schema for the Rolodex SQLite store.
//!
//! Executed once at connection startup. The schema version is recorded in
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per contact document. `seq` preserves insertion order.
CREATE TABLE IF NOT EXISTS contacts (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    contact_id  TEXT NOT NULL UNIQUE,  -- hyphenated UUID; store-assigned
    created_at  TEXT NOT NULL,         -- ISO 8601 UTC; server-assigned
    document    TEXT NOT NULL          -- JSON object of client-writable fields
);

PRAGMA user_version = 1;
";
