//! Error types for `rolodex-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid contact id: {0:?}")]
  InvalidId(String),

  #[error("a contact needs a first or last name")]
  MissingName,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
