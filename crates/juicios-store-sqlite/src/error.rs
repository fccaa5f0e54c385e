//! Error type for `juicios-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A forward-compatible column could not be added for a reason other than
  /// it already being there.
  #[error("failed to add column {table}.{column}: {source}")]
  AddColumn {
    table:  &'static str,
    column: &'static str,
    #[source]
    source: rusqlite::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
