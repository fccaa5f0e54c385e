//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::views;

#[derive(Debug, Error)]
pub enum Error {
  /// A case, movement or uploaded file that does not exist.
  #[error("not found: {0}")]
  NotFound(String),
  #[error("bad request: {0}")]
  BadRequest(String),
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("export error: {0}")]
  Export(#[from] juicios_export::Error),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<axum::extract::multipart::MultipartError> for Error {
  fn from(e: axum::extract::multipart::MultipartError) -> Self {
    Error::BadRequest(e.body_text())
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::NotFound(what) => {
        (StatusCode::NOT_FOUND, Html(views::not_found(&what))).into_response()
      }
      Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
      e @ (Error::Io(_) | Error::Export(_) | Error::Store(_)) => {
        tracing::error!(error = %e, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
      }
    }
  }
}
