//! `GET /uploads/{filename}` serves a stored attachment.

use axum::{
  extract::{Path, State},
  http::header,
  response::{IntoResponse, Response},
};
use juicios_core::CaseStore;

use crate::{AppState, error::Error, handlers::store_err};

pub async fn download<S>(
  State(state): State<AppState<S>>,
  Path(filename): Path<String>,
) -> Result<Response, Error>
where
  S: CaseStore + Clone + Send + Sync + 'static,
{
  let data = state
    .files
    .read(&filename)
    .await?
    .ok_or_else(|| Error::NotFound(format!("archivo {filename}")))?;

  // Safe to quote: display names are sanitized on upload and `filename`
  // passed the same check in `read`.
  let display = state
    .store
    .attachment_name(filename.clone())
    .await
    .map_err(store_err)?
    .unwrap_or(filename);

  Ok(
    (
      [
        (header::CONTENT_TYPE, "application/pdf".to_owned()),
        (header::CONTENT_DISPOSITION, format!("inline; filename=\"{display}\"")),
      ],
      data,
    )
      .into_response(),
  )
}
