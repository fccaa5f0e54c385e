//! `GET /export` downloads every case and movement as a spreadsheet.

use axum::{
  extract::State,
  http::header,
  response::{IntoResponse, Response},
};
use juicios_core::CaseStore;

use crate::{AppState, error::Error, handlers::store_err};

const DEFAULT_FILENAME: &str = "Juicios_Report.xlsx";

/// Writes the workbook to the configured `export_path`, replacing any earlier
/// export, and returns the same bytes as an attachment.
pub async fn download<S>(State(state): State<AppState<S>>) -> Result<Response, Error>
where
  S: CaseStore + Clone + Send + Sync + 'static,
{
  let snapshot = state.store.snapshot().await.map_err(store_err)?;
  let bytes = juicios_export::to_xlsx(&snapshot)?;

  let path = &state.config.export_path;
  tokio::fs::write(path, &bytes).await?;
  tracing::info!(
    cases = snapshot.cases.len(),
    movements = snapshot.movements.len(),
    path = %path.display(),
    "exported spreadsheet"
  );

  let filename = path
    .file_name()
    .and_then(|n| n.to_str())
    .unwrap_or(DEFAULT_FILENAME);

  Ok(
    (
      [
        (header::CONTENT_TYPE, juicios_export::CONTENT_TYPE.to_owned()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
      ],
      bytes,
    )
      .into_response(),
  )
}
