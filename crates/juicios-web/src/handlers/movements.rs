//! Handlers for a case's movements.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/movements/{case_id}` | 404 if the case is missing |
//! | `POST` | `/add_movement/{case_id}` | Multipart: `date`, `description`, optional `attachment` file |
//! | `GET`  | `/delete_movement/{movement_id}` | Redirects to `Referer`, else `/` |

use axum::{
  extract::{Multipart, Path, State},
  http::{HeaderMap, header},
  response::{Html, Redirect},
};
use bytes::Bytes;
use juicios_core::{CaseId, CaseStore, MovementId, NewMovement, attachment::is_pdf};

use crate::{AppState, error::Error, handlers::store_err, views};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /movements/{case_id}`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Path(case_id): Path<CaseId>,
) -> Result<Html<String>, Error>
where
  S: CaseStore + Clone + Send + Sync + 'static,
{
  let view = state
    .store
    .list_movements(case_id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| Error::NotFound(format!("juicio {case_id}")))?;
  Ok(Html(views::movements(&view)))
}

// ─── Add ──────────────────────────────────────────────────────────────────────

/// A file part with a non-empty client filename.
struct Upload {
  filename: String,
  data:     Bytes,
}

/// Fields of the add-movement form. Unknown parts are skipped.
#[derive(Default)]
struct MovementForm {
  date:        Option<String>,
  description: Option<String>,
  upload:      Option<Upload>,
}

impl MovementForm {
  async fn read(mut multipart: Multipart) -> Result<Self, Error> {
    let mut form = Self::default();
    while let Some(field) = multipart.next_field().await? {
      let name = field.name().map(str::to_owned);
      match name.as_deref() {
        Some("date") => form.date = Some(field.text().await?),
        Some("description") => form.description = Some(field.text().await?),
        Some("attachment") => {
          // Browsers send an empty, unnamed part when no file was chosen.
          let filename = field.file_name().unwrap_or_default().to_owned();
          let data = field.bytes().await?;
          if !filename.is_empty() {
            form.upload = Some(Upload { filename, data });
          }
        }
        _ => {}
      }
    }
    Ok(form)
  }
}

/// `POST /add_movement/{case_id}`
///
/// A file is kept only when its client filename ends in `.pdf`; anything
/// else is dropped and the movement is recorded without an attachment.
pub async fn add<S>(
  State(state): State<AppState<S>>,
  Path(case_id): Path<CaseId>,
  multipart: Multipart,
) -> Result<Redirect, Error>
where
  S: CaseStore + Clone + Send + Sync + 'static,
{
  let form = MovementForm::read(multipart).await?;
  let date = form
    .date
    .ok_or_else(|| Error::BadRequest("missing field `date`".into()))?;
  let description = form
    .description
    .ok_or_else(|| Error::BadRequest("missing field `description`".into()))?;

  let not_found = || Error::NotFound(format!("juicio {case_id}"));

  // Checked before touching the file store so a bad id leaves no file behind.
  state
    .store
    .get_case(case_id)
    .await
    .map_err(store_err)?
    .ok_or_else(not_found)?;

  let attachment = match form.upload {
    Some(upload) if is_pdf(&upload.filename) => {
      Some(state.files.save(&upload.filename, &upload.data).await?)
    }
    Some(upload) => {
      tracing::info!(case_id, filename = %upload.filename, "ignoring non-PDF upload");
      None
    }
    None => None,
  };

  let movement = state
    .store
    .add_movement(NewMovement { case_id, date, description, attachment })
    .await
    .map_err(store_err)?
    .ok_or_else(not_found)?;
  tracing::info!(
    case_id,
    movement_id = movement.id,
    attachment = movement.attachment.as_deref(),
    "movement added"
  );

  Ok(Redirect::to(&format!("/movements/{case_id}")))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `GET /delete_movement/{movement_id}`
///
/// Always succeeds, whether or not the movement existed.
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Path(movement_id): Path<MovementId>,
  headers: HeaderMap,
) -> Result<Redirect, Error>
where
  S: CaseStore + Clone + Send + Sync + 'static,
{
  state
    .store
    .delete_movement(movement_id)
    .await
    .map_err(store_err)?;
  tracing::info!(movement_id, "movement deleted");

  let back = headers
    .get(header::REFERER)
    .and_then(|v| v.to_str().ok())
    .unwrap_or("/");
  Ok(Redirect::to(back))
}
