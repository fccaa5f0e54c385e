//! Handlers for the case list and the create/edit forms.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Optional `?search=` substring filter |
//! | `POST` | `/add` | Form: [`NewCaseForm`]; redirects to `/` |
//! | `GET`  | `/edit/{case_id}` | Edit form; 404 if missing |
//! | `POST` | `/edit/{case_id}` | Form: [`EditCaseForm`]; appends a movement; redirects to `/` |

use axum::{
  Form,
  extract::{Path, Query, State},
  response::{Html, Redirect},
};
use juicios_core::{CaseId, CaseStore, CaseUpdate, NewCase};
use serde::Deserialize;

use crate::{AppState, error::Error, handlers::store_err, views};

// ─── List / search ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct IndexParams {
  #[serde(default)]
  pub search: String,
}

/// `GET /[?search=...]`
pub async fn index<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<IndexParams>,
) -> Result<Html<String>, Error>
where
  S: CaseStore + Clone + Send + Sync + 'static,
{
  let cases = state
    .store
    .list_cases(Some(params.search.clone()))
    .await
    .map_err(store_err)?;
  Ok(Html(views::index(&cases, &params.search)))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NewCaseForm {
  pub case_number:   String,
  pub caption:       String,
  pub topic:         String,
  pub last_movement: Option<String>,
}

impl From<NewCaseForm> for NewCase {
  fn from(f: NewCaseForm) -> Self {
    NewCase {
      case_number:   f.case_number,
      caption:       f.caption,
      topic:         f.topic,
      last_movement: f.last_movement,
    }
  }
}

/// `POST /add`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Form(form): Form<NewCaseForm>,
) -> Result<Redirect, Error>
where
  S: CaseStore + Clone + Send + Sync + 'static,
{
  let case = state
    .store
    .create_case(NewCase::from(form))
    .await
    .map_err(store_err)?;
  tracing::info!(case_id = case.id, case_number = %case.case_number, "case created");
  Ok(Redirect::to("/"))
}

// ─── Edit ─────────────────────────────────────────────────────────────────────

/// `GET /edit/{case_id}`
pub async fn edit_form<S>(
  State(state): State<AppState<S>>,
  Path(case_id): Path<CaseId>,
) -> Result<Html<String>, Error>
where
  S: CaseStore + Clone + Send + Sync + 'static,
{
  let case = state
    .store
    .get_case(case_id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| Error::NotFound(format!("juicio {case_id}")))?;
  Ok(Html(views::edit(&case)))
}

#[derive(Debug, Deserialize)]
pub struct EditCaseForm {
  pub case_number:   String,
  pub caption:       String,
  pub topic:         String,
  pub last_movement: String,
}

impl From<EditCaseForm> for CaseUpdate {
  fn from(f: EditCaseForm) -> Self {
    CaseUpdate {
      case_number:   f.case_number,
      caption:       f.caption,
      topic:         f.topic,
      last_movement: f.last_movement,
    }
  }
}

/// `POST /edit/{case_id}`: overwrites the case and records the new
/// `last_movement` text as a movement dated today.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(case_id): Path<CaseId>,
  Form(form): Form<EditCaseForm>,
) -> Result<Redirect, Error>
where
  S: CaseStore + Clone + Send + Sync + 'static,
{
  let movement = state
    .store
    .update_case(case_id, CaseUpdate::from(form))
    .await
    .map_err(store_err)?
    .ok_or_else(|| Error::NotFound(format!("juicio {case_id}")))?;
  tracing::info!(case_id, movement_id = movement.id, "case updated");
  Ok(Redirect::to("/"))
}
