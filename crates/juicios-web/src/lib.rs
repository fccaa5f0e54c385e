//! HTML front end for the juicios case register.
//!
//! Exposes an axum [`Router`] backed by any [`CaseStore`], plus the
//! [`FileStore`] that holds uploaded PDF attachments.

pub mod error;
pub mod files;
pub mod handlers;
pub mod views;

pub use error::Error;
pub use files::FileStore;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, post},
};
use juicios_core::CaseStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{cases, export, movements, uploads};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `JUICIOS_*` environment variables. Every field has a default.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  /// SQLite database file.
  pub store_path:       PathBuf,
  /// Directory holding uploaded attachments.
  pub upload_dir:       PathBuf,
  /// Where `GET /export` writes the spreadsheet (overwritten every time).
  pub export_path:      PathBuf,
  /// Request body cap for uploads; unlimited when absent.
  pub max_upload_bytes: Option<usize>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:             "127.0.0.1".to_string(),
      port:             5000,
      store_path:       PathBuf::from("juicios.db"),
      upload_dir:       PathBuf::from("uploads"),
      export_path:      PathBuf::from("Juicios_Report.xlsx"),
      max_upload_bytes: None,
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: CaseStore> {
  pub store:  Arc<S>,
  pub files:  Arc<FileStore>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the application.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CaseStore + Clone + Send + Sync + 'static,
{
  let body_limit = match state.config.max_upload_bytes {
    Some(max) => DefaultBodyLimit::max(max),
    None => DefaultBodyLimit::disable(),
  };

  Router::new()
    .route("/",                              get(cases::index::<S>))
    .route("/add",                           post(cases::create::<S>))
    .route("/edit/{case_id}",                get(cases::edit_form::<S>).post(cases::update::<S>))
    .route("/movements/{case_id}",           get(movements::list::<S>))
    .route("/add_movement/{case_id}",        post(movements::add::<S>))
    .route("/delete_movement/{movement_id}", get(movements::delete::<S>))
    .route("/uploads/{filename}",            get(uploads::download::<S>))
    .route("/export",                        get(export::download::<S>))
    .layer(body_limit)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
