//! The `CaseStore` trait and the bulk [`Snapshot`] read model.
//!
//! The trait is implemented by storage backends (e.g. `juicios-store-sqlite`).
//! The web layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  case::{Case, CaseId, CaseUpdate, NewCase},
  movement::{CaseMovements, Movement, MovementId, NewMovement},
};

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// Every case and every movement, in id order. Input to the export.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
  pub cases:     Vec<Case>,
  pub movements: Vec<Movement>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a case register backend.
///
/// Operations that target a case by id return `None` when that case does not
/// exist; a missing case is never an error.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CaseStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Cases ─────────────────────────────────────────────────────────────

  /// List all cases, or only those whose case number, caption or topic
  /// contains `search` (case-insensitive). An empty `search` lists all.
  fn list_cases(
    &self,
    search: Option<String>,
  ) -> impl Future<Output = Result<Vec<Case>, Self::Error>> + Send + '_;

  /// Retrieve a case by id. Returns `None` if not found.
  fn get_case(
    &self,
    id: CaseId,
  ) -> impl Future<Output = Result<Option<Case>, Self::Error>> + Send + '_;

  /// Persist a new case and return it with its assigned id.
  fn create_case(
    &self,
    input: NewCase,
  ) -> impl Future<Output = Result<Case, Self::Error>> + Send + '_;

  /// Overwrite a case and append a movement dated today whose description
  /// is `update.last_movement`. Returns the appended movement, or `None`
  /// (and writes nothing) if the case does not exist.
  fn update_case(
    &self,
    id: CaseId,
    update: CaseUpdate,
  ) -> impl Future<Output = Result<Option<Movement>, Self::Error>> + Send + '_;

  // ── Movements ─────────────────────────────────────────────────────────

  /// The case and all of its movements. Returns `None` if the case does not
  /// exist.
  fn list_movements(
    &self,
    case_id: CaseId,
  ) -> impl Future<Output = Result<Option<CaseMovements>, Self::Error>> + Send + '_;

  /// Record a movement and copy its description into the parent case's
  /// `last_movement`. Returns `None` (and writes nothing) if the case does
  /// not exist.
  fn add_movement(
    &self,
    input: NewMovement,
  ) -> impl Future<Output = Result<Option<Movement>, Self::Error>> + Send + '_;

  /// Delete a movement by id. Deleting an absent id is not an error.
  ///
  /// Neither the parent case's `last_movement` nor the attachment file is
  /// touched.
  fn delete_movement(
    &self,
    id: MovementId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Display name recorded for the attachment stored under `key`, if any
  /// movement references it with one.
  fn attachment_name(
    &self,
    key: String,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + '_;

  // ── Bulk ──────────────────────────────────────────────────────────────

  /// Read both tables in full.
  fn snapshot(&self) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_;
}
