//! Movement: a dated procedural update belonging to a case.

use crate::case::{Case, CaseId};

/// Row id of a movement.
pub type MovementId = i64;

/// A persisted movement ("movimiento").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
  pub id:              MovementId,
  pub case_id:         CaseId,
  /// Free-form date text; stored exactly as supplied.
  pub date:            String,
  pub description:     String,
  /// File-store name of the attached PDF, if any.
  pub attachment:      Option<String>,
  /// Sanitized client filename, kept for display only.
  pub attachment_name: Option<String>,
}

impl Movement {
  /// Name to show for the attachment: the original filename when it was
  /// recorded, otherwise the storage name itself (rows written before
  /// display names existed).
  pub fn attachment_label(&self) -> Option<&str> {
    self
      .attachment_name
      .as_deref()
      .or(self.attachment.as_deref())
  }
}

/// An attachment already written to the file store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAttachment {
  /// Name under which the file store holds the bytes.
  pub key:  String,
  /// Sanitized client filename.
  pub name: String,
}

/// Input for [`CaseStore::add_movement`](crate::store::CaseStore::add_movement).
#[derive(Debug, Clone)]
pub struct NewMovement {
  pub case_id:     CaseId,
  pub date:        String,
  pub description: String,
  pub attachment:  Option<StoredAttachment>,
}

/// A case together with its movements, in insertion order.
#[derive(Debug, Clone)]
pub struct CaseMovements {
  pub case:      Case,
  pub movements: Vec<Movement>,
}
