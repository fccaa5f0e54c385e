//! Case: a legal proceeding ("juicio") and its identifying metadata.

/// Row id of a case. Assigned by the store, never reused.
pub type CaseId = i64;

/// A persisted case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
  pub id:            CaseId,
  /// External docket identifier ("número de expediente").
  pub case_number:   String,
  /// Title / parties ("carátula").
  pub caption:       String,
  /// Subject-matter classification, free text.
  pub topic:         String,
  /// Description of the most recently recorded movement.
  ///
  /// This is a stored copy refreshed on write, not recomputed on read:
  /// deleting a movement leaves it untouched.
  pub last_movement: Option<String>,
}

impl Case {
  /// The list-view title: `"{case_number} - {caption} - {topic}"`.
  pub fn title(&self) -> String {
    format!("{} - {} - {}", self.case_number, self.caption, self.topic)
  }
}

/// Input for [`CaseStore::create_case`](crate::store::CaseStore::create_case).
///
/// No field is validated; empty strings are stored as given.
#[derive(Debug, Clone, Default)]
pub struct NewCase {
  pub case_number:   String,
  pub caption:       String,
  pub topic:         String,
  pub last_movement: Option<String>,
}

/// Input for [`CaseStore::update_case`](crate::store::CaseStore::update_case).
///
/// `last_movement` is required here because an edit always appends a
/// movement carrying that text.
#[derive(Debug, Clone, Default)]
pub struct CaseUpdate {
  pub case_number:   String,
  pub caption:       String,
  pub topic:         String,
  pub last_movement: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn title_joins_number_caption_topic_in_order() {
    let case = Case {
      id:            1,
      case_number:   "EXP-2024-001".into(),
      caption:       "Pérez c/ Gómez".into(),
      topic:         "Daños".into(),
      last_movement: None,
    };
    assert_eq!(case.title(), "EXP-2024-001 - Pérez c/ Gómez - Daños");
  }
}
