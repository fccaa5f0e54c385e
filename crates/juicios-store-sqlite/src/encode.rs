//! Conversions between rows and domain types, plus the small text encodings
//! the store applies on the way in (search patterns, today's date).

use chrono::Utc;
use juicios_core::{Case, Movement};
use rusqlite::Row;

// ─── Rows ─────────────────────────────────────────────────────────────────────

/// Map a row selected with [`CASE_COLUMNS`](crate::schema::CASE_COLUMNS).
pub fn case_from_row(row: &Row<'_>) -> rusqlite::Result<Case> {
  Ok(Case {
    id:            row.get(0)?,
    case_number:   row.get(1)?,
    caption:       row.get(2)?,
    topic:         row.get(3)?,
    last_movement: row.get(4)?,
  })
}

/// Map a row selected with [`MOVEMENT_COLUMNS`](crate::schema::MOVEMENT_COLUMNS).
pub fn movement_from_row(row: &Row<'_>) -> rusqlite::Result<Movement> {
  Ok(Movement {
    id:              row.get(0)?,
    case_id:         row.get(1)?,
    date:            row.get(2)?,
    description:     row.get(3)?,
    attachment:      row.get(4)?,
    attachment_name: row.get(5)?,
  })
}

// ─── LIKE patterns ────────────────────────────────────────────────────────────

/// Escape character used in every `LIKE ... ESCAPE` clause.
pub const LIKE_ESCAPE: char = '\\';

/// Wrap `text` as a `%text%` substring pattern, escaping LIKE wildcards so
/// user input matches literally.
pub fn like_pattern(text: &str) -> String {
  let mut out = String::with_capacity(text.len() + 2);
  out.push('%');
  for c in text.chars() {
    if matches!(c, '%' | '_' | LIKE_ESCAPE) {
      out.push(LIKE_ESCAPE);
    }
    out.push(c);
  }
  out.push('%');
  out
}

// ─── Dates ────────────────────────────────────────────────────────────────────

/// Today's UTC date as `YYYY-MM-DD`, the date given to movements appended by
/// a case edit.
pub fn today() -> String { Utc::now().date_naive().format("%Y-%m-%d").to_string() }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn like_pattern_escapes_wildcards() {
    assert_eq!(like_pattern("exp"), "%exp%");
    assert_eq!(like_pattern("100%"), "%100\\%%");
    assert_eq!(like_pattern("a_b"), "%a\\_b%");
    assert_eq!(like_pattern("c:\\x"), "%c:\\\\x%");
  }

  #[test]
  fn today_is_iso_date() {
    let d = today();
    assert_eq!(d.len(), 10);
    assert!(chrono::NaiveDate::parse_from_str(&d, "%Y-%m-%d").is_ok());
  }
}
