//! Spreadsheet export for the juicios case register.
//!
//! Turns a [`Snapshot`] into an `.xlsx` workbook with one sheet per table.
//! Each sheet starts with a header row naming the database columns, followed
//! by one row per record in id order.

mod error;

pub use error::{Error, Result};

use juicios_core::{Case, Movement, Snapshot};
use rust_xlsxwriter::{Workbook, Worksheet};

/// MIME type of the generated document.
pub const CONTENT_TYPE: &str =
  "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const CASES_SHEET: &str = "Juicios";
pub const MOVEMENTS_SHEET: &str = "Movimientos";

pub const CASE_HEADERS: [&str; 5] =
  ["id", "numero_expediente", "caratula", "tema", "ultimo_movimiento"];

pub const MOVEMENT_HEADERS: [&str; 6] =
  ["id", "juicio_id", "fecha", "descripcion", "archivo", "archivo_nombre"];

/// Most characters a single worksheet cell can hold.
pub const MAX_CELL_CHARS: usize = 32_767;

enum Cell<'a> {
  Int(i64),
  Text(&'a str),
  Empty,
}

impl<'a> From<Option<&'a str>> for Cell<'a> {
  fn from(value: Option<&'a str>) -> Self {
    value.map_or(Cell::Empty, Cell::Text)
  }
}

fn case_row(case: &Case) -> [Cell<'_>; 5] {
  [
    Cell::Int(case.id),
    Cell::Text(&case.case_number),
    Cell::Text(&case.caption),
    Cell::Text(&case.topic),
    case.last_movement.as_deref().into(),
  ]
}

fn movement_row(movement: &Movement) -> [Cell<'_>; 6] {
  [
    Cell::Int(movement.id),
    Cell::Int(movement.case_id),
    Cell::Text(&movement.date),
    Cell::Text(&movement.description),
    movement.attachment.as_deref().into(),
    movement.attachment_name.as_deref().into(),
  ]
}

/// `s` cut to at most [`MAX_CELL_CHARS`] characters.
fn clip(s: &str) -> &str {
  s.char_indices()
    .nth(MAX_CELL_CHARS)
    .map_or(s, |(end, _)| &s[..end])
}

fn write_sheet<'a, const N: usize>(
  sheet:   &mut Worksheet,
  table:   &str,
  headers: [&str; N],
  rows:    impl Iterator<Item = [Cell<'a>; N]>,
) -> Result<()> {
  for (col, header) in (0u16..).zip(headers) {
    sheet.write_string(0, col, header)?;
  }

  for (row, cells) in (1u32..).zip(rows) {
    let id = match cells[0] {
      Cell::Int(n) => Some(n),
      _ => None,
    };
    for (col, cell) in (0u16..).zip(cells) {
      match cell {
        // Row ids stay far below 2^53, so the f64 cell value is exact.
        Cell::Int(n) => {
          sheet.write_number(row, col, n as f64)?;
        }
        Cell::Text(s) => {
          let text = clip(s);
          if text.len() < s.len() {
            tracing::warn!(
              table,
              id,
              column = headers[usize::from(col)],
              chars = s.chars().count(),
              "text longer than a cell allows; truncated in export"
            );
          }
          sheet.write_string(row, col, text)?;
        }
        Cell::Empty => {}
      }
    }
  }
  Ok(())
}

/// Build the workbook for `snapshot`.
pub fn workbook(snapshot: &Snapshot) -> Result<Workbook> {
  let mut workbook = Workbook::new();

  let cases = workbook.add_worksheet();
  cases.set_name(CASES_SHEET)?;
  write_sheet(cases, "juicios", CASE_HEADERS, snapshot.cases.iter().map(case_row))?;

  let movements = workbook.add_worksheet();
  movements.set_name(MOVEMENTS_SHEET)?;
  write_sheet(
    movements,
    "movimientos",
    MOVEMENT_HEADERS,
    snapshot.movements.iter().map(movement_row),
  )?;

  Ok(workbook)
}

/// Serialize `snapshot` to `.xlsx` bytes.
pub fn to_xlsx(snapshot: &Snapshot) -> Result<Vec<u8>> {
  Ok(workbook(snapshot)?.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;

  use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};

  use super::*;

  fn sample() -> Snapshot {
    Snapshot {
      cases:     vec![
        Case {
          id:            1,
          case_number:   "EXP-2024-001".into(),
          caption:       "Pérez c/ Gómez".into(),
          topic:         "Daños".into(),
          last_movement: Some("Audiencia fijada".into()),
        },
        Case {
          id:            2,
          case_number:   "EXP-2024-002".into(),
          caption:       "Ruiz c/ Banco".into(),
          topic:         "Laboral".into(),
          last_movement: None,
        },
      ],
      movements: vec![
        Movement {
          id:              1,
          case_id:         1,
          date:            "2024-03-01".into(),
          description:     "Audiencia fijada".into(),
          attachment:      Some("abc.pdf".into()),
          attachment_name: Some("acta.pdf".into()),
        },
        Movement {
          id:              2,
          case_id:         2,
          date:            "ayer".into(),
          description:     "Traslado".into(),
          attachment:      None,
          attachment_name: None,
        },
        Movement {
          id:              3,
          case_id:         1,
          date:            "2024-03-05".into(),
          description:     "Pericia".into(),
          attachment:      None,
          attachment_name: None,
        },
      ],
    }
  }

  fn read(bytes: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
    open_workbook_from_rs(Cursor::new(bytes)).expect("valid xlsx")
  }

  fn cells(book: &mut Xlsx<Cursor<Vec<u8>>>, sheet: &str) -> Vec<Vec<Data>> {
    book
      .worksheet_range(sheet)
      .expect("sheet exists")
      .rows()
      .map(<[Data]>::to_vec)
      .collect()
  }

  #[test]
  fn writes_two_named_sheets() {
    let book = read(to_xlsx(&sample()).unwrap());
    assert_eq!(book.sheet_names(), vec![CASES_SHEET, MOVEMENTS_SHEET]);
  }

  #[test]
  fn row_counts_match_snapshot() {
    let snapshot = sample();
    let mut book = read(to_xlsx(&snapshot).unwrap());

    let cases = cells(&mut book, CASES_SHEET);
    assert_eq!(cases.len(), 1 + snapshot.cases.len());
    let movements = cells(&mut book, MOVEMENTS_SHEET);
    assert_eq!(movements.len(), 1 + snapshot.movements.len());
  }

  #[test]
  fn header_and_values() {
    let mut book = read(to_xlsx(&sample()).unwrap());
    let cases = cells(&mut book, CASES_SHEET);

    assert_eq!(cases[0][1], Data::String("numero_expediente".into()));
    assert_eq!(cases[1][0], Data::Float(1.0));
    assert_eq!(cases[1][2], Data::String("Pérez c/ Gómez".into()));
    assert_eq!(cases[2][4], Data::Empty);

    let movements = cells(&mut book, MOVEMENTS_SHEET);
    assert_eq!(movements[1][4], Data::String("abc.pdf".into()));
    assert_eq!(movements[3][1], Data::Float(1.0));
  }

  #[test]
  fn empty_snapshot_has_headers_only() {
    let mut book = read(to_xlsx(&Snapshot::default()).unwrap());
    assert_eq!(cells(&mut book, CASES_SHEET).len(), 1);
    assert_eq!(cells(&mut book, MOVEMENTS_SHEET).len(), 1);
  }

  #[test]
  fn overlong_text_is_clipped_to_cell_limit() {
    let mut snapshot = sample();
    snapshot.cases[0].last_movement = Some("x".repeat(40_000));
    snapshot.movements[1].description = "ñ".repeat(40_000);

    let mut book = read(to_xlsx(&snapshot).expect("export succeeds"));

    let cases = cells(&mut book, CASES_SHEET);
    assert_eq!(cases[1][4], Data::String("x".repeat(MAX_CELL_CHARS)));
    let movements = cells(&mut book, MOVEMENTS_SHEET);
    assert_eq!(movements[2][3], Data::String("ñ".repeat(MAX_CELL_CHARS)));
    assert_eq!(movements[1][3], Data::String("Audiencia fijada".into()));
  }

  #[test]
  fn clip_leaves_short_text_alone() {
    assert_eq!(clip("Pericia"), "Pericia");
    let exact = "a".repeat(MAX_CELL_CHARS);
    assert_eq!(clip(&exact), exact);
  }

  #[test]
  fn repeated_export_has_same_contents() {
    let snapshot = sample();
    let mut first = read(to_xlsx(&snapshot).unwrap());
    let mut second = read(to_xlsx(&snapshot).unwrap());
    for sheet in [CASES_SHEET, MOVEMENTS_SHEET] {
      assert_eq!(cells(&mut first, sheet), cells(&mut second, sheet));
    }
  }
}
