//! [`SqliteStore`] is the SQLite implementation of [`CaseStore`].

use std::path::Path;

use juicios_core::{
  Case, CaseId, CaseMovements, CaseUpdate, Movement, MovementId, NewCase, NewMovement,
  store::{CaseStore, Snapshot},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{case_from_row, like_pattern, movement_from_row, today},
  schema::{ADDED_MOVEMENT_COLUMNS, CASE_COLUMNS, MOVEMENT_COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A case register backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Each
/// operation runs as one closure on the connection's thread, so nothing is
/// held open between calls.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and bring its schema up to date.
  ///
  /// Safe to call on databases written by older versions: missing tables are
  /// created and missing `movimientos` columns are added.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    let outcomes = self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(try_add_columns(conn, "movimientos", ADDED_MOVEMENT_COLUMNS))
      })
      .await?;

    settle_added_columns("movimientos", outcomes)
  }
}

/// Attempt `ALTER TABLE table ADD COLUMN` for each `(column, declaration)`.
///
/// SQLite has no `ADD COLUMN IF NOT EXISTS`, so every attempt is made and its
/// outcome handed to [`settle_added_columns`].
pub(crate) fn try_add_columns(
  conn: &rusqlite::Connection,
  table: &'static str,
  columns: &[(&'static str, &'static str)],
) -> Vec<(&'static str, rusqlite::Result<()>)> {
  columns
    .iter()
    .map(|&(column, decl)| {
      let sql = format!("ALTER TABLE {table} ADD COLUMN {column} {decl}");
      (column, conn.execute(&sql, []).map(|_| ()))
    })
    .collect()
}

/// Log each add-column outcome. Columns that already exist are fine; any
/// other failure is returned as [`Error::AddColumn`].
pub(crate) fn settle_added_columns(
  table: &'static str,
  outcomes: Vec<(&'static str, rusqlite::Result<()>)>,
) -> Result<()> {
  for (column, outcome) in outcomes {
    match outcome {
      Ok(()) => tracing::info!(table, column, "added column"),
      Err(e) if is_duplicate_column(&e) => {
        tracing::debug!(table, column, error = %e, "column already present");
      }
      Err(source) => return Err(Error::AddColumn { table, column, source }),
    }
  }
  Ok(())
}

fn is_duplicate_column(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.starts_with("duplicate column name")
  )
}

// ─── CaseStore impl ──────────────────────────────────────────────────────────

impl CaseStore for SqliteStore {
  type Error = Error;

  // ── Cases ─────────────────────────────────────────────────────────────────

  async fn list_cases(&self, search: Option<String>) -> Result<Vec<Case>> {
    let pattern = search
      .as_deref()
      .filter(|s| !s.is_empty())
      .map(like_pattern);

    let cases = self
      .conn
      .call(move |conn| {
        let rows = if let Some(p) = pattern {
          let mut stmt = conn.prepare(&format!(
            "SELECT {CASE_COLUMNS} FROM juicios
             WHERE numero_expediente LIKE ?1 ESCAPE '\\'
                OR caratula          LIKE ?1 ESCAPE '\\'
                OR tema              LIKE ?1 ESCAPE '\\'
             ORDER BY id"
          ))?;
          stmt
            .query_map(rusqlite::params![p], case_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt =
            conn.prepare(&format!("SELECT {CASE_COLUMNS} FROM juicios ORDER BY id"))?;
          stmt
            .query_map([], case_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    Ok(cases)
  }

  async fn get_case(&self, id: CaseId) -> Result<Option<Case>> {
    let case = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {CASE_COLUMNS} FROM juicios WHERE id = ?1"),
            rusqlite::params![id],
            case_from_row,
          )
          .optional()?)
      })
      .await?;
    Ok(case)
  }

  async fn create_case(&self, input: NewCase) -> Result<Case> {
    let case = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO juicios (numero_expediente, caratula, tema, ultimo_movimiento)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![
            input.case_number,
            input.caption,
            input.topic,
            input.last_movement,
          ],
        )?;
        Ok(Case {
          id:            conn.last_insert_rowid(),
          case_number:   input.case_number,
          caption:       input.caption,
          topic:         input.topic,
          last_movement: input.last_movement,
        })
      })
      .await?;

    tracing::debug!(case_id = case.id, "created case");
    Ok(case)
  }

  async fn update_case(&self, id: CaseId, update: CaseUpdate) -> Result<Option<Movement>> {
    let date = today();

    let movement = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let changed = tx.execute(
          "UPDATE juicios
           SET numero_expediente = ?1, caratula = ?2, tema = ?3, ultimo_movimiento = ?4
           WHERE id = ?5",
          rusqlite::params![
            update.case_number,
            update.caption,
            update.topic,
            update.last_movement,
            id,
          ],
        )?;
        if changed == 0 {
          return Ok(None);
        }

        tx.execute(
          "INSERT INTO movimientos (juicio_id, fecha, descripcion) VALUES (?1, ?2, ?3)",
          rusqlite::params![id, date, update.last_movement],
        )?;
        let movement_id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Some(Movement {
          id:              movement_id,
          case_id:         id,
          date,
          description:     update.last_movement,
          attachment:      None,
          attachment_name: None,
        }))
      })
      .await?;

    Ok(movement)
  }

  // ── Movements ─────────────────────────────────────────────────────────────

  async fn list_movements(&self, case_id: CaseId) -> Result<Option<CaseMovements>> {
    let view = self
      .conn
      .call(move |conn| {
        let case = conn
          .query_row(
            &format!("SELECT {CASE_COLUMNS} FROM juicios WHERE id = ?1"),
            rusqlite::params![case_id],
            case_from_row,
          )
          .optional()?;
        let Some(case) = case else {
          return Ok(None);
        };

        let mut stmt = conn.prepare(&format!(
          "SELECT {MOVEMENT_COLUMNS} FROM movimientos WHERE juicio_id = ?1 ORDER BY id"
        ))?;
        let movements = stmt
          .query_map(rusqlite::params![case_id], movement_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(CaseMovements { case, movements }))
      })
      .await?;

    Ok(view)
  }

  async fn add_movement(&self, input: NewMovement) -> Result<Option<Movement>> {
    let movement = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let exists = tx
          .query_row(
            "SELECT 1 FROM juicios WHERE id = ?1",
            rusqlite::params![input.case_id],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !exists {
          return Ok(None);
        }

        let (key, name) = input.attachment.map(|a| (a.key, a.name)).unzip();

        tx.execute(
          "INSERT INTO movimientos (juicio_id, fecha, descripcion, archivo, archivo_nombre)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![input.case_id, input.date, input.description, key, name],
        )?;
        let movement_id = tx.last_insert_rowid();

        tx.execute(
          "UPDATE juicios SET ultimo_movimiento = ?1 WHERE id = ?2",
          rusqlite::params![input.description, input.case_id],
        )?;
        tx.commit()?;

        Ok(Some(Movement {
          id:              movement_id,
          case_id:         input.case_id,
          date:            input.date,
          description:     input.description,
          attachment:      key,
          attachment_name: name,
        }))
      })
      .await?;

    Ok(movement)
  }

  async fn delete_movement(&self, id: MovementId) -> Result<()> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM movimientos WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    tracing::debug!(movement_id = id, deleted, "deleted movement");
    Ok(())
  }

  async fn attachment_name(&self, key: String) -> Result<Option<String>> {
    let name = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT archivo_nombre FROM movimientos
             WHERE archivo = ?1 AND archivo_nombre IS NOT NULL
             ORDER BY id DESC
             LIMIT 1",
            rusqlite::params![key],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;
    Ok(name)
  }

  // ── Bulk ──────────────────────────────────────────────────────────────────

  async fn snapshot(&self) -> Result<Snapshot> {
    let snapshot = self
      .conn
      .call(|conn| {
        let cases = conn
          .prepare(&format!("SELECT {CASE_COLUMNS} FROM juicios ORDER BY id"))?
          .query_map([], case_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        let movements = conn
          .prepare(&format!("SELECT {MOVEMENT_COLUMNS} FROM movimientos ORDER BY id"))?
          .query_map([], movement_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Snapshot { cases, movements })
      })
      .await?;
    Ok(snapshot)
  }
}
