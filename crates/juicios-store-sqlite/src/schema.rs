//! SQL schema for the juicios SQLite store.
//!
//! Table and column names match databases written by the earlier version of
//! the application, so existing files open without conversion.

/// Base DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS juicios (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    numero_expediente TEXT NOT NULL,
    caratula          TEXT NOT NULL,
    tema              TEXT NOT NULL,
    ultimo_movimiento TEXT            -- copy of the newest movement's descripcion
);

CREATE TABLE IF NOT EXISTS movimientos (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    juicio_id      INTEGER NOT NULL REFERENCES juicios(id) ON DELETE CASCADE,
    fecha          TEXT NOT NULL,     -- free-form, not validated
    descripcion    TEXT NOT NULL,
    archivo        TEXT,              -- file-store name of the attachment
    archivo_nombre TEXT               -- sanitized client filename
);

CREATE INDEX IF NOT EXISTS movimientos_juicio_idx ON movimientos(juicio_id);
";

/// Columns added to `movimientos` after its first release, as
/// `(column, declaration)`. Applied on every open; see
/// [`SqliteStore::open`](crate::SqliteStore::open).
pub const ADDED_MOVEMENT_COLUMNS: &[(&str, &str)] = &[
  ("archivo", "TEXT"),
  ("archivo_nombre", "TEXT"),
];

/// Columns read by [`case_from_row`](crate::encode::case_from_row), in order.
pub const CASE_COLUMNS: &str =
  "id, numero_expediente, caratula, tema, ultimo_movimiento";

/// Columns read by [`movement_from_row`](crate::encode::movement_from_row), in order.
pub const MOVEMENT_COLUMNS: &str =
  "id, juicio_id, fecha, descripcion, archivo, archivo_nombre";
