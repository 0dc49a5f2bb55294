//! SQL schema for the Recupera SQLite store.
//!
//! Executed on every connection open. Every statement is presence-checked,
//! so re-running it against an existing file is a no-op.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids from being reused after a delete.
CREATE TABLE IF NOT EXISTS leads (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC, millisecond precision
    updated_at  TEXT NOT NULL,
    tipo        TEXT NOT NULL CHECK (tipo IN ('PF', 'PJ')),
    nome        TEXT NOT NULL,
    whatsapp    TEXT NOT NULL,
    cidade      TEXT NOT NULL DEFAULT '',
    tempo       TEXT NOT NULL DEFAULT '',
    limite      REAL,
    status      TEXT NOT NULL DEFAULT 'Novo',
    notas       TEXT NOT NULL DEFAULT '',
    extra       TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS leads_created_idx ON leads(created_at);

PRAGMA user_version = 1;
";
