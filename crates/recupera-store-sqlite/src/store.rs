//! [`SqliteStore`] — the SQLite implementation of [`LeadStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use recupera_core::{
  lead::{Lead, LeadUpdate, NewLead},
  store::LeadStore,
};

use crate::{
  Result,
  encode::{LEAD_COLUMNS, RawLead, encode_dt, now},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A lead store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn select_one(
  conn: &rusqlite::Connection,
  id:   i64,
) -> rusqlite::Result<Option<RawLead>> {
  conn
    .query_row(
      &format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?1"),
      rusqlite::params![id],
      RawLead::from_row,
    )
    .optional()
}

// ─── LeadStore impl ──────────────────────────────────────────────────────────

impl LeadStore for SqliteStore {
  type Error = crate::Error;

  async fn create(&self, input: NewLead) -> Result<Lead> {
    let created_at = now();
    let at_str     = encode_dt(created_at);
    let tipo_str   = input.tipo.as_str();

    let row = input.clone();
    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO leads (
             created_at, updated_at, tipo, nome, whatsapp,
             cidade, tempo, limite, status, notas, extra
           ) VALUES (?1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            at_str,
            tipo_str,
            row.nome,
            row.whatsapp,
            row.cidade,
            row.tempo,
            row.limite,
            row.status,
            row.notas,
            row.extra,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Lead {
      id,
      created_at,
      updated_at: created_at,
      tipo:       input.tipo,
      nome:       input.nome,
      whatsapp:   input.whatsapp,
      cidade:     input.cidade,
      tempo:      input.tempo,
      limite:     input.limite,
      status:     input.status,
      notas:      input.notas,
      extra:      input.extra,
    })
  }

  async fn get(&self, id: i64) -> Result<Option<Lead>> {
    let raw = self
      .conn
      .call(move |conn| Ok(select_one(conn, id)?))
      .await?;

    raw.map(RawLead::into_lead).transpose()
  }

  async fn list(&self) -> Result<Vec<Lead>> {
    let raws: Vec<RawLead> = self
      .conn
      .call(|conn| {
        // id breaks ties between leads created within the same millisecond.
        let mut stmt = conn.prepare(&format!(
          "SELECT {LEAD_COLUMNS} FROM leads ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt
          .query_map([], RawLead::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLead::into_lead).collect()
  }

  async fn update(&self, id: i64, update: LeadUpdate) -> Result<Option<Lead>> {
    let at_str = encode_dt(now());

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        // MAX() keeps updated_at monotonic even if the wall clock steps back.
        let changed = tx.execute(
          "UPDATE leads
              SET status     = COALESCE(?1, status),
                  notas      = COALESCE(?2, notas),
                  updated_at = MAX(updated_at, ?3)
            WHERE id = ?4",
          rusqlite::params![update.status, update.notas, at_str, id],
        )?;
        let raw = if changed == 0 { None } else { select_one(&tx, id)? };
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawLead::into_lead).transpose()
  }

  async fn delete(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM leads WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    Ok(removed > 0)
  }
}
