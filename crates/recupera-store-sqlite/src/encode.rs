//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings with millisecond
//! precision, so lexical order in SQL matches chronological order.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use recupera_core::lead::{Lead, Tipo};

use crate::{Error, Result};

/// Columns selected for every lead read, in [`RawLead::from_row`] order.
pub const LEAD_COLUMNS: &str = "id, created_at, updated_at, tipo, nome, whatsapp, \
   cidade, tempo, limite, status, notas, extra";

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// The current time, truncated to what the column can hold.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(3) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw row type ────────────────────────────────────────────────────────────

/// A `leads` row exactly as SQLite hands it back, before decoding.
pub struct RawLead {
  pub id:         i64,
  pub created_at: String,
  pub updated_at: String,
  pub tipo:       String,
  pub nome:       String,
  pub whatsapp:   String,
  pub cidade:     String,
  pub tempo:      String,
  pub limite:     Option<f64>,
  pub status:     String,
  pub notas:      String,
  pub extra:      String,
}

impl RawLead {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      created_at: row.get(1)?,
      updated_at: row.get(2)?,
      tipo:       row.get(3)?,
      nome:       row.get(4)?,
      whatsapp:   row.get(5)?,
      cidade:     row.get(6)?,
      tempo:      row.get(7)?,
      limite:     row.get(8)?,
      status:     row.get(9)?,
      notas:      row.get(10)?,
      extra:      row.get(11)?,
    })
  }

  pub fn into_lead(self) -> Result<Lead> {
    Ok(Lead {
      id:         self.id,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
      tipo:       self.tipo.parse::<Tipo>()?,
      nome:       self.nome,
      whatsapp:   self.whatsapp,
      cidade:     self.cidade,
      tempo:      self.tempo,
      limite:     self.limite,
      status:     self.status,
      notas:      self.notas,
      extra:      self.extra,
    })
  }
}
