//! Lead types — the single record captured by the public intake form.
//!
//! A lead enters the store through [`LeadSubmission::validate`], which turns
//! the loosely-typed form payload into a [`NewLead`]. After creation only the
//! `status` and `notas` fields change, via [`LeadUpdate`].

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Status assigned to a lead when the submitter does not supply one.
pub const DEFAULT_STATUS: &str = "Novo";

// ─── Tipo ────────────────────────────────────────────────────────────────────

/// Whether the lead is a person (`PF`) or a company (`PJ`).
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum Tipo {
  #[default]
  #[serde(rename = "PF")]
  Pf,
  #[serde(rename = "PJ")]
  Pj,
}

impl Tipo {
  pub fn as_str(self) -> &'static str {
    match self {
      Tipo::Pf => "PF",
      Tipo::Pj => "PJ",
    }
  }

  /// Lenient conversion used for form input: case-insensitive, and anything
  /// unrecognised (or absent) becomes [`Tipo::Pf`].
  pub fn from_input(input: Option<&str>) -> Self {
    input
      .and_then(|s| s.trim().parse().ok())
      .unwrap_or_default()
  }
}

impl FromStr for Tipo {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    if s.eq_ignore_ascii_case("PF") {
      Ok(Tipo::Pf)
    } else if s.eq_ignore_ascii_case("PJ") {
      Ok(Tipo::Pj)
    } else {
      Err(Error::UnknownTipo(s.to_owned()))
    }
  }
}

impl fmt::Display for Tipo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Lead ────────────────────────────────────────────────────────────────────

/// A persisted lead, as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
  pub id:         i64,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub tipo:       Tipo,
  pub nome:       String,
  pub whatsapp:   String,
  pub cidade:     String,
  pub tempo:      String,
  pub limite:     Option<f64>,
  pub status:     String,
  pub notas:      String,
  pub extra:      String,
}

/// A validated lead ready to be inserted. Timestamps and the id are assigned
/// by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
  pub tipo:     Tipo,
  pub nome:     String,
  pub whatsapp: String,
  pub cidade:   String,
  pub tempo:    String,
  pub limite:   Option<f64>,
  pub status:   String,
  pub notas:    String,
  pub extra:    String,
}

impl NewLead {
  /// A lead with only the required fields set and every default applied.
  pub fn new(nome: impl Into<String>, whatsapp: impl Into<String>) -> Self {
    Self {
      tipo:     Tipo::default(),
      nome:     nome.into(),
      whatsapp: whatsapp.into(),
      cidade:   String::new(),
      tempo:    String::new(),
      limite:   None,
      status:   DEFAULT_STATUS.to_owned(),
      notas:    String::new(),
      extra:    String::new(),
    }
  }
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// The intake form payload exactly as a client sends it.
///
/// Every field is optional here; [`LeadSubmission::validate`] decides what is
/// required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadSubmission {
  /// Any JSON value; only `"PF"`/`"PJ"` strings (any casing) are honoured.
  pub tipo:     Option<Value>,
  pub nome:     Option<String>,
  pub whatsapp: Option<String>,
  pub cidade:   Option<String>,
  pub tempo:    Option<String>,
  /// A JSON number, a numeric string (`"1500"`, `"1.500,50"`), or null.
  pub limite:   Option<Value>,
  pub status:   Option<String>,
  pub notas:    Option<String>,
  /// Free-form; non-string values are kept as their JSON text.
  pub extra:    Option<Value>,
}

impl LeadSubmission {
  /// Check required fields and normalise the payload into a [`NewLead`].
  pub fn validate(self) -> Result<NewLead> {
    let nome = required(self.nome, "nome")?;
    let whatsapp = required(self.whatsapp, "whatsapp")?;

    let status = self
      .status
      .map(|s| s.trim().to_owned())
      .filter(|s| !s.is_empty())
      .unwrap_or_else(|| DEFAULT_STATUS.to_owned());

    let extra = match self.extra {
      None | Some(Value::Null) => String::new(),
      Some(Value::String(s)) => s,
      Some(other) => other.to_string(),
    };

    Ok(NewLead {
      tipo: Tipo::from_input(self.tipo.as_ref().and_then(Value::as_str)),
      nome,
      whatsapp,
      cidade: self.cidade.unwrap_or_default(),
      tempo: self.tempo.unwrap_or_default(),
      limite: parse_limite(self.limite)?,
      status,
      notas: self.notas.unwrap_or_default(),
      extra,
    })
  }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
    .ok_or_else(|| Error::Validation(format!("{field} é obrigatório")))
}

/// Coerce the submitted credit limit into a number.
///
/// Strings accept both pt-BR (`1.500,50`) and en (`1,500.50`) grouping: when
/// both separators appear the last one marks decimals. A lone comma is a
/// decimal comma; a lone dot followed by exactly three digits groups
/// thousands (`1.500` is 1500). Malformed grouping is rejected.
pub fn parse_limite(value: Option<Value>) -> Result<Option<f64>> {
  let invalid = || Error::Validation("limite inválido".to_owned());

  match value {
    None | Some(Value::Null) => Ok(None),
    Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(invalid),
    Some(Value::String(s)) => {
      let s = s.trim();
      if s.is_empty() {
        return Ok(None);
      }
      normalise_decimal(s)
        .and_then(|n| n.parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .map(Some)
        .ok_or_else(invalid)
    }
    Some(_) => Err(invalid()),
  }
}

/// Rewrite a grouped decimal string as `[-]digits[.digits]`.
fn normalise_decimal(s: &str) -> Option<String> {
  let (sign, digits) = match s.strip_prefix('-') {
    Some(rest) => ("-", rest),
    None => ("", s),
  };

  let (int_part, frac_part) = match (digits.rfind(','), digits.rfind('.')) {
    (Some(comma), Some(dot)) => {
      let (at, thousands) = if comma > dot { (comma, '.') } else { (dot, ',') };
      (strip_groups(&digits[..at], thousands)?, Some(&digits[at + 1..]))
    }
    (Some(comma), None) => (digits[..comma].to_owned(), Some(&digits[comma + 1..])),
    (None, Some(dot)) => {
      if digits.matches('.').count() > 1 || digits.len() - dot - 1 == 3 {
        (strip_groups(digits, '.')?, None)
      } else {
        (digits[..dot].to_owned(), Some(&digits[dot + 1..]))
      }
    }
    (None, None) => (digits.to_owned(), None),
  };

  let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
  if !all_digits(int_part.as_str()) || frac_part.is_some_and(|f| !all_digits(f)) {
    return None;
  }

  Some(match frac_part {
    Some(frac) => format!("{sign}{int_part}.{frac}"),
    None => format!("{sign}{int_part}"),
  })
}

/// Drop `sep` from a thousands-grouped integer, checking the grouping.
fn strip_groups(s: &str, sep: char) -> Option<String> {
  let mut groups = s.split(sep);
  let first = groups.next()?;
  if first.is_empty() || (s.contains(sep) && first.len() > 3) {
    return None;
  }
  let mut out = first.to_owned();
  for group in groups {
    if group.len() != 3 {
      return None;
    }
    out.push_str(group);
  }
  Some(out)
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// Partial update applied by the admin panel. Absent fields keep their
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LeadUpdate {
  pub status: Option<String>,
  pub notas:  Option<String>,
}

impl LeadUpdate {
  pub fn status(status: impl Into<String>) -> Self {
    Self { status: Some(status.into()), notas: None }
  }
}
