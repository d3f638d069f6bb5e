//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, descriptors as compact JSON
//! arrays, UUIDs as hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use veriface_core::{Descriptor, identity::Identity};

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Descriptor ──────────────────────────────────────────────────────────────

pub fn encode_descriptor(descriptor: &Descriptor) -> Result<String> {
  Ok(serde_json::to_string(descriptor.as_slice())?)
}

/// Decode a stored descriptor column. Re-validates, so a corrupted row
/// surfaces as an error instead of an invalid in-memory value.
pub fn decode_descriptor(s: &str) -> Result<Descriptor> {
  let values: Vec<f32> = serde_json::from_str(s)?;
  Ok(Descriptor::from_vec(values)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `identities` row.
pub struct RawIdentity {
  pub identity_id: String,
  pub full_name:   String,
  pub document_id: String,
  pub role:        String,
  pub descriptor:  String,
  pub enrolled_at: String,
}

impl RawIdentity {
  pub fn into_identity(self) -> Result<Identity> {
    Ok(Identity {
      identity_id: decode_uuid(&self.identity_id)?,
      full_name:   self.full_name,
      document_id: self.document_id,
      role:        self.role,
      descriptor:  decode_descriptor(&self.descriptor)?,
      enrolled_at: decode_dt(&self.enrolled_at)?,
    })
  }
}
