//! Identity — an enrolled person and their stored descriptor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::descriptor::Descriptor;

/// A persisted enrollment record.
///
/// `identity_id` and `enrolled_at` are assigned by the store at insert and
/// never change afterwards. Enrollment is create-only: there is no update or
/// delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
  pub identity_id: Uuid,
  pub full_name:   String,
  pub document_id: String,
  pub role:        String,
  pub descriptor:  Descriptor,
  pub enrolled_at: DateTime<Utc>,
}

/// A fully-validated identity awaiting persistence.
///
/// Produced by the enrollment service once the field and descriptor checks
/// have passed; the store fills in `identity_id` and `enrolled_at`.
#[derive(Debug, Clone)]
pub struct NewIdentity {
  pub full_name:   String,
  pub document_id: String,
  pub role:        String,
  pub descriptor:  Descriptor,
}
