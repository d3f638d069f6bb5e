//! Error types for `veriface-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// A required text field was empty or whitespace-only.
  #[error("{field} must not be blank")]
  BlankField { field: &'static str },

  #[error("descriptor is missing")]
  DescriptorMissing,

  #[error("descriptor must have {expected} elements, got {actual}")]
  DescriptorLength { expected: usize, actual: usize },

  #[error("descriptor element {index} is not a finite number")]
  DescriptorNotFinite { index: usize },

  /// Descriptors of different lengths reached the matcher. Unreachable when
  /// both values went through validation.
  #[error("descriptor dimensions differ: {left} vs {right}")]
  DimensionMismatch { left: usize, right: usize },

  #[error("document id {document_id:?} is already enrolled")]
  DocumentIdTaken { document_id: String },

  #[error("identity not found: {0}")]
  IdentityNotFound(Uuid),

  /// Infrastructure failure. Enrollment is all-or-nothing, so the caller may
  /// retry the whole operation.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
