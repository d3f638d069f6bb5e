//! The [`IdentityStore`] trait — the persistence contract for enrolled
//! identities.
//!
//! The trait is implemented by storage backends (e.g.
//! `veriface-store-sqlite`). Higher layers (`veriface-api`, the services in
//! this crate) depend on this abstraction, not on any concrete backend.

use std::future::Future;

use thiserror::Error;
use uuid::Uuid;

use crate::identity::{Identity, NewIdentity};

// ─── Error ───────────────────────────────────────────────────────────────────

/// Errors a storage backend reports to the service layer.
///
/// Uniqueness conflicts get their own variant because the services must
/// surface them to callers; everything else is opaque infrastructure failure
/// whose details never leave the server.
#[derive(Debug, Error)]
pub enum StoreError {
  /// The `document_id` uniqueness constraint rejected an insert.
  #[error("document id {document_id:?} is already enrolled")]
  DocumentIdTaken { document_id: String },

  #[error("storage backend error: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<StoreError> for crate::Error {
  fn from(err: StoreError) -> Self {
    match err {
      StoreError::DocumentIdTaken { document_id } => {
        crate::Error::DocumentIdTaken { document_id }
      }
      StoreError::Backend(source) => crate::Error::Storage(source),
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an identity store backend.
///
/// Identities are create-only: there are no update or delete operations.
/// `document_id` uniqueness is enforced by the backend's own atomic
/// constraint rather than a check in the caller, so two concurrent
/// enrollments of the same document cannot both succeed.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait IdentityStore: Send + Sync {
  /// Assign an id and enrollment timestamp, persist, and return the stored
  /// identity. Fails with [`StoreError::DocumentIdTaken`] if the
  /// `document_id` is already enrolled.
  fn insert(
    &self,
    identity: NewIdentity,
  ) -> impl Future<Output = Result<Identity, StoreError>> + Send + '_;

  /// Look up an identity by document id. Returns `None` if not enrolled.
  fn find_by_document_id<'a>(
    &'a self,
    document_id: &'a str,
  ) -> impl Future<Output = Result<Option<Identity>, StoreError>> + Send + 'a;

  /// Retrieve an identity by its id. Returns `None` if not found.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Identity>, StoreError>> + Send + '_;

  /// List every enrolled identity, in enrollment order.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Identity>, StoreError>> + Send + '_;
}
