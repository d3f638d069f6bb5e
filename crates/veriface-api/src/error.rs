//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use veriface_core::store::StoreError;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("not found: {0}")]
  NotFound(String),

  /// Infrastructure failure or internal invariant violation. The source is
  /// logged server-side; callers get a generic body.
  #[error("internal error")]
  Internal(#[source] veriface_core::Error),
}

impl From<veriface_core::Error> for ApiError {
  fn from(err: veriface_core::Error) -> Self {
    use veriface_core::Error as E;
    match err {
      E::BlankField { .. }
      | E::DescriptorMissing
      | E::DescriptorLength { .. }
      | E::DescriptorNotFinite { .. } => ApiError::BadRequest(err.to_string()),
      E::DocumentIdTaken { .. } => ApiError::Conflict(err.to_string()),
      E::IdentityNotFound(_) => ApiError::NotFound(err.to_string()),
      E::DimensionMismatch { .. } | E::Storage(_) => ApiError::Internal(err),
    }
  }
}

impl From<StoreError> for ApiError {
  fn from(err: StoreError) -> Self {
    veriface_core::Error::from(err).into()
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Internal(source) => {
        tracing::error!(error = %source, "internal error while handling request");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
