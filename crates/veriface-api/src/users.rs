//! Handlers for `/users` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/users` | All enrolled identities, descriptors omitted |
//! | `GET`  | `/users/:id` | 404 if not found |
//! | `POST` | `/users/enroll` | Body: [`EnrollBody`]; 201, 400, or 409 |
//! | `POST` | `/users/verify` | Body: [`VerifyBody`]; 200, 400, or 404 |
//!
//! Wire field names are camelCase, matching the browser capture client.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use veriface_core::{
  enroll::{EnrollRequest, enroll as enroll_identity},
  identity::Identity,
  store::IdentityStore,
  verify::{VerifyRequest, verify as verify_identity},
};

use crate::{ApiState, error::ApiError};

// ─── Wire types ──────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /users/enroll`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollBody {
  pub full_name:   String,
  pub document_id: String,
  pub role:        String,
  /// Raw detector output; validated by the enrollment service.
  pub descriptor:  Option<Vec<f32>>,
}

impl From<EnrollBody> for EnrollRequest {
  fn from(body: EnrollBody) -> Self {
    EnrollRequest {
      full_name:   body.full_name,
      document_id: body.document_id,
      role:        body.role,
      descriptor:  body.descriptor,
    }
  }
}

/// JSON body accepted by `POST /users/verify`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyBody {
  /// The identity the caller claims to be.
  pub user_id:    Uuid,
  pub descriptor: Option<Vec<f32>>,
}

/// Wire representation of an [`Identity`].
///
/// The stored descriptor is deliberately absent: it never leaves the store
/// through read endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
  pub id:          Uuid,
  pub full_name:   String,
  pub document_id: String,
  pub role:        String,
  pub enrolled_at: DateTime<Utc>,
}

impl From<Identity> for IdentityResponse {
  fn from(identity: Identity) -> Self {
    IdentityResponse {
      id:          identity.identity_id,
      full_name:   identity.full_name,
      document_id: identity.document_id,
      role:        identity.role,
      enrolled_at: identity.enrolled_at,
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
  pub is_match: bool,
  pub distance: f32,
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /users`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<IdentityResponse>>, ApiError>
where
  S: IdentityStore,
{
  let identities = state.store.list_all().await?;
  Ok(Json(
    identities.into_iter().map(IdentityResponse::from).collect(),
  ))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /users/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<IdentityResponse>, ApiError>
where
  S: IdentityStore,
{
  let identity = state
    .store
    .get(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("identity {id} not found")))?;
  Ok(Json(identity.into()))
}

// ─── Enroll ──────────────────────────────────────────────────────────────────

/// `POST /users/enroll` — returns 201 + the enrolled identity.
pub async fn enroll<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<EnrollBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: IdentityStore,
{
  let identity = enroll_identity(state.store.as_ref(), body.into()).await?;
  Ok((StatusCode::CREATED, Json(IdentityResponse::from(identity))))
}

// ─── Verify ──────────────────────────────────────────────────────────────────

/// `POST /users/verify` — 1:1 check of a probe against the claimed identity.
pub async fn verify<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<VerifyBody>,
) -> Result<Json<VerifyResponse>, ApiError>
where
  S: IdentityStore,
{
  let verdict = verify_identity(
    state.store.as_ref(),
    VerifyRequest {
      identity_id: body.user_id,
      descriptor:  body.descriptor,
    },
    state.match_threshold,
  )
  .await?;

  Ok(Json(VerifyResponse {
    is_match: verdict.is_match,
    distance: verdict.distance,
  }))
}
