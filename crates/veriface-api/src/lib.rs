//! JSON REST API for Veriface.
//!
//! Exposes an axum [`Router`] backed by any
//! [`veriface_core::store::IdentityStore`]. Transport concerns (TLS, CORS,
//! request tracing) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", veriface_api::api_router(state))
//! ```

pub mod error;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use veriface_core::store::IdentityStore;

pub use error::ApiError;

/// Shared state threaded through all API handlers.
pub struct ApiState<S> {
  pub store: Arc<S>,
  /// Maximum Euclidean distance at which a probe and an enrolled descriptor
  /// count as the same person.
  pub match_threshold: f32,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
      match_threshold: self.match_threshold,
    }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: IdentityStore + Send + Sync + 'static,
{
  Router::new()
    .route("/users", get(users::list::<S>))
    .route("/users/enroll", post(users::enroll::<S>))
    .route("/users/verify", post(users::verify::<S>))
    .route("/users/{id}", get(users::get_one::<S>))
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use veriface_core::DESCRIPTOR_LEN;
  use veriface_store_sqlite::SqliteStore;

  async fn state() -> ApiState<SqliteStore> {
    ApiState {
      store: Arc::new(SqliteStore::open_in_memory().await.unwrap()),
      match_threshold: 0.5,
    }
  }

  fn descriptor_json(fill: f32) -> Value {
    json!(vec![fill; DESCRIPTOR_LEN])
  }

  fn enroll_body(document_id: &str, fill: f32) -> Value {
    json!({
      "fullName": "Ana Torres",
      "documentId": document_id,
      "role": "User",
      "descriptor": descriptor_json(fill),
    })
  }

  async fn request(
    state: ApiState<SqliteStore>,
    method: &str,
    uri: &str,
    body: Option<&Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let req = builder.body(body).unwrap();
    api_router(state).oneshot(req).await.unwrap()
  }

  async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  // ── Enroll ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn enroll_returns_201_without_descriptor_in_body() {
    let state = state().await;
    let resp =
      request(state, "POST", "/users/enroll", Some(&enroll_body("DOC1", 0.1)))
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = body_json(resp).await;
    assert_eq!(body["documentId"], "DOC1");
    assert_eq!(body["fullName"], "Ana Torres");
    assert!(body["id"].is_string(), "assigned id missing: {body}");
    assert!(body.get("descriptor").is_none(), "descriptor leaked: {body}");
  }

  #[tokio::test]
  async fn enroll_without_descriptor_is_400() {
    let state = state().await;
    let body = json!({
      "fullName": "Ana Torres",
      "documentId": "DOC1",
      "role": "User",
    });
    let resp = request(state, "POST", "/users/enroll", Some(&body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn enroll_with_short_descriptor_is_400_naming_expected_length() {
    let state = state().await;
    let mut body = enroll_body("DOC1", 0.1);
    body["descriptor"] = json!(vec![0.0f32; 64]);
    let resp = request(state, "POST", "/users/enroll", Some(&body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let error = body_json(resp).await;
    let message = error["error"].as_str().unwrap();
    assert!(message.contains("128"), "message: {message}");
    assert!(message.contains("64"), "message: {message}");
  }

  #[tokio::test]
  async fn enroll_with_blank_full_name_is_400() {
    let state = state().await;
    let mut body = enroll_body("DOC1", 0.1);
    body["fullName"] = json!("   ");
    let resp = request(state, "POST", "/users/enroll", Some(&body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let error = body_json(resp).await;
    assert!(
      error["error"].as_str().unwrap().contains("fullName"),
      "{error}"
    );
  }

  #[tokio::test]
  async fn duplicate_enrollment_is_409() {
    let state = state().await;
    let resp = request(
      state.clone(),
      "POST",
      "/users/enroll",
      Some(&enroll_body("DOC1", 0.1)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = request(
      state,
      "POST",
      "/users/enroll",
      Some(&enroll_body("DOC1", 0.7)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
  }

  // ── Verify ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn verify_same_vector_matches() {
    let state = state().await;
    let resp = request(
      state.clone(),
      "POST",
      "/users/enroll",
      Some(&enroll_body("DOC1", 0.1)),
    )
    .await;
    let enrolled = body_json(resp).await;
    let id = enrolled["id"].as_str().unwrap().to_string();

    let body = json!({ "userId": id, "descriptor": descriptor_json(0.1) });
    let resp = request(state, "POST", "/users/verify", Some(&body)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let verdict = body_json(resp).await;
    assert_eq!(verdict["isMatch"], json!(true));
    assert_eq!(verdict["distance"], json!(0.0));
  }

  #[tokio::test]
  async fn verify_unknown_user_is_404() {
    let state = state().await;
    let body = json!({
      "userId": uuid::Uuid::new_v4(),
      "descriptor": descriptor_json(0.1),
    });
    let resp = request(state, "POST", "/users/verify", Some(&body)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn verify_with_short_probe_is_400() {
    let state = state().await;
    let body = json!({
      "userId": uuid::Uuid::new_v4(),
      "descriptor": vec![0.0f32; 64],
    });
    let resp = request(state, "POST", "/users/verify", Some(&body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── List / get ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_returns_enrolled_identities_without_descriptors() {
    let state = state().await;
    for (doc, fill) in [("A", 0.1), ("B", 0.2)] {
      request(
        state.clone(),
        "POST",
        "/users/enroll",
        Some(&enroll_body(doc, fill)),
      )
      .await;
    }

    let resp = request(state, "GET", "/users", None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["documentId"], "A");
    assert_eq!(users[1]["documentId"], "B");
    assert!(users.iter().all(|u| u.get("descriptor").is_none()));
  }

  #[tokio::test]
  async fn get_one_roundtrips_and_missing_is_404() {
    let state = state().await;
    let resp = request(
      state.clone(),
      "POST",
      "/users/enroll",
      Some(&enroll_body("DOC1", 0.1)),
    )
    .await;
    let id = body_json(resp).await["id"].as_str().unwrap().to_string();

    let resp =
      request(state.clone(), "GET", &format!("/users/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["documentId"], "DOC1");

    let resp = request(
      state,
      "GET",
      &format!("/users/{}", uuid::Uuid::new_v4()),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
