//! Verification — 1:1 confirmation that a probe descriptor matches a claimed
//! identity.
//!
//! This is not a 1:N identification search; the caller names the identity
//! and the service answers whether the probe is that person.

use uuid::Uuid;

use crate::{
  descriptor::Descriptor,
  error::{Error, Result},
  matcher::{EuclideanMatcher, Matcher, Verdict},
  store::IdentityStore,
};

/// Raw verification input, as received from the boundary layer.
#[derive(Debug, Clone)]
pub struct VerifyRequest {
  /// The identity the caller claims to be.
  pub identity_id: Uuid,
  /// Raw detector output; `None` when the request carried no descriptor.
  pub descriptor:  Option<Vec<f32>>,
}

/// Validate the probe, load the claimed identity, and run the matcher.
///
/// The probe is validated before the store is consulted, so a malformed
/// request never touches the database.
pub async fn verify<S: IdentityStore>(
  store: &S,
  request: VerifyRequest,
  threshold: f32,
) -> Result<Verdict> {
  let probe = Descriptor::from_optional(request.descriptor)?;

  let identity = store
    .get(request.identity_id)
    .await?
    .ok_or(Error::IdentityNotFound(request.identity_id))?;

  EuclideanMatcher.compare(&probe, &identity.descriptor, threshold)
}
