//! Enrollment — registering a new identity with its descriptor.

use crate::{
  descriptor::Descriptor,
  error::{Error, Result},
  identity::{Identity, NewIdentity},
  store::IdentityStore,
};

/// Raw enrollment input, as received from the boundary layer.
#[derive(Debug, Clone)]
pub struct EnrollRequest {
  pub full_name:   String,
  pub document_id: String,
  pub role:        String,
  /// Raw detector output; `None` when the request carried no descriptor.
  pub descriptor:  Option<Vec<f32>>,
}

/// Validate, check for duplicates, and persist a new identity.
///
/// Short-circuits on the first failure. The duplicate lookup is an
/// informational pre-check; the store's uniqueness constraint remains the
/// authority when two enrollments of the same `document_id` race, so exactly
/// one of them wins and the other observes
/// [`Error::DocumentIdTaken`].
///
/// Either a fully-validated, uniquely-keyed identity is persisted or nothing
/// is.
pub async fn enroll<S: IdentityStore>(
  store: &S,
  request: EnrollRequest,
) -> Result<Identity> {
  require_non_blank("fullName", &request.full_name)?;
  require_non_blank("documentId", &request.document_id)?;
  require_non_blank("role", &request.role)?;

  let descriptor = Descriptor::from_optional(request.descriptor)?;

  if store
    .find_by_document_id(&request.document_id)
    .await?
    .is_some()
  {
    return Err(Error::DocumentIdTaken {
      document_id: request.document_id,
    });
  }

  let identity = store
    .insert(NewIdentity {
      full_name: request.full_name,
      document_id: request.document_id,
      role: request.role,
      descriptor,
    })
    .await?;

  Ok(identity)
}

/// Field names in errors use the wire spelling, since that is what callers
/// see in their requests.
fn require_non_blank(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::BlankField { field });
  }
  Ok(())
}
