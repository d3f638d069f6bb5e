//! Distance computation between descriptors and the match decision.

use crate::{
  descriptor::Descriptor,
  error::{Error, Result},
};

/// Outcome of comparing a probe descriptor against an enrolled one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
  /// Euclidean distance between the two descriptors; smaller means more
  /// similar.
  pub distance: f32,
  pub is_match: bool,
}

/// Strategy for deciding whether two descriptors belong to the same person.
pub trait Matcher {
  fn compare(
    &self,
    probe: &Descriptor,
    enrolled: &Descriptor,
    threshold: f32,
  ) -> Result<Verdict>;
}

/// Euclidean distance matcher — the standard metric for this family of face
/// embeddings.
///
/// The threshold is a calibration concern and is always taken as a
/// parameter; it is never baked in here.
pub struct EuclideanMatcher;

impl Matcher for EuclideanMatcher {
  fn compare(
    &self,
    probe: &Descriptor,
    enrolled: &Descriptor,
    threshold: f32,
  ) -> Result<Verdict> {
    let (a, b) = (probe.as_slice(), enrolled.as_slice());
    if a.len() != b.len() {
      // Never truncate or pad; a mismatch here is an invariant violation.
      return Err(Error::DimensionMismatch {
        left:  a.len(),
        right: b.len(),
      });
    }

    let distance = a
      .iter()
      .zip(b.iter())
      .map(|(x, y)| (x - y).powi(2))
      .sum::<f32>()
      .sqrt();

    Ok(Verdict {
      distance,
      is_match: distance <= threshold,
    })
  }
}
