//! The fixed-length face descriptor and its validation boundary.
//!
//! A [`Descriptor`] can only be obtained through validation, so every value
//! in the system is known to hold exactly [`DESCRIPTOR_LEN`] finite floats.
//! The external detector is not trusted to guarantee either.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of elements in a face descriptor, fixed by the embedding model.
pub const DESCRIPTOR_LEN: usize = 128;

/// A validated 128-dimensional face embedding.
///
/// Two descriptors are compared only through a
/// [`Matcher`](crate::matcher::Matcher), never by element-wise equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct Descriptor(Vec<f32>);

impl Descriptor {
  /// Validate a raw vector as produced by an external detector.
  pub fn from_vec(values: Vec<f32>) -> Result<Self> {
    if values.len() != DESCRIPTOR_LEN {
      return Err(Error::DescriptorLength {
        expected: DESCRIPTOR_LEN,
        actual:   values.len(),
      });
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
      return Err(Error::DescriptorNotFinite { index });
    }
    Ok(Self(values))
  }

  /// Validate a vector that may be absent from the request entirely.
  pub fn from_optional(values: Option<Vec<f32>>) -> Result<Self> {
    Self::from_vec(values.ok_or(Error::DescriptorMissing)?)
  }

  pub fn as_slice(&self) -> &[f32] {
    &self.0
  }
}

impl TryFrom<Vec<f32>> for Descriptor {
  type Error = Error;

  fn try_from(values: Vec<f32>) -> Result<Self> {
    Self::from_vec(values)
  }
}

impl From<Descriptor> for Vec<f32> {
  fn from(descriptor: Descriptor) -> Self {
    descriptor.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_a_full_length_vector() {
    let d = Descriptor::from_vec(vec![0.25; DESCRIPTOR_LEN]).unwrap();
    assert_eq!(d.as_slice().len(), DESCRIPTOR_LEN);
  }

  #[test]
  fn rejects_wrong_lengths() {
    for len in [0, 1, 127, 129] {
      let err = Descriptor::from_vec(vec![0.0; len]).unwrap_err();
      assert!(
        matches!(err, Error::DescriptorLength { expected: DESCRIPTOR_LEN, actual } if actual == len),
        "length {len}: {err}"
      );
    }
  }

  #[test]
  fn rejects_missing_vector() {
    let err = Descriptor::from_optional(None).unwrap_err();
    assert!(matches!(err, Error::DescriptorMissing));
  }

  #[test]
  fn rejects_nan_and_reports_first_index() {
    let mut values = vec![0.0; DESCRIPTOR_LEN];
    values[7] = f32::NAN;
    values[40] = f32::NAN;
    let err = Descriptor::from_vec(values).unwrap_err();
    assert!(matches!(err, Error::DescriptorNotFinite { index: 7 }));
  }

  #[test]
  fn rejects_infinities() {
    for bad in [f32::INFINITY, f32::NEG_INFINITY] {
      let mut values = vec![0.0; DESCRIPTOR_LEN];
      values[127] = bad;
      let err = Descriptor::from_vec(values).unwrap_err();
      assert!(matches!(err, Error::DescriptorNotFinite { index: 127 }));
    }
  }

  #[test]
  fn deserialization_validates_too() {
    // A corrupted stored row must not materialize an invalid value.
    let short = serde_json::to_string(&vec![1.0f32; 3]).unwrap();
    assert!(serde_json::from_str::<Descriptor>(&short).is_err());

    let full = serde_json::to_string(&vec![0.5f32; DESCRIPTOR_LEN]).unwrap();
    let d: Descriptor = serde_json::from_str(&full).unwrap();
    assert_eq!(d.as_slice()[0], 0.5);
  }
}
