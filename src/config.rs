//! BM25 tuning parameters.

use crate::error::{RankError, Result};
use serde::{Deserialize, Serialize};

/// Tuning constants for the BM25 scorer.
///
/// Missing fields take their defaults when deserialized, so `{}` is a valid
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bm25Params {
  /// Term frequency saturation. Higher values let repeated terms keep adding
  /// to the score for longer.
  #[serde(default = "default_k1")]
  pub k1: f64,
  /// Length normalization strength, from 0.0 (none) to 1.0 (full).
  #[serde(default = "default_b")]
  pub b: f64,
}

fn default_k1() -> f64 {
  1.5
}

fn default_b() -> f64 {
  0.75
}

impl Default for Bm25Params {
  fn default() -> Self {
    Self {
      k1: default_k1(),
      b: default_b(),
    }
  }
}

impl Bm25Params {
  /// Create parameters with the defaults (`k1 = 1.5`, `b = 0.75`).
  pub fn new() -> Self {
    Self::default()
  }

  /// Set `k1`.
  pub fn k1(mut self, k1: f64) -> Self {
    self.k1 = k1;
    self
  }

  /// Set `b`.
  pub fn b(mut self, b: f64) -> Self {
    self.b = b;
    self
  }

  /// Check that `k1` is a finite non-negative number and `b` lies in `[0, 1]`.
  pub fn validate(&self) -> Result<()> {
    if !self.k1.is_finite() || self.k1 < 0.0 {
      return Err(RankError::InvalidParameter {
        name: "k1",
        value: self.k1.to_string(),
      });
    }
    if !(0.0..=1.0).contains(&self.b) {
      return Err(RankError::InvalidParameter {
        name: "b",
        value: self.b.to_string(),
      });
    }
    Ok(())
  }

  /// Parse and validate parameters from JSON.
  pub fn from_json(json: &str) -> Result<Self> {
    let params: Self = serde_json::from_str(json)?;
    params.validate()?;
    Ok(params)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let params = Bm25Params::default();
    assert_eq!(params.k1, 1.5);
    assert_eq!(params.b, 0.75);
    assert!(params.validate().is_ok());
  }

  #[test]
  fn test_from_json_fills_defaults() {
    assert_eq!(Bm25Params::from_json("{}").unwrap(), Bm25Params::default());

    let params = Bm25Params::from_json(r#"{"k1": 1.2}"#).unwrap();
    assert_eq!(params.k1, 1.2);
    assert_eq!(params.b, 0.75);
  }

  #[test]
  fn test_validate_rejects_out_of_range() {
    assert!(matches!(
      Bm25Params::new().b(1.5).validate(),
      Err(RankError::InvalidParameter { name: "b", .. })
    ));
    assert!(matches!(
      Bm25Params::new().k1(-0.1).validate(),
      Err(RankError::InvalidParameter { name: "k1", .. })
    ));
    assert!(matches!(
      Bm25Params::new().k1(f64::NAN).validate(),
      Err(RankError::InvalidParameter { name: "k1", .. })
    ));
    assert!(Bm25Params::new().b(0.0).k1(0.0).validate().is_ok());
  }

  #[test]
  fn test_from_json_errors() {
    assert!(matches!(Bm25Params::from_json("not json"), Err(RankError::Config(_))));
    assert!(matches!(
      Bm25Params::from_json(r#"{"b": 2.0}"#),
      Err(RankError::InvalidParameter { .. })
    ));
  }
}
