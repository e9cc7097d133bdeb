//! Error types for ranking operations.

use thiserror::Error;

/// Errors reported by the tokenizer, the statistics build and the ranker.
#[derive(Debug, Error)]
pub enum RankError {
  /// Statistics were requested over zero documents. The average document
  /// length is undefined for an empty corpus.
  #[error("cannot rank an empty corpus")]
  EmptyCorpus,

  /// Input that is not usable text (null, a number, a malformed record).
  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// A tuning parameter outside its valid range.
  #[error("invalid parameter {name}: {value}")]
  InvalidParameter {
    /// Name of the offending parameter.
    name: &'static str,
    /// The rejected value, rendered for display.
    value: String,
  },

  /// Configuration JSON that failed to parse.
  #[error("config error: {0}")]
  Config(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RankError>;
