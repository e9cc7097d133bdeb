//! Text tokenization.
//!
//! Text is lowercased and split into maximal runs of letters, digits and
//! underscores. The same rule is applied to documents and queries.

use crate::error::{RankError, Result};
use serde_json::Value;
use std::collections::HashMap;

/// A normalized token.
pub type Term = String;

/// Whether `c` belongs to a term rather than separating terms.
pub fn is_term_char(c: char) -> bool {
  c.is_alphanumeric() || c == '_'
}

/// Tokenize text into terms.
pub fn tokenize(text: &str) -> Vec<Term> {
  text
    .to_lowercase()
    .split(|c: char| !is_term_char(c))
    .filter(|run| !run.is_empty())
    .map(String::from)
    .collect()
}

/// Tokenize a JSON value. Only strings are text; anything else is rejected.
pub fn tokenize_value(value: &Value) -> Result<Vec<Term>> {
  match value {
    Value::String(s) => Ok(tokenize(s)),
    Value::Null => Err(RankError::InvalidInput("text is null".to_string())),
    other => Err(RankError::InvalidInput(format!(
      "expected a string, found {}",
      json_type_name(other)
    ))),
  }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

/// Count how often each term occurs in `text`.
pub fn term_frequencies(text: &str) -> HashMap<Term, usize> {
  count_terms(&tokenize(text))
}

fn count_terms(terms: &[Term]) -> HashMap<Term, usize> {
  let mut freqs = HashMap::new();
  for term in terms {
    *freqs.entry(term.clone()).or_insert(0) += 1;
  }
  freqs
}

/// The terms of one document, with their counts.
///
/// Term order is kept for inspection but only the counts and the length
/// feed into scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizedDocument {
  terms: Vec<Term>,
  freqs: HashMap<Term, usize>,
}

impl TokenizedDocument {
  /// Tokenize `text` into a new document.
  pub fn from_text(text: &str) -> Self {
    Self::from_terms(tokenize(text))
  }

  /// Wrap an already tokenized term sequence.
  pub fn from_terms(terms: Vec<Term>) -> Self {
    let freqs = count_terms(&terms);
    Self { terms, freqs }
  }

  /// The terms in document order.
  pub fn terms(&self) -> &[Term] {
    &self.terms
  }

  /// Number of times `term` occurs in this document.
  pub fn term_frequency(&self, term: &str) -> usize {
    self.freqs.get(term).copied().unwrap_or(0)
  }

  /// Iterate over the distinct terms of the document.
  pub fn distinct_terms(&self) -> impl Iterator<Item = &Term> + '_ {
    self.freqs.keys()
  }

  /// Document length in terms.
  pub fn len(&self) -> usize {
    self.terms.len()
  }

  pub fn is_empty(&self) -> bool {
    self.terms.is_empty()
  }
}
