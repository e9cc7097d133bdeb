//! Okapi BM25 scoring.
//!
//! Each query term adds its inverse document frequency weighted by a
//! saturating, length-normalized term frequency.

use crate::config::Bm25Params;
use crate::error::Result;
use crate::stats::CorpusStatistics;
use crate::tokenizer::{Term, TokenizedDocument};

/// Inverse document frequency for a term found in `doc_freq` of `total_docs`
/// documents.
///
/// The `+ 1` inside the logarithm keeps the value non-negative even when
/// every document contains the term.
pub fn idf(total_docs: usize, doc_freq: usize) -> f64 {
  let n = total_docs as f64;
  let df = doc_freq as f64;
  ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}

/// Scores tokenized documents against a query with fixed `k1` and `b`.
///
/// The scorer holds no corpus data; statistics are passed to every call.
#[derive(Debug, Clone, Default)]
pub struct BM25Scorer {
  params: Bm25Params,
}

impl BM25Scorer {
  /// Creates a new `BM25Scorer` with the default parameters.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a scorer with custom parameters.
  ///
  /// # Errors
  ///
  /// Fails if the parameters are out of range, see [`Bm25Params::validate`].
  pub fn with_params(params: Bm25Params) -> Result<Self> {
    params.validate()?;
    Ok(Self { params })
  }

  /// The parameters in use.
  pub fn params(&self) -> &Bm25Params {
    &self.params
  }

  /// BM25 score of `doc` for `query_terms`.
  ///
  /// The score is a sum over the query terms, in query order. Repeated query
  /// terms are counted every time they appear. Each term contributes its IDF
  /// times the normalized term frequency in `doc`.
  ///
  /// # Arguments
  ///
  /// * `query_terms` - The tokenized query.
  /// * `doc` - The document being scored.
  /// * `stats` - Statistics of the corpus `doc` belongs to.
  pub fn score(&self, query_terms: &[Term], doc: &TokenizedDocument, stats: &CorpusStatistics) -> f64 {
    query_terms
      .iter()
      .map(|term| {
        let weight = stats.idf(term);
        let tf = doc.term_frequency(term) as f64;
        weight * self.term_frequency_norm(tf, doc.len() as f64, stats.avg_doc_len())
      })
      .fold(0.0, |total, contribution| total + contribution)
  }

  /// Normalized term frequency component of BM25.
  ///
  /// Zero when the term does not occur. When the whole corpus is empty
  /// (`avg_doc_len == 0`) the length ratio is taken as zero.
  pub fn term_frequency_norm(&self, tf: f64, doc_len: f64, avg_doc_len: f64) -> f64 {
    if tf == 0.0 {
      return 0.0;
    }

    let Bm25Params { k1, b } = self.params;
    let length_ratio = if avg_doc_len > 0.0 {
      doc_len / avg_doc_len
    } else {
      0.0
    };

    (tf * (k1 + 1.0)) / (tf + k1 * (1.0 - b + b * length_ratio))
  }
}
