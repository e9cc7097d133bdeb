//! Corpus-level statistics for BM25.

use crate::bm25::idf;
use crate::error::{RankError, Result};
use crate::tokenizer::TokenizedDocument;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Statistics over a whole corpus, computed once per corpus.
///
/// Values are immutable after [`CorpusStatistics::build`]; scoring only reads
/// them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusStatistics {
  total_docs: usize,
  total_len: usize,
  avg_doc_len: f64,
  doc_freqs: HashMap<String, usize>,
}

impl CorpusStatistics {
  /// Build statistics over `docs`.
  ///
  /// # Errors
  ///
  /// Returns [`RankError::EmptyCorpus`] if `docs` is empty.
  pub fn build(docs: &[TokenizedDocument]) -> Result<Self> {
    #[cfg(feature = "parallel")]
    let partial = docs
      .par_iter()
      .fold(PartialStatistics::default, |mut acc, doc| {
        acc.add(doc);
        acc
      })
      .reduce(PartialStatistics::default, PartialStatistics::merge);

    #[cfg(not(feature = "parallel"))]
    let partial = docs.iter().fold(PartialStatistics::default(), |mut acc, doc| {
      acc.add(doc);
      acc
    });

    partial.finish()
  }

  /// Number of documents, N.
  pub fn total_docs(&self) -> usize {
    self.total_docs
  }

  /// Sum of all document lengths.
  pub fn total_len(&self) -> usize {
    self.total_len
  }

  /// Average document length, avgdl.
  pub fn avg_doc_len(&self) -> f64 {
    self.avg_doc_len
  }

  /// Number of documents containing `term`. Zero for unseen terms.
  pub fn doc_freq(&self, term: &str) -> usize {
    self.doc_freqs.get(term).copied().unwrap_or(0)
  }

  /// Number of distinct terms in the corpus.
  pub fn vocabulary_size(&self) -> usize {
    self.doc_freqs.len()
  }

  /// Inverse document frequency of `term`.
  ///
  /// Terms that never occur in the corpus get the IDF of `df = 0`.
  pub fn idf(&self, term: &str) -> f64 {
    idf(self.total_docs, self.doc_freq(term))
  }
}

/// Document counts over part of a corpus.
///
/// Partials merge by addition, so shards can be counted independently and
/// combined in any order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialStatistics {
  doc_count: usize,
  total_len: usize,
  doc_freqs: HashMap<String, usize>,
}

impl PartialStatistics {
  /// Count one document.
  pub fn add(&mut self, doc: &TokenizedDocument) {
    self.doc_count += 1;
    self.total_len += doc.len();
    for term in doc.distinct_terms() {
      *self.doc_freqs.entry(term.clone()).or_insert(0) += 1;
    }
  }

  /// Combine two partials.
  pub fn merge(mut self, other: Self) -> Self {
    self.doc_count += other.doc_count;
    self.total_len += other.total_len;
    for (term, df) in other.doc_freqs {
      *self.doc_freqs.entry(term).or_insert(0) += df;
    }
    self
  }

  /// Finalize into corpus statistics.
  pub fn finish(self) -> Result<CorpusStatistics> {
    if self.doc_count == 0 {
      return Err(RankError::EmptyCorpus);
    }

    let avg_doc_len = self.total_len as f64 / self.doc_count as f64;
    debug!(
      target: "indierank::stats",
      docs = self.doc_count,
      terms = self.doc_freqs.len(),
      avg_doc_len,
      "Corpus statistics built"
    );

    Ok(CorpusStatistics {
      total_docs: self.doc_count,
      total_len: self.total_len,
      avg_doc_len,
      doc_freqs: self.doc_freqs,
    })
  }
}
