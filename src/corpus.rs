//! Tokenized corpora that can be ranked against many queries.

use crate::bm25::BM25Scorer;
use crate::document::Document;
use crate::error::Result;
use crate::stats::CorpusStatistics;
use crate::tokenizer::{tokenize, Term, TokenizedDocument};
use crate::types::{sort_by_score, Rankable, ScoredDocument};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The tokenized form of a corpus together with its statistics.
///
/// A `CorpusIndex` owns no caller data, so it can be cached and shared
/// between rankings of the same documents.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusIndex {
  documents: Vec<TokenizedDocument>,
  statistics: CorpusStatistics,
}

impl CorpusIndex {
  /// Tokenize `documents` and build their statistics.
  ///
  /// # Errors
  ///
  /// Returns [`RankError::EmptyCorpus`](crate::error::RankError::EmptyCorpus)
  /// when `documents` is empty.
  pub fn build<D: Document + Rankable>(documents: &[D]) -> Result<Self> {
    #[cfg(feature = "parallel")]
    let tokenized: Vec<TokenizedDocument> = documents
      .par_iter()
      .map(|doc| TokenizedDocument::from_text(doc.text()))
      .collect();

    #[cfg(not(feature = "parallel"))]
    let tokenized: Vec<TokenizedDocument> = documents
      .iter()
      .map(|doc| TokenizedDocument::from_text(doc.text()))
      .collect();

    Self::from_tokenized(tokenized)
  }

  /// Build an index from documents that are already tokenized.
  pub fn from_tokenized(documents: Vec<TokenizedDocument>) -> Result<Self> {
    let statistics = CorpusStatistics::build(&documents)?;
    Ok(Self {
      documents,
      statistics,
    })
  }

  pub fn documents(&self) -> &[TokenizedDocument] {
    &self.documents
  }

  pub fn statistics(&self) -> &CorpusStatistics {
    &self.statistics
  }

  /// Number of documents.
  pub fn len(&self) -> usize {
    self.documents.len()
  }

  pub fn is_empty(&self) -> bool {
    self.documents.is_empty()
  }

  /// Score every document against `query_terms`, in corpus order.
  pub fn score_all(&self, scorer: &BM25Scorer, query_terms: &[Term]) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    let iter = self.documents.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = self.documents.iter();

    iter
      .map(|doc| scorer.score(query_terms, doc, &self.statistics))
      .collect()
  }
}

/// A caller's documents paired with their index, ready to rank.
///
/// Create one with [`Ranker::prepare`](crate::engine::Ranker::prepare). Every
/// query reuses the same statistics.
pub struct PreparedCorpus<'a, D> {
  documents: &'a [D],
  index: Arc<CorpusIndex>,
  scorer: BM25Scorer,
}

impl<'a, D: Document + Rankable> PreparedCorpus<'a, D> {
  pub(crate) fn new(documents: &'a [D], index: Arc<CorpusIndex>, scorer: BM25Scorer) -> Self {
    debug_assert_eq!(documents.len(), index.len());
    Self {
      documents,
      index,
      scorer,
    }
  }

  /// Corpus statistics shared by every query.
  pub fn statistics(&self) -> &CorpusStatistics {
    self.index.statistics()
  }

  /// The underlying index.
  pub fn index(&self) -> &Arc<CorpusIndex> {
    &self.index
  }

  /// Number of documents.
  pub fn len(&self) -> usize {
    self.documents.len()
  }

  pub fn is_empty(&self) -> bool {
    self.documents.is_empty()
  }

  /// Rank all documents against `query`, returning scores.
  ///
  /// Documents are sorted by descending score. Equal scores keep their input
  /// order.
  pub fn rank_scored(&self, query: &str) -> Vec<ScoredDocument<'a, D>> {
    let query_terms = tokenize(query);
    let scores = self.index.score_all(&self.scorer, &query_terms);

    let mut scored: Vec<ScoredDocument<'a, D>> = self
      .documents
      .iter()
      .zip(scores)
      .enumerate()
      .map(|(position, (document, score))| ScoredDocument::new(document, score, position))
      .collect();

    sort_by_score(&mut scored);
    scored
  }

  /// Rank all documents against `query`.
  pub fn rank(&self, query: &str) -> Vec<&'a D> {
    self
      .rank_scored(query)
      .into_iter()
      .map(|scored| scored.document)
      .collect()
  }
}
