//! The ranker that ties tokenization, statistics and scoring together.

use crate::bm25::BM25Scorer;
use crate::config::Bm25Params;
use crate::corpus::{CorpusIndex, PreparedCorpus};
use crate::document::Document;
use crate::error::Result;
use crate::types::{Rankable, ScoredDocument};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

#[cfg(feature = "cache")]
use crate::cache::StatisticsCache;

/// Rank `documents` against `query` with the default parameters.
///
/// Shorthand for `Ranker::new().rank(documents, query)`.
pub fn rank<'a, D: Document + Rankable>(documents: &'a [D], query: &str) -> Result<Vec<&'a D>> {
  Ranker::new().rank(documents, query)
}

/// Ranks documents against text queries with BM25.
///
/// Each call to [`rank`](Ranker::rank) tokenizes the documents and the query,
/// builds corpus statistics once, scores every document and returns them by
/// descending score. Documents with equal scores stay in input order, so the
/// output is fully determined by the input.
///
/// To run several queries over the same documents without rebuilding the
/// statistics, use [`prepare`](Ranker::prepare), or attach a
/// [`StatisticsCache`] with the builder.
///
/// # Examples
///
/// ```rust
/// use indierank::prelude::*;
///
/// let games = vec![
///     Listing::new("1", "Quickdraw", "a fast puzzle game", 1_200.0),
///     Listing::new("2", "Slowburn", "a slow puzzle game about puzzles", 800.0),
/// ];
///
/// let ranker = Ranker::builder()
///     .params(Bm25Params::default().k1(1.2))
///     .build()
///     .unwrap();
///
/// let ranked = ranker.rank(&games, "puzzle game").unwrap();
/// assert_eq!(ranked[0].title, "Quickdraw");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ranker {
  scorer: BM25Scorer,
  #[cfg(feature = "cache")]
  cache: Option<Arc<StatisticsCache>>,
}

impl Ranker {
  /// Creates a ranker with the default BM25 parameters and no cache.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a new `RankerBuilder`.
  pub fn builder() -> RankerBuilder {
    RankerBuilder::new()
  }

  /// The BM25 parameters in use.
  pub fn params(&self) -> &Bm25Params {
    self.scorer.params()
  }

  /// The attached cache, if any.
  #[cfg(feature = "cache")]
  pub fn cache(&self) -> Option<&Arc<StatisticsCache>> {
    self.cache.as_ref()
  }

  /// Tokenize `documents` and build their statistics for repeated queries.
  ///
  /// # Errors
  ///
  /// Returns [`RankError::EmptyCorpus`](crate::error::RankError::EmptyCorpus)
  /// when `documents` is empty.
  pub fn prepare<'a, D: Document + Rankable>(&self, documents: &'a [D]) -> Result<PreparedCorpus<'a, D>> {
    let index = self.index_for(documents)?;
    Ok(PreparedCorpus::new(documents, index, self.scorer.clone()))
  }

  /// Rank `documents` against `query`, returning the scores as well.
  ///
  /// # Errors
  ///
  /// Returns [`RankError::EmptyCorpus`](crate::error::RankError::EmptyCorpus)
  /// when `documents` is empty.
  pub fn rank_scored<'a, D: Document + Rankable>(
    &self,
    documents: &'a [D],
    query: &str,
  ) -> Result<Vec<ScoredDocument<'a, D>>> {
    let start = Instant::now();
    let scored = self.prepare(documents)?.rank_scored(query);
    debug!(
      target: "indierank::engine",
      docs = documents.len(),
      duration_us = start.elapsed().as_micros() as u64,
      "Ranking completed"
    );
    Ok(scored)
  }

  /// Rank `documents` against `query`.
  ///
  /// Returns every document, most relevant first. Truncating to a top-k is
  /// left to the caller.
  ///
  /// # Errors
  ///
  /// Returns [`RankError::EmptyCorpus`](crate::error::RankError::EmptyCorpus)
  /// when `documents` is empty.
  pub fn rank<'a, D: Document + Rankable>(&self, documents: &'a [D], query: &str) -> Result<Vec<&'a D>> {
    Ok(
      self
        .rank_scored(documents, query)?
        .into_iter()
        .map(|scored| scored.document)
        .collect(),
    )
  }

  #[cfg(feature = "cache")]
  fn index_for<D: Document + Rankable>(&self, documents: &[D]) -> Result<Arc<CorpusIndex>> {
    match &self.cache {
      Some(cache) => cache.get_or_build(documents),
      None => Ok(Arc::new(CorpusIndex::build(documents)?)),
    }
  }

  #[cfg(not(feature = "cache"))]
  fn index_for<D: Document + Rankable>(&self, documents: &[D]) -> Result<Arc<CorpusIndex>> {
    Ok(Arc::new(CorpusIndex::build(documents)?))
  }
}

/// A builder for creating `Ranker` instances.
#[derive(Debug, Default)]
pub struct RankerBuilder {
  params: Bm25Params,
  #[cfg(feature = "cache")]
  cache: Option<Arc<StatisticsCache>>,
}

impl RankerBuilder {
  /// Creates a new builder with the default parameters.
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the BM25 parameters.
  pub fn params(mut self, params: Bm25Params) -> Self {
    self.params = params;
    self
  }

  /// Sets `k1`, keeping the other parameters.
  pub fn k1(mut self, k1: f64) -> Self {
    self.params.k1 = k1;
    self
  }

  /// Sets `b`, keeping the other parameters.
  pub fn b(mut self, b: f64) -> Self {
    self.params.b = b;
    self
  }

  /// Attaches a statistics cache. The cache may be shared between rankers.
  #[cfg(feature = "cache")]
  pub fn cache(mut self, cache: Arc<StatisticsCache>) -> Self {
    self.cache = Some(cache);
    self
  }

  /// Builds the `Ranker`.
  ///
  /// # Errors
  ///
  /// Returns [`RankError::InvalidParameter`](crate::error::RankError::InvalidParameter)
  /// if the parameters are out of range.
  pub fn build(self) -> Result<Ranker> {
    Ok(Ranker {
      scorer: BM25Scorer::with_params(self.params)?,
      #[cfg(feature = "cache")]
      cache: self.cache,
    })
  }
}
