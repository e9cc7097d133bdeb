//! Core data types shared by the ranking components.

use serde::Serialize;

/// Marker for document types the ranker can work over.
///
/// With the `parallel` feature documents are scored across threads, so they
/// must be `Send + Sync`. Enabling that feature anywhere in a build therefore
/// tightens the bounds on [`rank`](crate::engine::rank) and
/// [`Ranker::prepare`](crate::engine::Ranker::prepare) for every caller.
#[cfg(feature = "parallel")]
pub trait Rankable: Send + Sync {}
#[cfg(feature = "parallel")]
impl<T: Send + Sync> Rankable for T {}

#[cfg(not(feature = "parallel"))]
pub trait Rankable {}
#[cfg(not(feature = "parallel"))]
impl<T> Rankable for T {}

/// Type alias for document identifiers.
pub type DocumentId = String;

/// A document paired with its relevance score.
///
/// `ScoredDocument` borrows the caller's document; it lives only as long as
/// the ranking result it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredDocument<'a, T> {
  /// The ranked document.
  pub document: &'a T,
  /// The BM25 score. Zero when no query term occurs in the document.
  pub score: f64,
  /// Position of the document in the input slice. Ties are ordered by it.
  pub position: usize,
}

impl<'a, T> ScoredDocument<'a, T> {
  /// Creates a new scored document.
  pub fn new(document: &'a T, score: f64, position: usize) -> Self {
    Self {
      document,
      score,
      position,
    }
  }
}

/// Sort scored documents by descending score.
///
/// The sort is stable, so documents with equal scores keep their input order.
pub(crate) fn sort_by_score<T>(scored: &mut [ScoredDocument<'_, T>]) {
  scored.sort_by(|a, b| b.score.total_cmp(&a.score));
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sort_by_score_is_stable() {
    let items = ["a", "b", "c", "d"];
    let mut scored = vec![
      ScoredDocument::new(&items[0], 1.0, 0),
      ScoredDocument::new(&items[1], 2.0, 1),
      ScoredDocument::new(&items[2], 1.0, 2),
      ScoredDocument::new(&items[3], 2.0, 3),
    ];
    sort_by_score(&mut scored);

    let order: Vec<&str> = scored.iter().map(|s| *s.document).collect();
    assert_eq!(order, vec!["b", "d", "a", "c"]);
  }
}
