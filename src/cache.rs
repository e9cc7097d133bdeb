//! Explicit cache of corpus indexes keyed by corpus fingerprint.
//!
//! Ranking the same documents repeatedly normally rebuilds the statistics
//! every call. A [`StatisticsCache`] attached to a
//! [`Ranker`](crate::engine::Ranker) keeps recent [`CorpusIndex`] values
//! instead, looked up by a hash of the documents' ids and texts.

use crate::corpus::CorpusIndex;
use crate::document::Document;
use crate::error::{RankError, Result};
use crate::types::Rankable;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;
use xxhash_rust::xxh3::Xxh3;

/// Default number of corpora a cache holds.
pub const DEFAULT_MAX_ENTRIES: usize = 64;

/// xxh3 hash of a corpus: the ordered ids and texts of its documents.
///
/// Every field is length-prefixed, so moving text between the id and the
/// body of a document, or between documents, changes the fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorpusFingerprint(u64);

impl CorpusFingerprint {
  /// Fingerprint `documents`.
  pub fn of<D: Document>(documents: &[D]) -> Self {
    let mut hasher = Xxh3::new();
    hasher.update(&(documents.len() as u64).to_le_bytes());
    for doc in documents {
      for field in [doc.id(), doc.text()] {
        hasher.update(&(field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
      }
    }
    Self(hasher.digest())
  }

  pub fn as_u64(&self) -> u64 {
    self.0
  }
}

impl fmt::Display for CorpusFingerprint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:016x}", self.0)
  }
}

struct CacheEntry {
  index: Arc<CorpusIndex>,
  inserted: u64,
}

/// Bounded, thread-safe map from corpus fingerprint to corpus index.
///
/// When full, inserting evicts the entry that was inserted first. Hits read
/// the map without locking; misses and inserts hold `write_lock`, so the
/// entry count never exceeds `max_entries` and a corpus missed by several
/// threads at once is built by only one of them.
pub struct StatisticsCache {
  entries: DashMap<CorpusFingerprint, CacheEntry>,
  write_lock: Mutex<()>,
  max_entries: usize,
  next_seq: AtomicU64,
  hits: AtomicU64,
  misses: AtomicU64,
}

impl StatisticsCache {
  /// Create a cache holding at most `max_entries` corpora.
  ///
  /// # Errors
  ///
  /// Returns [`RankError::InvalidParameter`] if `max_entries` is zero.
  pub fn new(max_entries: usize) -> Result<Self> {
    if max_entries == 0 {
      return Err(RankError::InvalidParameter {
        name: "max_entries",
        value: max_entries.to_string(),
      });
    }

    Ok(Self {
      entries: DashMap::new(),
      write_lock: Mutex::new(()),
      max_entries,
      next_seq: AtomicU64::new(0),
      hits: AtomicU64::new(0),
      misses: AtomicU64::new(0),
    })
  }

  /// Look up a cached index.
  pub fn get(&self, fingerprint: &CorpusFingerprint) -> Option<Arc<CorpusIndex>> {
    self.entries.get(fingerprint).map(|entry| entry.index.clone())
  }

  /// Return the cached index for `documents`, building and caching it on a
  /// miss.
  pub fn get_or_build<D: Document + Rankable>(&self, documents: &[D]) -> Result<Arc<CorpusIndex>> {
    let fingerprint = CorpusFingerprint::of(documents);

    if let Some(index) = self.lookup(&fingerprint, documents.len()) {
      self.hits.fetch_add(1, Ordering::Relaxed);
      debug!(target: "indierank::cache", %fingerprint, "Statistics cache hit");
      return Ok(index);
    }

    let _guard = self.write_lock.lock();

    // Another thread may have built this corpus while we waited.
    if let Some(index) = self.lookup(&fingerprint, documents.len()) {
      self.hits.fetch_add(1, Ordering::Relaxed);
      debug!(target: "indierank::cache", %fingerprint, "Statistics cache hit after wait");
      return Ok(index);
    }

    self.misses.fetch_add(1, Ordering::Relaxed);
    let index = Arc::new(CorpusIndex::build(documents)?);
    self.insert_locked(fingerprint, index.clone());
    debug!(
      target: "indierank::cache",
      %fingerprint,
      docs = documents.len(),
      entries = self.entries.len(),
      "Statistics cache miss"
    );
    Ok(index)
  }

  /// A length mismatch means a fingerprint collision; treat it as a miss.
  fn lookup(&self, fingerprint: &CorpusFingerprint, doc_count: usize) -> Option<Arc<CorpusIndex>> {
    self.get(fingerprint).filter(|index| index.len() == doc_count)
  }

  /// Insert an index, evicting the oldest entry if the cache is full.
  pub fn insert(&self, fingerprint: CorpusFingerprint, index: Arc<CorpusIndex>) {
    let _guard = self.write_lock.lock();
    self.insert_locked(fingerprint, index);
  }

  /// Caller must hold `write_lock`.
  fn insert_locked(&self, fingerprint: CorpusFingerprint, index: Arc<CorpusIndex>) {
    if !self.entries.contains_key(&fingerprint) && self.entries.len() >= self.max_entries {
      self.evict_oldest();
    }

    let inserted = self.next_seq.fetch_add(1, Ordering::Relaxed);
    self.entries.insert(fingerprint, CacheEntry { index, inserted });
  }

  fn evict_oldest(&self) {
    let oldest = self
      .entries
      .iter()
      .min_by_key(|entry| entry.value().inserted)
      .map(|entry| *entry.key());

    if let Some(fingerprint) = oldest {
      self.entries.remove(&fingerprint);
      debug!(target: "indierank::cache", %fingerprint, "Evicted cached statistics");
    }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn max_entries(&self) -> usize {
    self.max_entries
  }

  /// Drop every cached index.
  pub fn clear(&self) {
    self.entries.clear();
  }

  /// Lookups served from the cache.
  pub fn hits(&self) -> u64 {
    self.hits.load(Ordering::Relaxed)
  }

  /// Lookups that had to build an index.
  pub fn misses(&self) -> u64 {
    self.misses.load(Ordering::Relaxed)
  }
}

impl Default for StatisticsCache {
  fn default() -> Self {
    Self {
      entries: DashMap::new(),
      write_lock: Mutex::new(()),
      max_entries: DEFAULT_MAX_ENTRIES,
      next_seq: AtomicU64::new(0),
      hits: AtomicU64::new(0),
      misses: AtomicU64::new(0),
    }
  }
}

impl fmt::Debug for StatisticsCache {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StatisticsCache")
      .field("entries", &self.entries.len())
      .field("max_entries", &self.max_entries)
      .field("hits", &self.hits())
      .field("misses", &self.misses())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::document::Listing;

  fn corpus(texts: &[&str]) -> Vec<Listing> {
    texts
      .iter()
      .enumerate()
      .map(|(i, text)| Listing::new(i.to_string(), format!("Game {i}"), *text, 0.0))
      .collect()
  }

  #[test]
  fn test_fingerprint_is_stable() {
    let docs = corpus(&["fast puzzle", "slow puzzle"]);
    assert_eq!(CorpusFingerprint::of(&docs), CorpusFingerprint::of(&docs.clone()));
    assert_eq!(CorpusFingerprint::of(&docs).to_string().len(), 16);
  }

  #[test]
  fn test_fingerprint_changes_with_content_and_order() {
    let docs = corpus(&["fast puzzle", "slow puzzle"]);
    let edited = corpus(&["fast puzzle", "slow puzzles"]);
    let reversed: Vec<Listing> = docs.iter().rev().cloned().collect();

    assert_ne!(CorpusFingerprint::of(&docs), CorpusFingerprint::of(&edited));
    assert_ne!(CorpusFingerprint::of(&docs), CorpusFingerprint::of(&reversed));
  }

  #[test]
  fn test_fingerprint_field_boundaries() {
    let a = vec![Listing::new("ab", "", "c", 0.0)];
    let b = vec![Listing::new("a", "", "bc", 0.0)];
    assert_ne!(CorpusFingerprint::of(&a), CorpusFingerprint::of(&b));
  }

  #[test]
  fn test_get_or_build_hits_after_miss() {
    let cache = StatisticsCache::new(4).unwrap();
    let docs = corpus(&["fast puzzle", "slow puzzle"]);

    let first = cache.get_or_build(&docs).unwrap();
    let second = cache.get_or_build(&docs).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.misses(), 1);
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.len(), 1);
  }

  #[test]
  fn test_eviction_removes_oldest() {
    let cache = StatisticsCache::new(2).unwrap();
    let a = corpus(&["alpha"]);
    let b = corpus(&["beta"]);
    let c = corpus(&["gamma"]);

    cache.get_or_build(&a).unwrap();
    cache.get_or_build(&b).unwrap();
    cache.get_or_build(&c).unwrap();

    assert_eq!(cache.len(), 2);
    assert!(cache.get(&CorpusFingerprint::of(&a)).is_none());
    assert!(cache.get(&CorpusFingerprint::of(&b)).is_some());
    assert!(cache.get(&CorpusFingerprint::of(&c)).is_some());
  }

  #[test]
  fn test_empty_corpus_is_not_cached() {
    let cache = StatisticsCache::default();
    let empty: Vec<Listing> = Vec::new();
    assert!(matches!(cache.get_or_build(&empty), Err(RankError::EmptyCorpus)));
    assert!(cache.is_empty());
  }

  #[test]
  fn test_zero_capacity_rejected() {
    assert!(matches!(
      StatisticsCache::new(0),
      Err(RankError::InvalidParameter { name: "max_entries", .. })
    ));
  }

  #[test]
  fn test_concurrent_misses_respect_capacity() {
    let cache = StatisticsCache::new(2).unwrap();
    let corpora: Vec<Vec<Listing>> = (0..8)
      .map(|i| corpus(&[format!("genre{i} game").as_str()]))
      .collect();

    for _ in 0..50 {
      std::thread::scope(|scope| {
        for docs in &corpora {
          let cache = &cache;
          scope.spawn(move || {
            cache.get_or_build(docs).unwrap();
            assert!(cache.len() <= 2);
          });
        }
      });
      assert!(cache.len() <= 2);
    }
  }

  #[test]
  fn test_concurrent_misses_on_same_corpus_build_once() {
    let cache = StatisticsCache::new(4).unwrap();
    let docs = corpus(&["fast puzzle", "slow puzzle"]);

    let indexes: Vec<Arc<CorpusIndex>> = std::thread::scope(|scope| {
      let handles: Vec<_> = (0..8)
        .map(|_| scope.spawn(|| cache.get_or_build(&docs).unwrap()))
        .collect();
      handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(cache.misses(), 1);
    assert_eq!(cache.hits(), 7);
    assert!(indexes.iter().all(|index| Arc::ptr_eq(index, &indexes[0])));
  }

  #[test]
  fn test_clear() {
    let cache = StatisticsCache::default();
    cache.get_or_build(&corpus(&["alpha"])).unwrap();
    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.max_entries(), DEFAULT_MAX_ENTRIES);
  }
}
