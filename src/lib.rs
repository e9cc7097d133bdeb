//! indierank - BM25 relevance ranking for short text listings.
//!
//! Documents are tokenized, corpus statistics are built once, and every
//! document is scored against the query with Okapi BM25. The result is the
//! full document list ordered by descending score, with ties kept in input
//! order.
//!
//! ```rust
//! use indierank::prelude::*;
//!
//! let games = vec![
//!     Listing::new("1", "Quickdraw", "a fast puzzle game", 1_200.0),
//!     Listing::new("2", "Starfall", "a space shooter", 800.0),
//! ];
//!
//! let ranked = rank(&games, "space").unwrap();
//! assert_eq!(ranked[0].title, "Starfall");
//! ```

pub mod bm25;
#[cfg(feature = "cache")]
pub mod cache;
pub mod config;
pub mod corpus;
pub mod document;
pub mod engine;
pub mod error;
pub mod stats;
pub mod tokenizer;
pub mod types;

pub mod prelude {
  //! Convenient re-exports for common types and traits.

  pub use crate::bm25::*;
  #[cfg(feature = "cache")]
  pub use crate::cache::*;
  pub use crate::config::*;
  pub use crate::corpus::*;
  pub use crate::document::*;
  pub use crate::engine::*;
  pub use crate::error::RankError;
  pub use crate::stats::*;
  pub use crate::tokenizer::*;
  pub use crate::types::*;
}
