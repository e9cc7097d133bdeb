//! Rank game listings from a JSON file and print the top ten.
//!
//! ```text
//! cargo run --example top_listings -- demos/data/listings.json "puzzle game"
//! ```
//!
//! Debug events from the ranker are printed by the fmt subscriber.
use indierank::prelude::*;
use std::sync::Arc;
use std::time::Instant;

const DEFAULT_PATH: &str = "demos/data/listings.json";
const DEFAULT_QUERY: &str = "puzzle game";
const TOP: usize = 10;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .init();

  let mut args = std::env::args().skip(1);
  let path = args.next().unwrap_or_else(|| DEFAULT_PATH.to_string());
  let query = args.next().unwrap_or_else(|| DEFAULT_QUERY.to_string());

  let raw = std::fs::read_to_string(&path)?;
  let listings: Vec<Listing> = serde_json::from_str(&raw)?;
  println!("Loaded {} listings from {}\n", listings.len(), path);

  let cache = Arc::new(StatisticsCache::default());
  let ranker = Ranker::builder().cache(cache.clone()).build()?;

  let start = Instant::now();
  let ranked = ranker.rank_scored(&listings, &query)?;

  println!("Top Ranked Games for {:?}:", query);
  for (rank, scored) in ranked.iter().take(TOP).enumerate() {
    println!(
      "{}. {} - Popularity Score: {}",
      rank + 1,
      scored.document.title,
      scored.document.popularity
    );
  }

  // A second query over the same listings reuses the cached statistics.
  let again = ranker.rank(&listings, "survival")?;
  println!("\nBest match for \"survival\": {}", again[0].title);
  println!(
    "Ranked twice in {:?} (cache hits: {}, misses: {})",
    start.elapsed(),
    cache.hits(),
    cache.misses()
  );

  Ok(())
}
