use indierank::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Product {
  sku: String,
  name: String,
  blurb: String,
  price: f64,
}

impl Document for Product {
  fn id(&self) -> &str {
    &self.sku
  }

  fn text(&self) -> &str {
    &self.blurb
  }
}

fn products() -> Vec<Product> {
  vec![
    Product {
      sku: "L-1".to_string(),
      name: "Laptop".to_string(),
      blurb: "Thin laptop with a bright screen".to_string(),
      price: 1000.0,
    },
    Product {
      sku: "P-2".to_string(),
      name: "Phone".to_string(),
      blurb: "Phone with a bright screen and a long battery".to_string(),
      price: 500.0,
    },
    Product {
      sku: "M-3".to_string(),
      name: "Mouse".to_string(),
      blurb: "Wireless mouse".to_string(),
      price: 20.0,
    },
  ]
}

#[test]
fn test_custom_document() {
  let items = products();
  let ranked = rank(&items, "battery").unwrap();

  assert_eq!(ranked.len(), 3);
  assert_eq!(ranked[0].name, "Phone");
  // Non-matching items keep their input order.
  assert_eq!(ranked[1].name, "Laptop");
  assert_eq!(ranked[2].name, "Mouse");
}

#[test]
fn test_payload_is_untouched() {
  let items = products();
  let before = items.clone();
  let ranked = rank(&items, "wireless mouse").unwrap();

  assert_eq!(ranked[0], &before[2]);
  assert_eq!(items, before);
}

#[test]
fn test_json_documents() {
  let records = vec![
    json!({"id": 1, "game": {"summary": "Open world survival crafting"}}),
    json!({"id": 2, "game": {"summary": "Turn based survival strategy"}}),
    json!({"id": 3, "game": {"summary": "Rhythm game"}}),
  ];

  let docs: Vec<JsonDocument> = records
    .into_iter()
    .map(|record| JsonDocument::from_value(record, "id", "game.summary"))
    .collect::<Result<_, _>>()
    .unwrap();

  let ranked = rank(&docs, "strategy").unwrap();
  assert_eq!(ranked[0].id(), "2");
  assert_eq!(ranked[0].record()["game"]["summary"], "Turn based survival strategy");
}

#[test]
fn test_json_document_null_text_is_rejected() {
  let result = JsonDocument::from_value(json!({"id": 1, "summary": null}), "id", "summary");
  assert!(matches!(result, Err(RankError::InvalidInput(_))));
}
