//! Documents the ranker can consume.
//!
//! Any type exposing a stable identifier and a text body can be ranked by
//! implementing [`Document`]. Two implementations are provided: [`Listing`],
//! the game listing record, and [`JsonDocument`], a loosely structured JSON
//! record with named id and text fields.

use crate::error::{RankError, Result};
use crate::tokenizer::json_type_name;
use crate::types::DocumentId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A rankable document.
///
/// The ranker only reads these two accessors. Other fields on the
/// implementing type are never inspected.
pub trait Document {
  /// A stable identifier for the document.
  fn id(&self) -> &str;

  /// The text the document is ranked on.
  fn text(&self) -> &str;
}

impl<D: Document + ?Sized> Document for &D {
  fn id(&self) -> &str {
    (**self).id()
  }

  fn text(&self) -> &str {
    (**self).text()
  }
}

/// A game listing.
///
/// Listings are ranked on their description. The title and popularity are
/// carried along for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
  /// Identifier of the listing.
  pub id: DocumentId,
  /// Display title.
  pub title: String,
  /// Free-text summary. This is the ranked text.
  pub description: String,
  /// Popularity figure reported by the listing site.
  #[serde(default)]
  pub popularity: f64,
}

impl Listing {
  /// Creates a listing from already clean fields.
  pub fn new(
    id: impl Into<DocumentId>,
    title: impl Into<String>,
    description: impl Into<String>,
    popularity: f64,
  ) -> Self {
    Self {
      id: id.into(),
      title: title.into(),
      description: description.into(),
      popularity,
    }
  }

  /// Creates a listing from raw scraped field text.
  ///
  /// The title is trimmed, whitespace runs in the description collapse to a
  /// single space, and the popularity may use `,` as a thousands separator.
  ///
  /// # Errors
  ///
  /// Returns [`RankError::InvalidInput`] if the popularity is not a number.
  pub fn from_raw(
    id: impl Into<DocumentId>,
    title: &str,
    description: &str,
    popularity: &str,
  ) -> Result<Self> {
    Ok(Self {
      id: id.into(),
      title: title.trim().to_string(),
      description: collapse_whitespace(description),
      popularity: parse_popularity(popularity)?,
    })
  }
}

impl Document for Listing {
  fn id(&self) -> &str {
    &self.id
  }

  fn text(&self) -> &str {
    &self.description
  }
}

/// Collapse every whitespace run to one space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a popularity figure such as `"12,345"` or `"1,024.5"`.
pub fn parse_popularity(raw: &str) -> Result<f64> {
  let cleaned = raw.trim().replace(',', "");
  cleaned
    .parse::<f64>()
    .map_err(|_| RankError::InvalidInput(format!("popularity is not a number: {raw:?}")))
}

/// A document backed by a JSON record.
///
/// The id and text are pulled out once, at construction, from dotted field
/// paths such as `"meta.id"`. The full record is kept as payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonDocument {
  id: DocumentId,
  text: String,
  record: Value,
}

impl JsonDocument {
  /// Build a document from `record`.
  ///
  /// # Errors
  ///
  /// Returns [`RankError::InvalidInput`] when the id field is missing or is
  /// not a string or number, or when the text field is missing, null or not
  /// a string.
  pub fn from_value(record: Value, id_field: &str, text_field: &str) -> Result<Self> {
    let id = match get_nested_field(&record, id_field) {
      Some(Value::String(s)) => s.clone(),
      Some(Value::Number(n)) => n.to_string(),
      Some(other) => {
        return Err(RankError::InvalidInput(format!(
          "id field {id_field:?} must be a string or number, found {}",
          json_type_name(other)
        )))
      }
      None => {
        return Err(RankError::InvalidInput(format!(
          "missing id field {id_field:?}"
        )))
      }
    };

    let text = match get_nested_field(&record, text_field) {
      Some(Value::String(s)) => s.clone(),
      Some(other) => {
        return Err(RankError::InvalidInput(format!(
          "text field {text_field:?} must be a string, found {}",
          json_type_name(other)
        )))
      }
      None => {
        return Err(RankError::InvalidInput(format!(
          "missing text field {text_field:?}"
        )))
      }
    };

    Ok(Self { id, text, record })
  }

  /// The original record.
  pub fn record(&self) -> &Value {
    &self.record
  }
}

impl Document for JsonDocument {
  fn id(&self) -> &str {
    &self.id
  }

  fn text(&self) -> &str {
    &self.text
  }
}

/// Get a nested field from a JSON value.
fn get_nested_field<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
  let mut current = value;
  for part in path.split('.') {
    current = current.get(part)?;
  }
  Some(current)
}
