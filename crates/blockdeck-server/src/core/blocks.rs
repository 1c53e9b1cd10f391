//! Block Model
//!
//! The closed set of content-block variants a page is assembled from.
//! Validation is all-or-nothing: one malformed element rejects the whole
//! sequence, and unknown variant tags are rejected rather than dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::core::error::{Error, Result};

/// One content unit on a page. `id` is unique within a page's sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Text { id: i64, text: String },
    Image { id: i64, src: String },
}

impl Block {
    pub fn id(&self) -> i64 {
        match self {
            Block::Text { id, .. } | Block::Image { id, .. } => *id,
        }
    }
}

/// Validate an arbitrary JSON value as an ordered block sequence.
pub fn validate(raw: &Value) -> Result<Vec<Block>> {
    let items = raw.as_array().ok_or(Error::NotSequence)?;

    let mut blocks = Vec::with_capacity(items.len());
    let mut seen = HashSet::new();

    for item in items {
        let block = validate_block(item)?;
        if !seen.insert(block.id()) {
            return Err(Error::DuplicateBlockId { id: block.id() });
        }
        blocks.push(block);
    }

    Ok(blocks)
}

fn validate_block(item: &Value) -> Result<Block> {
    let kind = item
        .get("type")
        .and_then(Value::as_str)
        .ok_or(Error::MissingField { field: "type" })?;

    match kind {
        "text" => Ok(Block::Text {
            id: require_i64(item, "id")?,
            text: require_str(item, "text")?,
        }),
        "image" => Ok(Block::Image {
            id: require_i64(item, "id")?,
            src: require_str(item, "src")?,
        }),
        other => Err(Error::InvalidBlockKind {
            kind: other.to_string(),
        }),
    }
}

fn require_i64(item: &Value, field: &'static str) -> Result<i64> {
    item.get(field)
        .and_then(Value::as_i64)
        .ok_or(Error::MissingField { field })
}

fn require_str(item: &Value, field: &'static str) -> Result<String> {
    item.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(Error::MissingField { field })
}

/// Serialize a block sequence to its stored form.
pub fn serialize(blocks: &[Block]) -> Result<String> {
    serde_json::to_string(blocks).map_err(|e| Error::Internal(e.to_string()))
}

/// Deserialize a stored block sequence.
pub fn deserialize(stored: &str) -> Result<Vec<Block>> {
    serde_json::from_str(stored).map_err(|e| Error::Internal(e.to_string()))
}
