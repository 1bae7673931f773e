use crate::types::{CombinationVariant, EmojiRecord, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Static lookup table over the emoji metadata supplied by the UI layer.
///
/// Loaded once per process; resolution is a pure function of the table and
/// the two ids, with no side effects beyond diagnostics.
pub struct EmojiCatalog {
    records: HashMap<String, EmojiRecord>,
}

impl EmojiCatalog {
    pub fn from_records(records: Vec<EmojiRecord>) -> Self {
        let records: HashMap<String, EmojiRecord> = records
            .into_iter()
            .map(|r| (r.emoji_codepoint.clone(), r))
            .collect();
        info!("Loaded emoji catalog with {} records", records.len());
        Self { records }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        debug!("Parsing emoji catalog ({} bytes)", content.len());
        let records: Vec<EmojiRecord> = serde_json::from_str(content)?;
        Ok(Self::from_records(records))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn get(&self, id: &str) -> Option<&EmojiRecord> {
        self.records.get(id)
    }

    /// The human-readable label for an id, used when building prompts.
    pub fn label_of(&self, id: &str) -> Option<&str> {
        self.records.get(id).map(|r| r.alt.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up the canonical merge result for a pair of emoji ids.
    ///
    /// Fails closed: returns `None` when either id is empty or unknown, or
    /// when the partner mapping has no entries. When the variant list breaks
    /// the one-latest invariant (none flagged, or several), the first match
    /// is picked deterministically and the anomaly is logged rather than
    /// papered over.
    pub fn resolve(&self, left_id: &str, right_id: &str) -> Option<&CombinationVariant> {
        if left_id.is_empty() || right_id.is_empty() {
            return None;
        }

        let record = self.records.get(left_id)?;
        let variants = record.combinations.get(right_id)?;
        if variants.is_empty() {
            return None;
        }

        let latest: Vec<&CombinationVariant> =
            variants.iter().filter(|v| v.is_latest).collect();

        match latest.len() {
            1 => Some(latest[0]),
            0 => {
                warn!(
                    "No variant flagged latest for pair ({}, {}); picking first of {}",
                    left_id,
                    right_id,
                    variants.len()
                );
                variants.first()
            }
            n => {
                warn!(
                    "{} variants flagged latest for pair ({}, {}); picking first flagged",
                    n, left_id, right_id
                );
                Some(latest[0])
            }
        }
    }
}
