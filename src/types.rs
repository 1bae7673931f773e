use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One row of the static emoji metadata table, keyed by codepoint sequence.
///
/// The wire format is the camelCase JSON the collaborating UI layer ships
/// (Noto emoji-kitchen metadata), loaded once and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmojiRecord {
    pub emoji_codepoint: String,
    /// Human-readable description, interpolated into prompts.
    pub alt: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Partner codepoint -> ordered list of historical merge results.
    #[serde(default)]
    pub combinations: HashMap<String, Vec<CombinationVariant>>,
}

/// One historical merge result for a pair. Exactly one variant per partner
/// list is supposed to carry `is_latest = true`; the catalog does not
/// guarantee it (see `EmojiCatalog::resolve`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationVariant {
    pub is_latest: bool,
    /// Opaque image reference; never interpreted by this crate.
    pub g_static_url: String,
    pub alt: String,
}

/// Parsed commentary for one emoji pairing.
///
/// The field names on the wire are the Chinese keys the generation service
/// is instructed to emit. All four fields are required: a reply missing any
/// of them is a parse failure, not a partial success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commentary {
    #[serde(rename = "组合")]
    pub combination: String,
    #[serde(rename = "解读")]
    pub interpretation: String,
    #[serde(rename = "锐评")]
    pub critique: String,
    #[serde(rename = "补刀")]
    pub postscript: String,
}

/// Immutable audit record of one generation attempt, success or failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub left_emoji: String,
    pub right_emoji: String,
    /// Image ref of the resolved combination at request time, if any.
    pub combined_url: Option<String>,
    /// Snapshot of the prompt template used for this attempt.
    pub prompt: String,
    /// `None` records a failed attempt.
    pub result: Option<Commentary>,
}

#[derive(Debug, thiserror::Error)]
pub enum CriticError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generation service returned status {status}")]
    Api { status: u16 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("no API key provided (set DEEPSEEK_API_KEY)")]
    MissingCredential,

    #[error("a generation attempt is already in flight")]
    Busy,

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CriticError>;
