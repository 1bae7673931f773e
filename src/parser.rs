use crate::types::{Commentary, CriticError, Result};
use tracing::debug;

/// Parses the raw text payload from the generation service into a
/// `Commentary`.
///
/// The service is instructed to reply with pure JSON but is observed to wrap
/// the object in prose, so parsing is two-tier: the whole payload first,
/// then the substring from the first `{` to the last `}`. Both tiers failing
/// is a `MalformedResponse`; there is no partial result.
pub fn parse_commentary(payload: &str) -> Result<Commentary> {
    match serde_json::from_str::<Commentary>(payload) {
        Ok(commentary) => Ok(commentary),
        Err(first_err) => {
            debug!("Full-payload parse failed ({}), trying embedded block", first_err);
            parse_embedded_block(payload)
        }
    }
}

fn parse_embedded_block(payload: &str) -> Result<Commentary> {
    let start = payload.find('{');
    let end = payload.rfind('}');

    let (start, end) = match (start, end) {
        (Some(s), Some(e)) if s < e => (s, e),
        _ => {
            return Err(CriticError::MalformedResponse(format!(
                "no JSON block found in payload: {}",
                truncate(payload, 120)
            )))
        }
    };

    serde_json::from_str::<Commentary>(&payload[start..=end]).map_err(|e| {
        CriticError::MalformedResponse(format!(
            "embedded block is not valid commentary ({}): {}",
            e,
            truncate(&payload[start..=end], 120)
        ))
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
