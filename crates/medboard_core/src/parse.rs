use crate::state::EntryKind;

/// Explicit result of parsing one event-stream payload.
///
/// Parsing never fails: anything that is not a JSON object carrying a string
/// `message` field degrades to `Raw` and the consumer decides what to do with
/// the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedMessage {
    Parsed {
        message: String,
        /// The payload's own `type` tag, when it carries a recognized one.
        kind: Option<EntryKind>,
    },
    Raw(String),
}

pub fn parse_stream_message(raw: &str) -> ParsedMessage {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => return ParsedMessage::Raw(raw.to_string()),
    };
    let Some(object) = value.as_object() else {
        return ParsedMessage::Raw(raw.to_string());
    };
    match object.get("message").and_then(|m| m.as_str()) {
        Some(message) => ParsedMessage::Parsed {
            message: message.to_string(),
            kind: object
                .get("type")
                .and_then(|t| t.as_str())
                .and_then(EntryKind::from_tag),
        },
        None => ParsedMessage::Raw(raw.to_string()),
    }
}

/// Extracts the numeric `progress` field from a progress-channel payload.
pub fn parse_progress(raw: &str) -> Option<f64> {
    serde_json::from_str::<serde_json::Value>(raw)
        .ok()?
        .get("progress")?
        .as_f64()
}

/// Splits the research form's raw questions input on `;`, trimming each
/// entry and discarding empty ones. Order is preserved.
pub fn split_questions(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|question| !question.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
