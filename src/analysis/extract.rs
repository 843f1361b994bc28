//! Recovery of a JSON array from free-form model output.
//!
//! Models wrap payloads in markdown fences, prepend prose, or nest the array
//! inside an envelope object. Strategies run in order from cheapest to
//! greediest; the first that yields an array wins.

use serde_json::Value;

/// Outcome of attempting to pull a JSON array out of model text.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// An array was recovered; entries are unvalidated.
    Parsed(Vec<Value>),
    /// No strategy produced an array.
    Unrecognized,
}

/// Extract a JSON array from model output.
///
/// 1. Strip markdown code fences and parse the remainder directly.
/// 2. If that parses to an object instead, take its first array-valued
///    property (envelopes like `{"results": [...]}`).
/// 3. Slice from the first `[` to the last `]` and parse that.
pub fn extract_array(text: &str) -> Extraction {
    let stripped = strip_code_fences(text);
    let trimmed = stripped.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        match value {
            Value::Array(entries) => return Extraction::Parsed(entries),
            Value::Object(map) => {
                for (_, candidate) in map {
                    if let Value::Array(entries) = candidate {
                        return Extraction::Parsed(entries);
                    }
                }
            }
            _ => {}
        }
    }

    if let Some(slice) = bracket_slice(trimmed) {
        if let Ok(Value::Array(entries)) = serde_json::from_str::<Value>(slice) {
            return Extraction::Parsed(entries);
        }
    }

    Extraction::Unrecognized
}

/// Remove markdown code fence markers wherever they appear.
///
/// The longer marker goes first so ```` ```json ```` is not left as a
/// dangling "json" token.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "")
}

/// Greedy slice from the first `[` to the last `]`, inclusive.
fn bracket_slice(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
