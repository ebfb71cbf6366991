//! Parsing of text-model replies into prompt lists.

use serde_json::Value;

/// Which step of the fallback chain produced the prompts.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// The reply was a JSON array.
    List(Vec<String>),
    /// The reply was a JSON object; this is its first array value.
    MapValue(Vec<String>),
    /// The API answered without a usable list; the input is kept whole.
    RawText(Vec<String>),
    /// The call or the parse failed; the input is split on periods.
    SentenceSplit(Vec<String>),
}

impl Extraction {
    pub fn raw_text(text: &str) -> Self {
        Extraction::RawText(vec![text.to_string()])
    }

    pub fn sentence_split(text: &str) -> Self {
        Extraction::SentenceSplit(split_sentences(text))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Extraction::List(_) => "list",
            Extraction::MapValue(_) => "map_value",
            Extraction::RawText(_) => "raw_text",
            Extraction::SentenceSplit(_) => "sentence_split",
        }
    }

    pub fn prompts(&self) -> &[String] {
        match self {
            Extraction::List(p)
            | Extraction::MapValue(p)
            | Extraction::RawText(p)
            | Extraction::SentenceSplit(p) => p,
        }
    }

    pub fn into_prompts(self) -> Vec<String> {
        match self {
            Extraction::List(p)
            | Extraction::MapValue(p)
            | Extraction::RawText(p)
            | Extraction::SentenceSplit(p) => p,
        }
    }
}

/// Parse a successful reply body.
///
/// `Ok(None)` means valid JSON of the wrong shape; `Err` means invalid JSON.
pub fn parse_reply(body: &str) -> serde_json::Result<Option<Extraction>> {
    let cleaned = strip_code_fence(body.trim());
    let value: Value = serde_json::from_str(cleaned)?;

    Ok(match value {
        Value::Array(items) => Some(Extraction::List(into_strings(items))),
        Value::Object(map) => map.into_iter().find_map(|(_, value)| match value {
            Value::Array(items) => Some(Extraction::MapValue(into_strings(items))),
            _ => None,
        }),
        _ => None,
    })
}

/// Return the contents of the first fenced block, preferring a `json` tag.
pub fn strip_code_fence(content: &str) -> &str {
    let after_open = if let Some((_, rest)) = content.split_once("```json") {
        rest
    } else if let Some((_, rest)) = content.split_once("```") {
        rest
    } else {
        return content;
    };

    after_open
        .split_once("```")
        .map_or(after_open, |(inner, _)| inner)
        .trim()
}

/// Split on `.`, trim, and keep fragments longer than five characters.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|fragment| fragment.chars().count() > 5)
        .map(String::from)
        .collect()
}

// Non-string items keep their JSON text.
fn into_strings(items: Vec<Value>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .collect()
}
