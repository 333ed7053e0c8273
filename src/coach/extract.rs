use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

pub const DEFAULT_CONFIRMATION: &str = "Meal logged successfully.";

lazy_static! {
    // First ```json marker up to the next ``` fence.
    static ref JSON_FENCE: Regex = Regex::new(r"(?s)```json(.*?)```").unwrap();
}

/// A model reply split into the text shown to the user and the optional
/// meal-logging payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedReply {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging_data: Option<Value>,
}

impl ExtractedReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            logging_data: None,
        }
    }
}

/// Best-effort extraction of a fenced JSON block from a model reply.
///
/// Anything unexpected (no fence, bad JSON, no `logging_data` key) yields the
/// raw reply as plain text.
pub fn extract(raw: &str) -> ExtractedReply {
    let Some(block) = JSON_FENCE.captures(raw).and_then(|c| c.get(1)) else {
        return ExtractedReply::text(raw);
    };

    let parsed: Value = match serde_json::from_str(block.as_str().trim()) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "fenced json block did not parse; returning raw reply");
            return ExtractedReply::text(raw);
        }
    };

    let Some(obj) = parsed.as_object() else {
        return ExtractedReply::text(raw);
    };
    let Some(logging_data) = obj.get("logging_data") else {
        return ExtractedReply::text(raw);
    };

    let content = obj
        .get("final_confirmation_text")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_CONFIRMATION);

    ExtractedReply {
        content: content.to_string(),
        // `"logging_data": null` confirms without anything to log
        logging_data: Some(logging_data).filter(|v| !v.is_null()).cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_confirmation_and_logging_data() {
        let raw = r#"Perfect, logging it now.
```json
{
  "final_confirmation_text": "Great! Meal logged.",
  "logging_data": {
    "components": [
      { "name": "Fried Egg", "portion": "2 large", "macros": { "protein": 12, "netCarbs": 1, "fat": 14, "calories": 180 } }
    ],
    "totals": { "protein": 12, "netCarbs": 1, "fat": 14, "calories": 180 }
  }
}
```"#;
        let out = extract(raw);
        assert_eq!(out.content, "Great! Meal logged.");
        let data = out.logging_data.unwrap();
        assert_eq!(data["components"][0]["name"], json!("Fried Egg"));
        assert_eq!(data["totals"]["calories"], json!(180));
    }

    #[test]
    fn plain_question_passes_through() {
        let raw = "How many eggs did you have, and were they fried or boiled?";
        assert_eq!(extract(raw), ExtractedReply::text(raw));
    }

    #[test]
    fn invalid_json_falls_back_to_raw_text() {
        let raw = "Here you go:\n```json\n{ \"logging_data\": { \"totals\": 12, }\n```";
        assert_eq!(extract(raw), ExtractedReply::text(raw));
    }

    #[test]
    fn missing_confirmation_uses_default() {
        let raw = "```json\n{\"logging_data\": {\"components\": []}}\n```";
        let out = extract(raw);
        assert_eq!(out.content, DEFAULT_CONFIRMATION);
        assert_eq!(out.logging_data, Some(json!({ "components": [] })));
    }

    #[test]
    fn block_without_logging_data_is_plain_text() {
        let raw = "```json\n{\"note\": \"nothing to log\"}\n```";
        assert_eq!(extract(raw), ExtractedReply::text(raw));
    }

    #[test]
    fn unterminated_fence_is_plain_text() {
        let raw = "```json\n{\"logging_data\": {}}";
        assert_eq!(extract(raw), ExtractedReply::text(raw));
    }

    #[test]
    fn only_first_block_is_used() {
        let raw = "```json\n{\"logging_data\": 1}\n``` and ```json\n{\"logging_data\": 2}\n```";
        assert_eq!(extract(raw).logging_data, Some(json!(1)));
    }

    #[test]
    fn null_logging_data_keeps_confirmation_without_data() {
        let raw = "```json\n{\"final_confirmation_text\":\"Nothing to log.\",\"logging_data\":null}\n```";
        let out = extract(raw);
        assert_eq!(out, ExtractedReply::text("Nothing to log."));
        let wire = serde_json::to_value(&out).unwrap();
        assert_eq!(wire, json!({ "content": "Nothing to log." }));
    }

    #[test]
    fn absent_logging_data_is_not_serialized() {
        let out = serde_json::to_value(ExtractedReply::text("hi")).unwrap();
        assert_eq!(out, json!({ "content": "hi" }));
    }
}
