//! Parse and normalise model output into a structured query

use crate::dates::resolve_date;
use crate::error::ExtractorError;
use crate::fallback::find_intent;
use gaine_domain::{Gaine, Intent, StructuredQuery, TimeRef};
use serde_json::{Map, Value};

/// Parse a model response into a complete query
///
/// Every field is normalised independently. The result is accepted only
/// when both intent and gaine survive normalisation.
pub fn parse_model_response(response: &str) -> Result<StructuredQuery, ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)?;
    let obj = json
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON object".to_string()))?;

    let intent = obj.get("intent").and_then(normalize_intent);
    let gaine = obj.get("gaine").and_then(normalize_gaine);
    let time = obj
        .get("time")
        .and_then(Value::as_object)
        .map(normalize_time)
        .unwrap_or_default();

    match (intent, gaine) {
        (Some(intent), Some(gaine)) => Ok(StructuredQuery::new(Some(intent), Some(gaine), time)),
        (None, _) => Err(ExtractorError::Incomplete("no usable intent".to_string())),
        (_, None) => Err(ExtractorError::Incomplete("no usable gaine".to_string())),
    }
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
        }

        // Skip the opening fence line and the closing one
        let json_lines = &lines[1..lines.len().saturating_sub(1)];
        Ok(json_lines.join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

fn normalize_intent(value: &Value) -> Option<Intent> {
    find_intent(value.as_str()?)
}

/// Accepts `{"value": "gsb11"}` or a bare string; the value is validated, never repaired
fn normalize_gaine(value: &Value) -> Option<Gaine> {
    let raw = match value {
        Value::Object(obj) => obj.get("value")?.as_str()?,
        Value::String(s) => s.as_str(),
        _ => return None,
    };
    Gaine::parse(raw)
}

fn normalize_time(obj: &Map<String, Value>) -> TimeRef {
    let date_field = |key: &str| obj.get(key).and_then(Value::as_str).and_then(resolve_date);

    if let (Some(from), Some(to)) = (date_field("from"), date_field("to")) {
        return TimeRef::range(from, to);
    }

    date_field("date")
        .or_else(|| date_field("single"))
        .map(TimeRef::day)
        .unwrap_or_default()
}
