//! Layout Extractor: recovers a structured layout from a model's free-form reply.
//!
//! Recovery order:
//! 1. a ```json fenced block (greedy: outermost `{...}` inside the fence)
//! 2. the first brace-balanced object, scanning from the first `{`
//! 3. the trimmed reply as-is (parsing then fails deterministically)
//!
//! The brace scan tracks string literals and escapes, so `{` or `}` inside a
//! quoted value never moves the depth counter.
//!
//! `extract` is pure: same input, same `LayoutResult`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::errors::{ErrorKind, Fault};
use crate::layout::models::{Layout, LayoutResult, FALLBACK_EXPLANATION};

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?i:json)?\s*(\{.*\})\s*```").expect("fence pattern is a valid regex")
});

/// Converts raw model text into a layout or an error-shaped result. Never panics.
pub fn extract(raw: &str) -> LayoutResult {
    let trimmed = raw.trim();
    let candidate = candidate_json(trimmed);

    let value: Value = match serde_json::from_str(candidate) {
        Ok(value) => value,
        Err(e) => {
            warn!("Layout reply is not valid JSON: {e}");
            return Fault::new(ErrorKind::ParseError, format!("Invalid layout JSON: {e}"))
                .with_raw(raw)
                .into();
        }
    };

    match normalize(value) {
        Ok(layout) => LayoutResult::Layout(layout),
        Err(fault) => {
            warn!("Layout reply has an unexpected shape: {}", fault.detail);
            fault.with_raw(raw).into()
        }
    }
}

/// Picks the text most likely to be the layout JSON.
pub fn candidate_json(trimmed: &str) -> &str {
    if let Some(inner) = FENCED_JSON.captures(trimmed).and_then(|c| c.get(1)) {
        return inner.as_str();
    }
    balanced_object(trimmed).unwrap_or(trimmed)
}

/// Span from the first `{` to its matching `}`, or `None` if it never closes.
pub fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Fills in `rooms` / `explanation` defaults. Beyond that only the outer shape
/// is checked: `explanation` a string, `rooms` a list of objects.
fn normalize(value: Value) -> Result<Layout, Fault> {
    let Value::Object(mut object) = value else {
        return Err(Fault::new(
            ErrorKind::UnexpectedShapeError,
            "Layout JSON is not an object",
        ));
    };

    if object.get("rooms").map_or(true, Value::is_null) {
        object.insert("rooms".to_string(), Value::Array(Vec::new()));
    }
    if object.get("explanation").map_or(true, Value::is_null) {
        object.insert(
            "explanation".to_string(),
            Value::String(FALLBACK_EXPLANATION.to_string()),
        );
    }

    serde_json::from_value(Value::Object(object)).map_err(|e| {
        Fault::new(
            ErrorKind::UnexpectedShapeError,
            format!("Layout JSON has an unexpected shape: {e}"),
        )
    })
}
