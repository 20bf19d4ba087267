use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ErrorKind, Fault};

/// Explanation used when the model's layout omits one.
pub const FALLBACK_EXPLANATION: &str = "Layout generated successfully.";

// ────────────────────────────────────────────────────────────────────────────
// Request
// ────────────────────────────────────────────────────────────────────────────

/// Inbound body fields exactly as the form posts them. Every field is loosely
/// typed: browsers send `num_people` as a string, scripts tend to send numbers.
///
/// Only ever built from a JSON object; handlers reject anything else.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutRequestBody {
    pub num_people: Value,
    pub budget: Value,
    pub needs: Value,
    pub climate: Value,
    pub style: Value,
}

impl LayoutRequestBody {
    /// Missing keys read as `null`; unknown keys are ignored.
    pub fn from_object(mut object: Map<String, Value>) -> Self {
        let mut take = |key: &str| object.remove(key).unwrap_or(Value::Null);
        Self {
            num_people: take("num_people"),
            budget: take("budget"),
            needs: take("needs"),
            climate: take("climate"),
            style: take("style"),
        }
    }
}

/// Normalized design request. `occupant_count` is always ≥ 1 and the text
/// fields are always present (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRequest {
    pub occupant_count: u32,
    pub budget: String,
    pub needs: String,
    pub climate: Option<String>,
    pub style: Option<String>,
}

impl From<LayoutRequestBody> for LayoutRequest {
    fn from(body: LayoutRequestBody) -> Self {
        Self {
            occupant_count: normalize_occupants(&body.num_people),
            budget: coerce_text(&body.budget),
            needs: coerce_text(&body.needs),
            climate: coerce_optional(&body.climate),
            style: coerce_optional(&body.style),
        }
    }
}

/// Positive JSON integer or integer string; anything else counts as one person.
fn normalize_occupants(value: &Value) -> u32 {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed
        .filter(|n| *n >= 1)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(1)
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce_optional(value: &Value) -> Option<String> {
    Some(coerce_text(value)).filter(|text| !text.trim().is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

/// One room of the floor plan, kept exactly as the model wrote it.
///
/// The prompt asks for `name`, `x`, `y`, `width`, `length`, `height` and
/// `features`, but none of them is enforced: values are unbounded and
/// integers stay integers on the way back out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Room(Map<String, Value>);

impl Room {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Numeric field such as `x` or `height`, if present and a number.
    pub fn dimension(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    /// String tags from `features`; non-string entries are skipped.
    pub fn features(&self) -> Vec<&str> {
        self.0
            .get("features")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Room {
    fn from(map: Map<String, Value>) -> Self {
        Room(map)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub explanation: String,
    pub rooms: Vec<Room>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Error-shaped body. Still carries `explanation` and an empty `rooms` list
/// so a renderer can treat it like any other layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutFailure {
    pub error: ErrorKind,
    pub detail: String,
    pub explanation: String,
    pub rooms: Vec<Room>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(rename = "rawContent", skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,
}

impl From<Fault> for LayoutFailure {
    fn from(fault: Fault) -> Self {
        Self {
            error: fault.kind,
            detail: fault.detail,
            explanation: fault.kind.explanation().to_string(),
            rooms: Vec::new(),
            raw: fault.raw,
            raw_content: fault.raw_content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LayoutResult {
    Layout(Layout),
    Failure(LayoutFailure),
}

impl LayoutResult {
    pub fn is_layout(&self) -> bool {
        matches!(self, LayoutResult::Layout(_))
    }

    pub fn explanation(&self) -> &str {
        match self {
            LayoutResult::Layout(layout) => &layout.explanation,
            LayoutResult::Failure(failure) => &failure.explanation,
        }
    }

    pub fn rooms(&self) -> &[Room] {
        match self {
            LayoutResult::Layout(layout) => &layout.rooms,
            LayoutResult::Failure(failure) => &failure.rooms,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            LayoutResult::Layout(_) => None,
            LayoutResult::Failure(failure) => Some(failure.error),
        }
    }
}

impl From<Fault> for LayoutResult {
    fn from(fault: Fault) -> Self {
        LayoutResult::Failure(fault.into())
    }
}
