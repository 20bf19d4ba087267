//! Prompt Builder for structured floor plans.
//!
//! The system prompt pins the reply to a strict JSON shape; the user prompt
//! lists the normalized request fields one per line. Building never fails.

use crate::layout::models::LayoutRequest;
use crate::llm_client::prompts::FEATURE_EXAMPLES;

pub const LAYOUT_SYSTEM: &str = "\
You are an expert in tiny home design. Always assume a practical style and California climate \
unless the request names a different climate or style. \
Respond ONLY with valid JSON in this structure:\n\
{\n  \"explanation\": \"...\",\n  \"rooms\": [\n    \
{\"name\":\"Room\",\"x\":0,\"y\":0,\"width\":3,\"length\":3,\"height\":2.5,\"features\":[\"door\",\"window\"]},\n    \
...\n  ]\n}\n\
Every room MUST have name, x, y, width, length, height (numbers, in meters) and features.";

/// Returns `(system, user)` for a layout request.
pub fn build_layout_messages(request: &LayoutRequest) -> (&'static str, String) {
    (LAYOUT_SYSTEM, build_layout_prompt(request))
}

pub fn build_layout_prompt(request: &LayoutRequest) -> String {
    let mut lines = vec![
        "Design a California-practical tiny home for:".to_string(),
        format!("- People: {}", request.occupant_count),
        format!("- Budget: {}", request.budget),
        format!("- Needs: {}", request.needs),
    ];
    if let Some(climate) = &request.climate {
        lines.push(format!("- Climate: {climate}"));
    }
    if let Some(style) = &request.style {
        lines.push(format!("- Style: {style}"));
    }
    lines.push(String::new());
    lines.push(format!(
        "Output ONLY JSON with \"explanation\" and a \"rooms\" list, each room having \
         x,y,width,length,height and features like {FEATURE_EXAMPLES}."
    ));
    lines.join("\n")
}
