//! Axum route handler for the layout endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{Map, Value};

use crate::layout::generator::generate_layout;
use crate::layout::models::{LayoutRequest, LayoutRequestBody, LayoutResult};
use crate::routes::{rejected_body, run_isolated};
use crate::state::AppState;

/// POST /generate-layout
///
/// Always answers 200. Failures come back as an error-shaped body that still
/// carries `explanation` and an empty `rooms` list. A body that is not a JSON
/// object is rejected before the model is called.
pub async fn handle_generate_layout(
    State(state): State<AppState>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Json<LayoutResult> {
    let request = match body {
        Ok(Json(object)) => LayoutRequest::from(LayoutRequestBody::from_object(object)),
        Err(rejection) => return Json(rejected_body(rejection).into()),
    };

    let llm = state.llm.clone();
    let result = run_isolated(async move { generate_layout(llm.as_ref(), &request).await })
        .await
        .unwrap_or_else(LayoutResult::from);

    Json(result)
}
