use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{Map, Value};

use crate::design::{generate_design, DesignResult};
use crate::layout::models::{LayoutRequest, LayoutRequestBody};
use crate::routes::{rejected_body, run_isolated};
use crate::state::AppState;

/// POST /generate-design
pub async fn handle_generate_design(
    State(state): State<AppState>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Json<DesignResult> {
    let request = match body {
        Ok(Json(object)) => LayoutRequest::from(LayoutRequestBody::from_object(object)),
        Err(rejection) => return Json(rejected_body(rejection).into()),
    };

    let llm = state.llm.clone();
    let result = run_isolated(async move { generate_design(llm.as_ref(), &request).await })
        .await
        .unwrap_or_else(DesignResult::from);

    Json(result)
}
