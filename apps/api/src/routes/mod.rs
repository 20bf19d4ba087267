pub mod health;

use std::future::Future;

use axum::{
    extract::rejection::JsonRejection,
    routing::{get, post},
    Router,
};
use tracing::{error, warn};

use crate::design::handlers::handle_generate_design;
use crate::errors::{ErrorKind, Fault};
use crate::layout::handlers::handle_generate_layout;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate-layout", post(handle_generate_layout))
        .route("/generate-design", post(handle_generate_design))
        .with_state(state)
}

/// Runs a generation task on its own tokio task so a panic inside it
/// surfaces as an `InternalError` instead of tearing down the connection.
pub(crate) async fn run_isolated<F, T>(task: F) -> Result<T, Fault>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(task).await.map_err(|e| {
        error!("Generation task aborted: {e}");
        Fault::new(ErrorKind::InternalError, format!("Generation task aborted: {e}"))
    })
}

/// Request bodies that are not a JSON object still get a well-formed answer.
pub(crate) fn rejected_body(rejection: JsonRejection) -> Fault {
    warn!("Rejected request body: {rejection}");
    Fault::new(
        ErrorKind::InternalError,
        format!("Invalid request body: {}", rejection.body_text()),
    )
}
