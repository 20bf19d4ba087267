//! Layout generation: orchestrates one request end to end.
//!
//! Flow: build prompt → one chat-completion call → extract → LayoutResult.
//!
//! Every failure is folded into the result; this function has no error path.

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::Fault;
use crate::layout::extract::extract;
use crate::layout::models::{LayoutRequest, LayoutResult};
use crate::layout::prompts::build_layout_messages;
use crate::llm_client::ChatCompletion;

pub async fn generate_layout(llm: &dyn ChatCompletion, request: &LayoutRequest) -> LayoutResult {
    let request_id = Uuid::new_v4();
    let span = info_span!("generate_layout", %request_id, people = request.occupant_count);

    async move {
        let (system, user) = build_layout_messages(request);

        let reply = match llm.complete(system, &user).await {
            Ok(reply) => reply,
            Err(e) => {
                let fault = Fault::from(e);
                warn!(kind = %fault.kind, "Layout generation failed: {}", fault.detail);
                return fault.into();
            }
        };

        let result = extract(&reply);
        match result.error_kind() {
            None => info!(rooms = result.rooms().len(), "Layout generated"),
            Some(kind) => warn!(%kind, "Layout reply could not be used"),
        }
        result
    }
    .instrument(span)
    .await
}
