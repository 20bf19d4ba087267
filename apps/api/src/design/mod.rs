//! Free-text tiny home designs: same inputs as a layout, prose output.

pub mod handlers;
pub mod prompts;

use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::{ErrorKind, Fault};
use crate::layout::models::LayoutRequest;
use crate::llm_client::ChatCompletion;
use prompts::{build_design_prompt, DESIGN_SYSTEM};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Design {
    pub design: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignFailure {
    pub error: ErrorKind,
    pub detail: String,
    pub explanation: String,
    #[serde(rename = "rawContent", skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DesignResult {
    Design(Design),
    Failure(DesignFailure),
}

impl DesignResult {
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            DesignResult::Design(_) => None,
            DesignResult::Failure(failure) => Some(failure.error),
        }
    }
}

impl From<Fault> for DesignResult {
    fn from(fault: Fault) -> Self {
        DesignResult::Failure(DesignFailure {
            error: fault.kind,
            detail: fault.detail,
            explanation: fault.kind.explanation().to_string(),
            raw_content: fault.raw_content,
        })
    }
}

/// Asks for a prose design. Like `generate_layout`, never returns an error.
pub async fn generate_design(llm: &dyn ChatCompletion, request: &LayoutRequest) -> DesignResult {
    let request_id = Uuid::new_v4();
    let span = info_span!("generate_design", %request_id);

    async move {
        let prompt = build_design_prompt(request);
        let fault = match llm.complete(DESIGN_SYSTEM, &prompt).await {
            Ok(text) if !text.trim().is_empty() => {
                info!(chars = text.len(), "Design generated");
                return DesignResult::Design(Design {
                    design: text.trim().to_string(),
                });
            }
            Ok(_) => Fault::new(ErrorKind::EmptyResponseError, "LLM returned blank content"),
            Err(e) => Fault::from(e),
        };
        warn!(kind = %fault.kind, "Design generation failed: {}", fault.detail);
        fault.into()
    }
    .instrument(span)
    .await
}
