// Structured floor plans: prompt building, reply extraction, generation pipeline.
// All LLM calls go through llm_client: no direct HTTP calls here.

pub mod extract;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;

pub use extract::extract;
pub use generator::generate_layout;
pub use models::{Layout, LayoutFailure, LayoutRequest, LayoutRequestBody, LayoutResult, Room};
