pub mod config;
pub mod design;
pub mod errors;
pub mod layout;
pub mod llm_client;
pub mod routes;
pub mod state;

pub use config::{Config, LlmConfig};
pub use errors::{ErrorKind, Fault};
pub use layout::{extract, generate_layout, Layout, LayoutRequest, LayoutResult, Room};
pub use llm_client::{ChatClient, ChatCompletion, LlmError};
pub use routes::build_router;
pub use state::AppState;
