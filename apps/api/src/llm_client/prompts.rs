// Shared prompt fragments. Each feature module keeps its own prompts.rs
// alongside it; only cross-cutting pieces live here.

/// Persona line every tiny-home prompt opens with.
pub const DESIGNER_PERSONA: &str = "You are an expert in tiny home design.";

/// Feature tags the viewer knows how to render, quoted for prompt embedding.
pub const FEATURE_EXAMPLES: &str = r#"["door","window","plant","bed"]"#;
