// Adapters layer: concrete implementations for external systems (generation API, storage).

pub mod gemini;
pub mod local;
