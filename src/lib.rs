pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::gemini::GeminiClient;
pub use crate::adapters::local::LocalStorage;
pub use crate::config::{design_file::DesignFile, CliConfig};
pub use crate::core::{
    collector::InputCollector, engine::DesignEngine, orchestrator::Orchestrator,
    presenter::Presenter,
};
pub use crate::domain::model::{
    BoQItem, DesignInputs, GenerationOutputs, ImagePayload, LinerLayer, Material,
};
pub use crate::utils::error::{DesignError, Result};
