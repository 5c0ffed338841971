pub mod collector;
pub mod engine;
pub mod orchestrator;
pub mod presenter;
pub mod prompt;

pub use crate::domain::model::{BoQItem, DesignInputs, GenerationOutputs, ImagePayload, LinerLayer, Material};
pub use crate::domain::ports::{ConfigProvider, GenerationService, Storage};
pub use crate::utils::error::Result;
