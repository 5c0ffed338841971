pub mod design_file;

use crate::domain::ports::ConfigProvider;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Parser;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(
    feature = "cli",
    command(name = "complidesign"),
    command(about = "Landfill liner design assistant: BoQ, cross-section and 3D rendering via a generative API")
)]
pub struct CliConfig {
    /// TOML design file; omitted means the built-in default profile
    #[cfg_attr(feature = "cli", arg(long))]
    pub design: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./output"))]
    pub output_path: String,

    #[cfg_attr(
        feature = "cli",
        arg(long, default_value = "https://generativelanguage.googleapis.com")
    )]
    pub api_base_url: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "gemini-2.5-flash"))]
    pub text_model: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "gemini-2.5-flash-image"))]
    pub image_model: String,

    /// Per-request timeout; the service side may still time out on its own
    #[cfg_attr(feature = "cli", arg(long))]
    pub timeout_seconds: Option<u64>,

    /// Also write a single design_package.zip with all three outputs
    #[cfg_attr(feature = "cli", arg(long))]
    pub bundle: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Log CPU/memory stats per phase"))]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn text_model(&self) -> &str {
        &self.text_model
    }

    fn image_model(&self) -> &str {
        &self.image_model
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn bundle_outputs(&self) -> bool {
        self.bundle
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validation::validate_url("api_base_url", &self.api_base_url)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_non_empty_string("text_model", &self.text_model)?;
        validation::validate_non_empty_string("image_model", &self.image_model)?;

        if let Some(path) = &self.design {
            validation::validate_path("design", path)?;
        }

        if let Some(timeout) = self.timeout_seconds {
            if timeout == 0 {
                return Err(crate::utils::error::DesignError::InvalidConfigValueError {
                    field: "timeout_seconds".to_string(),
                    value: timeout.to_string(),
                    reason: "Timeout must be at least 1 second".to_string(),
                });
            }
        }

        Ok(())
    }
}
