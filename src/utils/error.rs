use thiserror::Error;

#[derive(Error, Debug)]
pub enum DesignError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Missing API key: set the {env_var} environment variable")]
    MissingApiKeyError { env_var: String },

    #[error("Generation service returned HTTP {status}: {body}")]
    ServiceStatusError { status: u16, body: String },

    #[error("Malformed structured response for {context}: {message}")]
    SchemaError { context: String, message: String },

    #[error("No image was generated for {kind}")]
    MissingImageError { kind: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    ExternalService,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DesignError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DesignError::ApiError(_) => ErrorCategory::Network,
            DesignError::ServiceStatusError { .. }
            | DesignError::SchemaError { .. }
            | DesignError::MissingImageError { .. } => ErrorCategory::ExternalService,
            DesignError::MissingApiKeyError { .. }
            | DesignError::ConfigError { .. }
            | DesignError::MissingConfigError { .. }
            | DesignError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DesignError::CsvError(_)
            | DesignError::SerializationError(_)
            | DesignError::ProcessingError { .. }
            | DesignError::ValidationError { .. } => ErrorCategory::Data,
            DesignError::IoError(_) | DesignError::ZipError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 缺少憑證時應用程式完全無法啟動
            DesignError::MissingApiKeyError { .. } => ErrorSeverity::Critical,
            DesignError::ConfigError { .. }
            | DesignError::MissingConfigError { .. }
            | DesignError::InvalidConfigValueError { .. }
            | DesignError::ValidationError { .. } => ErrorSeverity::High,
            DesignError::ApiError(_)
            | DesignError::ServiceStatusError { .. }
            | DesignError::SchemaError { .. }
            | DesignError::MissingImageError { .. } => ErrorSeverity::Medium,
            DesignError::CsvError(_)
            | DesignError::SerializationError(_)
            | DesignError::ProcessingError { .. }
            | DesignError::IoError(_)
            | DesignError::ZipError(_) => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DesignError::MissingApiKeyError { env_var } => {
                format!("Export {} with a valid API key and run again", env_var)
            }
            DesignError::ApiError(_) => {
                "Check network connectivity and the API base URL, then resubmit".to_string()
            }
            DesignError::ServiceStatusError { .. } => {
                "The generation service rejected the request; verify the model names and API key"
                    .to_string()
            }
            DesignError::SchemaError { .. } => {
                "The service returned malformed data; resubmit the design".to_string()
            }
            DesignError::MissingImageError { .. } => {
                "The service returned no image data; resubmit the design".to_string()
            }
            DesignError::ConfigError { .. }
            | DesignError::MissingConfigError { .. }
            | DesignError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
            DesignError::ValidationError { .. } => {
                "Correct the design inputs (positive area, at least one layer)".to_string()
            }
            DesignError::IoError(_) | DesignError::ZipError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            DesignError::CsvError(_)
            | DesignError::SerializationError(_)
            | DesignError::ProcessingError { .. } => {
                "Inspect the log for the underlying data problem".to_string()
            }
        }
    }

    /// 使用者可見的訊息：生成類失敗一律顯示同一句話，細節只進日誌
    pub fn user_friendly_message(&self) -> String {
        match self {
            DesignError::MissingApiKeyError { env_var } => {
                format!("API key not configured ({} is not set)", env_var)
            }
            DesignError::ApiError(_)
            | DesignError::ServiceStatusError { .. }
            | DesignError::SchemaError { .. }
            | DesignError::MissingImageError { .. } => {
                "An error occurred while generating the design. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DesignError>;
