use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Marketplace returned {status}: {body}")]
    RemoteError { status: u16, body: String },

    #[error("Marketplace request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Unexpected marketplace response: {message}")]
    DecodeError { message: String },

    #[error("Failed to deliver reply: {message}")]
    DeliveryError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Marketplace,
    Delivery,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScoutError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScoutError::RemoteError { .. }
            | ScoutError::TransportError(_)
            | ScoutError::DecodeError { .. } => ErrorCategory::Marketplace,
            ScoutError::DeliveryError { .. } => ErrorCategory::Delivery,
            ScoutError::ConfigError { .. }
            | ScoutError::ConfigValidationError { .. }
            | ScoutError::InvalidConfigValueError { .. }
            | ScoutError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ScoutError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Marketplace => ErrorSeverity::Medium,
            ErrorCategory::Delivery => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Fetch failures end a single command invocation, nothing more.
    pub fn is_fetch_failure(&self) -> bool {
        self.category() == ErrorCategory::Marketplace
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScoutError::RemoteError { status, .. } => {
                format!("The marketplace rejected the request (HTTP {})", status)
            }
            ScoutError::TransportError(e) if e.is_timeout() => {
                "The marketplace did not answer in time".to_string()
            }
            ScoutError::TransportError(_) => "Could not reach the marketplace".to_string(),
            ScoutError::DecodeError { .. } => {
                "The marketplace answered with something that is not a listing list".to_string()
            }
            ScoutError::DeliveryError { message } => {
                format!("Could not send the reply: {}", message)
            }
            ScoutError::MissingConfigError { field } => {
                format!("Configuration is missing '{}'", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScoutError::RemoteError { status: 401 | 403, .. } => {
                "Check that marketplace.api_key holds a valid CSFloat API key"
            }
            ScoutError::RemoteError { status: 429, .. } => {
                "The marketplace is rate limiting, wait a moment before retrying"
            }
            ScoutError::RemoteError { .. } => "Retry later, the marketplace may be unavailable",
            ScoutError::TransportError(_) => "Check network connectivity and marketplace.endpoint",
            ScoutError::DecodeError { .. } => "Verify marketplace.endpoint points at the listings API",
            ScoutError::DeliveryError { .. } => "Check the Discord token or webhook URL",
            ScoutError::ConfigError { .. }
            | ScoutError::ConfigValidationError { .. }
            | ScoutError::InvalidConfigValueError { .. }
            | ScoutError::MissingConfigError { .. } => "Fix the configuration file and restart",
            ScoutError::IoError(_) => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
