use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("API request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Request to {path} failed with status {status}")]
    RequestFailed { status: u16, path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to delete instructor {id}: {reason}")]
    DeleteFailed { id: i64, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl TrackerError {
    /// Network and non-2xx failures are treated alike by every caller.
    pub fn is_operation_failure(&self) -> bool {
        matches!(
            self,
            TrackerError::NetworkError(_)
                | TrackerError::RequestFailed { .. }
                | TrackerError::SerializationError(_)
        )
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            TrackerError::ConfigError { .. }
                | TrackerError::ConfigValidationError { .. }
                | TrackerError::InvalidConfigValueError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TrackerError::NetworkError(_) | TrackerError::RequestFailed { .. } => {
                "Could not reach the course tracker backend".to_string()
            }
            TrackerError::SerializationError(_) => {
                "The backend returned data in an unexpected format".to_string()
            }
            TrackerError::DeleteFailed { .. } => "Failed to delete instructor".to_string(),
            TrackerError::IoError(e) => format!("File access failed: {}", e),
            TrackerError::ConfigError { message } => format!("Configuration problem: {}", message),
            TrackerError::ConfigValidationError { field, message } => {
                format!("Invalid configuration for {}: {}", field, message)
            }
            TrackerError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TrackerError::NetworkError(_) | TrackerError::RequestFailed { .. } => {
                "Check that the backend is running and that --api-base-url points at it"
            }
            TrackerError::SerializationError(_) => {
                "Make sure the base URL points at the course tracker API root"
            }
            TrackerError::DeleteFailed { .. } => {
                "Retry the delete, or refresh the list to see the current state"
            }
            TrackerError::IoError(_) => "Check the file path and its permissions",
            _ => "Review the configuration file and command line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
