use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Earth Engine request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Boundary dataset unavailable: {message}")]
    DatasetUnavailable { message: String },

    #[error("Invalid region '{name}': {reason}")]
    InvalidRegion { name: String, reason: String },

    #[error("Image archive query failed: {message}")]
    ArchiveQueryFailed { message: String },

    #[error("Map render failed: {message}")]
    RenderFailed { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration parsing failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

/// 錯誤嚴重程度，決定 CLI 的退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Dataset,
    Archive,
    Render,
    Config,
    System,
}

impl DashError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashError::ApiError(_) => ErrorCategory::Network,
            DashError::DatasetUnavailable { .. } | DashError::InvalidRegion { .. } => {
                ErrorCategory::Dataset
            }
            DashError::ArchiveQueryFailed { .. } => ErrorCategory::Archive,
            DashError::RenderFailed { .. } | DashError::SerializationError(_) => {
                ErrorCategory::Render
            }
            DashError::ConfigError { .. }
            | DashError::InvalidConfigValueError { .. }
            | DashError::MissingConfigError { .. }
            | DashError::ConfigValidationError { .. } => ErrorCategory::Config,
            DashError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 遠端服務問題通常是暫時性的
            DashError::ApiError(_)
            | DashError::DatasetUnavailable { .. }
            | DashError::ArchiveQueryFailed { .. } => ErrorSeverity::Medium,
            DashError::InvalidRegion { .. } => ErrorSeverity::Low,
            DashError::RenderFailed { .. }
            | DashError::SerializationError(_)
            | DashError::IoError(_) => ErrorSeverity::High,
            DashError::ConfigError { .. }
            | DashError::InvalidConfigValueError { .. }
            | DashError::MissingConfigError { .. }
            | DashError::ConfigValidationError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DashError::ApiError(e) => format!("Could not reach the Earth Engine service: {}", e),
            DashError::DatasetUnavailable { message } => format!(
                "The administrative boundary dataset is unavailable: {}",
                message
            ),
            DashError::InvalidRegion { name, reason } => {
                format!("'{}' is not a usable region ({})", name, reason)
            }
            DashError::ArchiveQueryFailed { message } => {
                format!("Querying the Landsat archives failed: {}", message)
            }
            DashError::RenderFailed { message } => {
                format!("The map document could not be rendered: {}", message)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check network connectivity and the --endpoint URL, then retry"
            }
            ErrorCategory::Dataset => "Verify the province name (try `list_provinces`) and retry",
            ErrorCategory::Archive => "Retry later, or relax the year/cloud-cover filters",
            ErrorCategory::Render => "Check the map dimensions and output directory permissions",
            ErrorCategory::Config => "Fix the configuration value and run again",
            ErrorCategory::System => "Check disk space and file permissions for the output path",
        }
    }
}

pub type Result<T> = std::result::Result<T, DashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        let err = DashError::ArchiveQueryFailed {
            message: "503".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.category(), ErrorCategory::Archive);

        let err = DashError::MissingConfigError {
            field: "endpoint".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.category(), ErrorCategory::Config);
    }

    #[test]
    fn test_user_friendly_message_carries_detail() {
        let err = DashError::InvalidRegion {
            name: "".to_string(),
            reason: "province name is empty".to_string(),
        };
        assert!(err
            .user_friendly_message()
            .contains("province name is empty"));
    }
}
