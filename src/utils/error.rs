use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Input '{source_name}' is missing required columns: {}", columns.join(", "))]
    MissingColumns {
        source_name: String,
        columns: Vec<String>,
    },

    #[error("Invalid category store '{path}': {message}")]
    InvalidCategoryStore { path: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Input,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl AuditError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AuditError::ApiError(_) => ErrorCategory::Network,
            AuditError::CsvError(_) | AuditError::MissingColumns { .. } => ErrorCategory::Input,
            AuditError::IoError(_) => ErrorCategory::System,
            AuditError::ProcessingError { .. } => ErrorCategory::Data,
            AuditError::YamlError(_)
            | AuditError::ConfigError { .. }
            | AuditError::ConfigValidationError { .. }
            | AuditError::InvalidConfigValueError { .. }
            | AuditError::MissingConfigError { .. }
            | AuditError::InvalidCategoryStore { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常可以重試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration | ErrorCategory::Data => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AuditError::ApiError(_) => {
                "Could not reach the mail provider API.".to_string()
            }
            AuditError::MissingColumns {
                source_name,
                columns,
            } => format!(
                "{} is missing required columns: {}",
                source_name,
                columns.join(", ")
            ),
            AuditError::InvalidCategoryStore { path, .. } => {
                format!("The category file {} could not be used.", path)
            }
            AuditError::MissingConfigError { field } => {
                format!("Required setting '{}' was not provided.", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AuditError::ApiError(_) => {
                "Check network access and that the access token is still valid"
            }
            AuditError::CsvError(_) | AuditError::MissingColumns { .. } => {
                "Regenerate the sites CSV with the aggregate command"
            }
            AuditError::IoError(_) => "Check that the output directory exists and is writable",
            AuditError::YamlError(_) | AuditError::InvalidCategoryStore { .. } => {
                "Fix categories.yml so it is a flat 'domain: category' mapping"
            }
            AuditError::MissingConfigError { .. } => {
                "Pass the value on the command line or set it in the config file"
            }
            AuditError::ConfigError { .. }
            | AuditError::ConfigValidationError { .. }
            | AuditError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line arguments"
            }
            AuditError::ProcessingError { .. } => "Re-run with --verbose and inspect the logs",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_names() {
        let err = AuditError::MissingColumns {
            source_name: "sites_from_gmail.csv".to_string(),
            columns: vec!["count".to_string(), "sample_from".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Input 'sites_from_gmail.csv' is missing required columns: count, sample_from"
        );
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_io_error_is_critical() {
        let err = AuditError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_category_store_error_is_configuration() {
        let err = AuditError::InvalidCategoryStore {
            path: "categories.yml".to_string(),
            message: "expected a mapping".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.user_friendly_message().contains("categories.yml"));
    }
}
