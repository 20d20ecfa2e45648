use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Fact data unavailable from {source_name}: {message}")]
    DataUnavailable {
        source_name: String,
        message: String,
    },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    DataSource,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl InsightError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn data_unavailable(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataUnavailable {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } | Self::ValidationError { .. } => ErrorCategory::Input,
            Self::DataUnavailable { .. } | Self::CsvError(_) => ErrorCategory::DataSource,
            Self::ZipError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::Output
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            // 資料來源暫時無法取得，重試可能成功
            ErrorCategory::DataSource => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "Check that every domain has at least one publication year",
            Self::DataUnavailable { .. } => {
                "Make sure the data directory contains publication.csv, faculty.csv, research_domain.csv and faculty_publication.csv"
            }
            Self::CsvError(_) => "Check the CSV headers and that numeric columns hold integers",
            Self::ZipError(_) | Self::IoError(_) => {
                "Check that the output path exists and is writable"
            }
            Self::SerializationError(_) => "Report this as a bug; result records failed to serialize",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Fix the configuration value and run again",
            Self::ValidationError { .. } => "Check the input values against the documented ranges",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DataUnavailable { source_name, .. } => {
                format!("Could not load publication data from {}", source_name)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            Self::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InsightError>;
