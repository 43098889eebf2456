use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned {status} for page {page}")]
    UnexpectedStatus { page: usize, status: u16 },

    #[error("Upload to s3://{bucket}/{key} failed: {message}")]
    UploadError {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Fetch,
    Upload,
    Config,
    Io,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) | EtlError::UnexpectedStatus { .. } => ErrorCategory::Fetch,
            EtlError::UploadError { .. } | EtlError::SerializationError(_) => {
                ErrorCategory::Upload
            }
            EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ApiError(e) if e.is_timeout() => {
                "The API did not answer in time; raise request_timeout_secs or try again later"
            }
            EtlError::ApiError(_) => "Check network connectivity and the API endpoint",
            EtlError::UnexpectedStatus { status: 401 | 403, .. } => {
                "Check that USDA_API_KEY holds a valid key"
            }
            EtlError::UnexpectedStatus { status: 429, .. } => {
                "The API rate limit was hit; lower max_pages or wait before the next run"
            }
            EtlError::UnexpectedStatus { .. } => "Check the search parameters and the API status",
            EtlError::UploadError { .. } => {
                "Check AWS credentials, the bucket name and the region"
            }
            EtlError::IoError(_) => "Check file paths and permissions",
            EtlError::SerializationError(_) => "The data could not be encoded as JSON",
            EtlError::MissingConfigError { .. } => {
                "Set the missing value in the environment, the .env file or the config file"
            }
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
