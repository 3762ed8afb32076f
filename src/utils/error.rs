use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("Contract index {index} is out of range (collection holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Contract not found: {id}")]
    ContractNotFound { id: String },

    #[error("Intake failed: {message}")]
    IntakeFailed { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Store,
    Intake,
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

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IndexOutOfRange { .. } | Self::ContractNotFound { .. } => ErrorCategory::Store,
            Self::IntakeFailed { .. } => ErrorCategory::Intake,
            Self::ConfigParseError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // A failed upload leaves the existing contracts intact.
            Self::IntakeFailed { .. } => ErrorSeverity::Medium,
            Self::ConfigParseError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            // Caller bugs: the index or id never came from the current collection.
            Self::IndexOutOfRange { .. } | Self::ContractNotFound { .. } => {
                ErrorSeverity::Critical
            }
            Self::IoError(_) => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IntakeFailed { message } => message.clone(),
            Self::IoError(e) => format!("Could not read file: {}", e),
            Self::ConfigParseError { message } => {
                format!("The portfolio file is not valid: {}", message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } | Self::ContractNotFound { .. } => {
                "Refresh the contract list and retry the edit"
            }
            Self::IntakeFailed { .. } => {
                "Ensure the file is readable, or add the contract manually"
            }
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::ConfigParseError { .. } => "Check the portfolio file for TOML syntax errors",
            Self::InvalidConfigValueError { .. } => "Correct the highlighted value and run again",
        }
    }
}

pub type Result<T> = std::result::Result<T, ContractError>;
