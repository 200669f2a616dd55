use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmpError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid build record #{record} in {}: {reason}", .path.display())]
    Schema {
        path: PathBuf,
        record: usize,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value:?}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CmpError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CmpError::Io { .. } => ErrorCategory::Input,
            CmpError::Parse { .. } | CmpError::Schema { .. } => ErrorCategory::Data,
            CmpError::ConfigError { .. } | CmpError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            CmpError::Output(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Input | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 依嚴重程度決定行程結束碼，設定錯誤與 clap 的用法錯誤一致回傳 2
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CmpError::Io { path, source } => {
                format!("Cannot open log file '{}': {}", path.display(), source)
            }
            CmpError::Parse { path, source } => {
                format!("Log file '{}' is not valid JSON: {}", path.display(), source)
            }
            CmpError::Schema {
                path,
                record,
                reason,
            } => format!(
                "Record #{} in '{}' is not a usable build record: {}",
                record,
                path.display(),
                reason
            ),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CmpError::Io { .. } => "Check that the path exists and is readable",
            CmpError::Parse { .. } => {
                "Make sure the file is a complete execution log (it may have been truncated)"
            }
            CmpError::Schema { .. } => {
                "Check --identity-field; every record must carry that field as a string"
            }
            CmpError::ConfigError { .. } | CmpError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the [compare] table of the config file"
            }
            CmpError::Output(_) => "Check that standard output is still open",
        }
    }
}

pub type Result<T> = std::result::Result<T, CmpError>;
