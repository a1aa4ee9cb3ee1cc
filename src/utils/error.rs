use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{operation} failed in native module: {message}")]
    ModuleFault { operation: String, message: String },

    #[error("Promise rejected: {message}")]
    PromiseRejected { message: String },

    #[error("Promise was dropped before it settled")]
    PromiseDropped,

    #[error("No async runtime available to run {operation}")]
    RuntimeUnavailable { operation: String },

    #[error("Timed out after {millis}ms waiting for pending calls")]
    Timeout { millis: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Module,
    Io,
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl BridgeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BridgeError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            BridgeError::InvalidConfigValueError { .. } | BridgeError::SerializationError(_) => {
                ErrorCategory::Validation
            }
            BridgeError::ModuleFault { .. }
            | BridgeError::PromiseRejected { .. }
            | BridgeError::PromiseDropped
            | BridgeError::RuntimeUnavailable { .. } => ErrorCategory::Module,
            BridgeError::IoError(_) => ErrorCategory::Io,
            BridgeError::Timeout { .. } => ErrorCategory::Timeout,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Validation | ErrorCategory::Io => {
                ErrorSeverity::High
            }
            ErrorCategory::Module => ErrorSeverity::Medium,
            ErrorCategory::Timeout => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI: 1 for bad input, 2 for module failures, 3 for timeouts.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BridgeError::IoError(_) => "Check that the config file exists and is readable",
            BridgeError::SerializationError(_) => {
                "User JSON needs id, name and an address with street, city and zipcode"
            }
            BridgeError::ConfigValidationError { .. } => "Fix the TOML syntax in the config file",
            BridgeError::InvalidConfigValueError { .. } => {
                "Correct the highlighted value and run again"
            }
            BridgeError::ModuleFault { .. } | BridgeError::PromiseRejected { .. } => {
                "Inspect the module logs with --verbose"
            }
            BridgeError::PromiseDropped => "The module abandoned the call; retry the activation",
            BridgeError::RuntimeUnavailable { .. } => {
                "Call async operations from inside a tokio runtime"
            }
            BridgeError::Timeout { .. } => {
                "Raise shell.settle_timeout_ms or lower module.async_delay_ms"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Validation => format!("Invalid input: {}", self),
            ErrorCategory::Module => format!("The native module failed: {}", self),
            ErrorCategory::Io => format!("Could not read input: {}", self),
            ErrorCategory::Timeout => format!("Gave up waiting: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
