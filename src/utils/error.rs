use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Server selection timed out: {message}")]
    ServerUnreachable { message: String },

    #[error("Database operation failed: {0}")]
    Database(mongodb::error::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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
    Connection,
    Query,
    Configuration,
    Io,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl From<mongodb::error::Error> for ProbeError {
    fn from(error: mongodb::error::Error) -> Self {
        if let mongodb::error::ErrorKind::ServerSelection { message, .. } = error.kind.as_ref() {
            return ProbeError::ServerUnreachable {
                message: message.clone(),
            };
        }
        ProbeError::Database(error)
    }
}

impl ProbeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProbeError::ServerUnreachable { .. } => ErrorCategory::Connection,
            ProbeError::Database(e) => match *e.kind {
                mongodb::error::ErrorKind::Authentication { .. }
                | mongodb::error::ErrorKind::DnsResolve { .. }
                | mongodb::error::ErrorKind::Io(_)
                | mongodb::error::ErrorKind::ConnectionPoolCleared { .. } => {
                    ErrorCategory::Connection
                }
                mongodb::error::ErrorKind::InvalidTlsConfig { .. }
                | mongodb::error::ErrorKind::InvalidArgument { .. } => {
                    ErrorCategory::Configuration
                }
                _ => ErrorCategory::Query,
            },
            ProbeError::IoError(_) => ErrorCategory::Io,
            ProbeError::SerializationError(_) => ErrorCategory::Serialization,
            ProbeError::ConfigValidationError { .. }
            | ProbeError::InvalidConfigValueError { .. }
            | ProbeError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Connection => ErrorSeverity::Medium,
            ErrorCategory::Query | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Serialization => ErrorSeverity::Critical,
        }
    }

    /// Exit code for the CLI process.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ProbeError::ServerUnreachable { .. } => {
                "Please check your internet connection and the MongoDB URI."
            }
            ProbeError::Database(_) => match self.category() {
                ErrorCategory::Connection => {
                    "Verify the credentials in the connection string and that this host is allowed to reach the cluster."
                }
                ErrorCategory::Configuration => {
                    "Check the connection string options and the CA bundle passed with --tls-ca-file."
                }
                _ => "Check that the database and collection names are correct.",
            },
            ProbeError::IoError(_) => "Check file paths and permissions.",
            ProbeError::SerializationError(_) => {
                "The document could not be rendered; try --output compact or inspect it with another client."
            }
            ProbeError::MissingConfigError { .. } => {
                "Pass --uri, set MONGODB_URI, or add [connection].uri to the config file."
            }
            ProbeError::ConfigValidationError { .. } | ProbeError::InvalidConfigValueError { .. } => {
                "Review the configuration values and try again."
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ProbeError::ServerUnreachable { message } => {
                format!("Unable to connect to the MongoDB server. Error: {}", message)
            }
            ProbeError::Database(e) => format!("MongoDB reported an error: {}", e),
            ProbeError::IoError(e) => format!("File system error: {}", e),
            ProbeError::SerializationError(e) => format!("Could not render the document: {}", e),
            ProbeError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            ProbeError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            ProbeError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
