use crate::schema::JsonType;

/// Core error type for tool validation and dispatch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing required field: {0}")]
    MissingRequiredField(String),

    #[error("invalid schema definition for property: {0}")]
    InvalidSchemaDefinition(String),

    #[error("invalid type for {field}: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: JsonType,
    },

    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("{source}")]
    HandlerFailure {
        tool: String,
        #[source]
        source: HandlerError,
    },
}

/// Stable discriminant for [`Error`], used by transports to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The caller sent arguments that do not satisfy the tool's schema.
    InvalidInput,
    /// The requested tool is not registered.
    NotFound,
    /// The tool's own schema is broken. Retrying will not help.
    Configuration,
    /// The handler failed after validation passed.
    Handler,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::Configuration => "configuration",
            Self::Handler => "handler",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingRequiredField(_) | Self::TypeMismatch { .. } => ErrorKind::InvalidInput,
            Self::InvalidSchemaDefinition(_) => ErrorKind::Configuration,
            Self::ToolNotFound(_) => ErrorKind::NotFound,
            Self::HandlerFailure { .. } => ErrorKind::Handler,
        }
    }

    /// The offending field, for validation failures.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField(field)
            | Self::InvalidSchemaDefinition(field)
            | Self::TypeMismatch { field, .. } => Some(field),
            Self::ToolNotFound(_) | Self::HandlerFailure { .. } => None,
        }
    }
}

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure reported by a tool handler. The message is handler-defined.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The handler observed a cancelled call context.
    #[must_use]
    pub fn cancelled() -> Self {
        Self::new("request cancelled")
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
