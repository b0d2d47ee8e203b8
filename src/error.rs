/// Everything a tool call can fail with. The dispatcher turns each of these
/// into a failure envelope; none of them escape to the transport.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Missing required argument: {field}")]
    MissingArgument { field: String },
    #[error("Invalid argument '{field}': {reason}")]
    InvalidArgument { field: String, reason: String },
    #[error("{0}")]
    OutOfBounds(String),
    #[error("{0}")]
    InvalidPath(String),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Tool handler panicked: {0}")]
    Panicked(String),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ToolError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Failure surfaced by a capability provider (input injection, clipboard,
/// capture, window scripting).
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("input injection failed: {0}")]
    Injection(String),
    #[error("{program} failed: {message}")]
    Command { program: String, message: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported key: {0}")]
    UnsupportedKey(String),
}
