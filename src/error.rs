use thiserror::Error;

/// Call-level failure of an optimization request. Raised before any
/// partitioning or tour work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl OptimizeError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Stable machine-readable category, used in error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            OptimizeError::InvalidInput(_) => "invalid_input",
        }
    }
}

/// The path renderer could not produce geometry for one segment.
///
/// The optimizer treats this as recoverable: the segment is dropped and the
/// route is still returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteUnavailable {
    #[error("network error: {0}")]
    Network(String),
    #[error("routing service returned status {0}")]
    Status(u16),
    #[error("malformed routing response: {0}")]
    Malformed(String),
    #[error("no route found: {0}")]
    NoRoute(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(name: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            name,
            value: value.into(),
            reason: reason.into(),
        }
    }
}
