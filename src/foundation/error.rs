/// Convenience result type used across folio.
pub type FolioResult<T> = Result<T, FolioError>;

/// Top-level error taxonomy used by engine and relay APIs.
#[derive(thiserror::Error, Debug)]
pub enum FolioError {
    /// Malformed animation, timeline or overlay declaration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The relay could not reach the downstream webhook or got a non-success reply.
    #[error("transport error: {0}")]
    Transport(String),

    /// An optional enhancement could not start in the current host.
    #[error("environment unavailable: {0}")]
    EnvironmentUnavailable(String),

    /// Invalid user-provided input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FolioError {
    /// Build a [`FolioError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`FolioError::Transport`] value.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Build a [`FolioError::EnvironmentUnavailable`] value.
    pub fn environment_unavailable(msg: impl Into<String>) -> Self {
        Self::EnvironmentUnavailable(msg.into())
    }

    /// Build a [`FolioError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FolioError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
