/// Convenience result type used across promptcast.
pub type PromptcastResult<T> = Result<T, PromptcastError>;

/// Top-level error taxonomy used by engine and collaborator APIs.
///
/// Only the legacy character resolver raises [`PromptcastError::EntityNotFound`]; every other
/// missing reference inside prompt composition is skipped silently.
#[derive(thiserror::Error, Debug)]
pub enum PromptcastError {
    /// Invalid user-provided or library data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced entity is absent from the snapshot.
    #[error("entity not found: {kind} '{id}'")]
    EntityNotFound {
        /// Entity kind label (e.g. `"character"`).
        kind: &'static str,
        /// Identifier that failed to resolve.
        id: String,
    },

    /// Errors raised by a persistence collaborator.
    #[error("repository error: {0}")]
    Repository(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PromptcastError {
    /// Build a [`PromptcastError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PromptcastError::EntityNotFound`] value.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::EntityNotFound {
            kind,
            id: id.into(),
        }
    }

    /// Build a [`PromptcastError::Repository`] value.
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Build a [`PromptcastError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PromptcastError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
