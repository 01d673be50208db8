use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request itself is unusable; never reaches the model.
    #[error("{0}")]
    Validation(String),

    #[error("Gemini API key not configured")]
    MissingCredentials,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl GenerationError {
    pub fn validation(message: impl Into<String>) -> Self {
        GenerationError::Validation(message.into())
    }
}

pub type GenerationOutcome<T> = std::result::Result<T, GenerationError>;
