use thiserror::Error;

/// Result type for link store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("short url not found: {0}")]
    NotFound(String),
    #[error("backing file is corrupt: {0}")]
    Corrupt(String),
    #[error("storage io failed: {0}")]
    Io(String),
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Whether the error was caused by the caller rather than the backend.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::NotFound(_))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors() {
        assert!(StoreError::InvalidInput("x".into()).is_client_error());
        assert!(StoreError::NotFound("abc123".into()).is_client_error());
        assert!(!StoreError::Io("disk full".into()).is_client_error());
        assert!(!StoreError::Corrupt("eof".into()).is_client_error());
    }

    #[test]
    fn io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(StoreError::from(io), StoreError::Io(_)));
    }
}
