//! Error types for lodscape

use thiserror::Error;

/// Main error type for the crate
///
/// Only construction-time problems surface here. Runtime conditions such as a
/// zero divisor in a noise combine or an observer jump larger than the
/// streaming window are resolved locally and never reach the caller.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid noise node at {path}: {reason}")]
    InvalidNoise { path: String, reason: String },

    #[error("invalid streaming parameters: {0}")]
    InvalidStreaming(String),

    #[error("invalid tile layout parameters: {0}")]
    InvalidLayout(String),

    #[error("invalid sampling parameters: {0}")]
    InvalidSampling(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn noise(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidNoise {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_error_message() {
        let err = Error::noise("root.children[1]", "octaves must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid noise node at root.children[1]: octaves must be at least 1"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
