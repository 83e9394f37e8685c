use thiserror::Error;
use uuid::Uuid;

/// Result type for ingestq operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ingestq operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected submission: empty work-item list or unrecognized priority
    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    /// Unknown ingestion identifier passed to a status lookup
    #[error("Unknown ingestion: {0}")]
    NotFound(Uuid),

    /// The job queue has no entries left.
    ///
    /// Internal signal consumed by the batch processor as its loop-termination
    /// condition; never surfaced to API callers.
    #[error("Job queue is empty")]
    EmptyQueue,

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an invalid submission error
    pub fn invalid_submission(msg: impl Into<String>) -> Self {
        Self::InvalidSubmission(msg.into())
    }

    /// Adds context to any error
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::with_context(context, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_wraps_the_source_error() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            "address in use",
        ));

        let err = io.context("Failed to bind to 127.0.0.1:3000").unwrap_err();
        assert!(matches!(err, Error::WithContext { .. }));

        let msg = err.to_string();
        assert!(msg.contains("Failed to bind to 127.0.0.1:3000"));
        assert!(msg.contains("address in use"));
    }
}
