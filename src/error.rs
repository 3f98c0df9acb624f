use thiserror::Error;

/// A convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The errors surfaced by the driver core.
///
/// Validation problems are reported before any work reaches the execution
/// engine. Everything the engine reports back -- network, server-side, or
/// encoding failures -- comes through [Error::OperationFailure] unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was missing or malformed. Raised before any
    /// operation is submitted, never retried by the driver.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The execution engine reported a failure while carrying out an
    /// operation. The driver passes these through without interpreting,
    /// retrying, or suppressing them.
    #[error("operation failed: {message}")]
    OperationFailure {
        /// A description of what went wrong.
        message: String,

        /// The underlying failure, when one was captured.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Creates an [Error::InvalidArgument] from a message.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Creates an [Error::OperationFailure] from a message, with no
    /// underlying source error.
    pub fn operation_failure(message: impl Into<String>) -> Self {
        Error::OperationFailure {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error was raised by argument validation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

impl From<bson::ser::Error> for Error {
    fn from(err: bson::ser::Error) -> Self {
        Error::OperationFailure {
            message: "failed to encode value as a BSON document".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<bson::de::Error> for Error {
    fn from(err: bson::de::Error) -> Self {
        Error::OperationFailure {
            message: "failed to decode a BSON document".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn invalid_argument_display() {
        let err = Error::invalid_argument("name must not be empty");
        assert_eq!(
            err.to_string(),
            "invalid argument: name must not be empty",
            "Expected the message to carry through",
        );
        assert!(err.is_invalid_argument(), "Expected a validation error");
    }

    #[test]
    fn operation_failure_display() {
        let err = Error::operation_failure("socket closed");
        assert_eq!(err.to_string(), "operation failed: socket closed");
        assert!(!err.is_invalid_argument(), "Expected an engine error");
    }
}
