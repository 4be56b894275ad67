//! Error types for conf-core

/// Boxed error carried as the cause of a wrapped failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for conf-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving configuration values.
///
/// Absence is never an error: a name no store answers resolves to `None`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A resolved value or fallback cannot satisfy the requested shape
    #[error("Type mismatch: {message}")]
    TypeMismatch {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// A store could not be built from its external payload
    #[error("Store error: {message}")]
    Store {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl Error {
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::TypeMismatch {
            message: message.into(),
            source: None,
        }
    }

    pub fn type_mismatch_caused_by(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::TypeMismatch {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn store(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Store {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Whether this error is a [`Error::TypeMismatch`]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// Whether this error is a [`Error::Store`]
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn type_mismatch_keeps_cause() {
        let cause = std::io::Error::other("bad constructor input");
        let err = Error::type_mismatch_caused_by("failed to create Port", cause);

        assert!(err.is_type_mismatch());
        assert_eq!(err.to_string(), "Type mismatch: failed to create Port");
        let source = err.source().expect("cause should be attached");
        assert_eq!(source.to_string(), "bad constructor input");
    }

    #[test]
    fn store_error_displays_message() {
        let err = Error::store("cannot decode attribute app", std::io::Error::other("x"));
        assert!(err.is_store());
        assert!(err.to_string().contains("cannot decode attribute app"));
    }
}
