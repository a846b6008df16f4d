use frag_store::StoreError;
use thiserror::Error;

/// Result type for fragment operations
pub type FragmentResult<T> = Result<T, FragmentError>;

/// Errors that can occur while constructing, persisting, or converting
/// fragments.
///
/// "Not convertible" is deliberately absent: it is a routine outcome, not a
/// failure, and is modeled as
/// [`ConvertOutcome::Unsupported`](crate::ConvertOutcome::Unsupported).
#[derive(Error, Debug)]
pub enum FragmentError {
    /// Malformed construction input, detected before any persistence attempt.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The declared content type is outside the supported set.
    #[error("Unsupported media type: {mime}")]
    UnsupportedType { mime: String },

    /// A base type that callers should have validated earlier was handed to
    /// the registry. Programming-error-class, never user-facing.
    #[error("Media type is not in the registry: {mime}")]
    UnknownType { mime: String },

    #[error("Fragment not found: {id}")]
    NotFound { id: String },

    /// Storage backend failure, tagged with the operation that hit it. The
    /// core never retries these; retry policy belongs to the backend.
    #[error("Storage failure during {op}: {source}")]
    Persistence {
        op: &'static str,
        #[source]
        source: StoreError,
    },

    /// A conversion library failed while transforming bytes (e.g. corrupt
    /// image data). Distinct from "not convertible".
    #[error("Conversion failed: {source}")]
    Conversion {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl FragmentError {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an unsupported type error
    pub fn unsupported_type<S: Into<String>>(mime: S) -> Self {
        Self::UnsupportedType { mime: mime.into() }
    }

    /// Create an unknown type error
    pub fn unknown_type<S: Into<String>>(mime: S) -> Self {
        Self::UnknownType { mime: mime.into() }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(id: S) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Wrap a storage failure with the operation that produced it
    pub fn persistence(op: &'static str, source: StoreError) -> Self {
        Self::Persistence { op, source }
    }

    /// Create a conversion error from any library error type
    pub fn conversion<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Conversion {
            source: Box::new(source),
        }
    }
}
