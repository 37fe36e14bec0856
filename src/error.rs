//! Errors shared by the codec core and its handlers.

use alloc::string::String;

use thiserror::Error;

use crate::sans::field::FieldError;

/// An error decoding, encoding or editing a tagged record extension.
#[derive(Debug, Error)]
pub enum Error {
    /// An absent or unusable argument, such as an unknown tag.
    #[error("Invalid argument for `{tag}`: {reason}.")]
    InvalidArgument { tag: String, reason: &'static str },
    /// No description could be resolved for a record.
    #[error("No description resolvable for `{tag}`.")]
    SchemaNotFound { tag: String },
    /// A loop count or condition refers to a subfield that has no usable value.
    #[error("Unable to resolve `{operand}` while walking `{tag}`.")]
    SchemaResolution { tag: String, operand: &'static str },
    /// Parsed or serialized bytes under- or over-ran the declared length.
    #[error("Length mismatch in `{tag}`: declared {declared} bytes, consumed {consumed}.")]
    LengthMismatch {
        tag: String,
        declared: usize,
        consumed: usize,
    },
    /// A subfield yielded by the description has no stored value.
    #[error("Missing field `{field}` in `{tag}`.")]
    MissingField { tag: String, field: String },
    /// A subfield value was rejected.
    #[error("Invalid value for `{tag}`: {source}")]
    Field {
        tag: String,
        #[source]
        source: FieldError,
    },
    /// A buffer could not be allocated.
    #[error("Unable to allocate {0} bytes.")]
    AllocationFailure(usize),
    /// Unexpectedly reached the end of the byte source.
    #[error("Unexpectedly reached the end of the input.")]
    EndOfInput,
    /// An error from the supplied reader or writer.
    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    SchemaNotFound,
    SchemaResolution,
    LengthMismatch,
    MissingField,
    AllocationFailure,
    Io,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::SchemaNotFound { .. } => ErrorKind::SchemaNotFound,
            Self::SchemaResolution { .. } => ErrorKind::SchemaResolution,
            Self::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::Field {
                source: FieldError::Allocation(_),
                ..
            } => ErrorKind::AllocationFailure,
            Self::Field { .. } => ErrorKind::InvalidArgument,
            Self::AllocationFailure(_) => ErrorKind::AllocationFailure,
            Self::EndOfInput => ErrorKind::Io,
            #[cfg(feature = "std")]
            Self::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn field(tag: &str, source: FieldError) -> Self {
        Self::Field {
            tag: tag.into(),
            source,
        }
    }
}
