//! Field codec error types.

use thiserror::Error;

/// Field codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A field contains a character the wire format uses as structure
    #[error("Field `{field}` contains reserved character {ch:?}")]
    ReservedCharacter { field: &'static str, ch: char },

    /// Creation year cannot be written as a four-digit RFC 3339 year
    #[error("Creation timestamp year {0} outside 0000..=9999")]
    TimestampOutOfRange(i32),

    /// Stride value outside 2..=9, from [`Stride::new`](super::Stride::new)
    #[error("Stride out of range: {0}")]
    StrideOutOfRange(u8),

    /// Encoded string is empty, so there is no trailing stride key
    #[error("Missing stride key")]
    MissingStride,

    /// Trailing character is not a stride digit
    #[error("Invalid stride key: {0:?}")]
    InvalidStride(char),

    /// Fewer than six identity fields survived recovery
    #[error("Too few identity fields: expected 6, found {found}")]
    TooFewFields { found: usize },

    /// Admin flag text is neither "true" nor "false"
    #[error("Invalid admin flag: {0:?}")]
    InvalidFlag(String),

    /// Creation timestamp is not RFC 3339
    #[error("Invalid creation timestamp: {0:?}")]
    InvalidTimestamp(String),
}

impl CodecError {
    /// Whether this error was raised while encoding a record.
    ///
    /// Encode failures on a record that was already accepted upstream mean an
    /// internal invariant was broken; decode failures mean the input was bad.
    /// `StrideOutOfRange` is a constructor error and counts as neither.
    pub fn is_encode_failure(&self) -> bool {
        matches!(
            self,
            CodecError::ReservedCharacter { .. } | CodecError::TimestampOutOfRange(_)
        )
    }
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
