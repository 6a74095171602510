//! # Error Types

/// Errors from matchweave construction and validation.
///
/// Ordinary match failure is *not* an error; matchers signal it by
/// returning `None`. This enum covers construction-time misuse only.
#[derive(Debug, thiserror::Error)]
pub enum MatchweaveError {
    /// A code-point range was built with `lo > hi`.
    #[error("malformed code point range: lo (U+{lo:04X}) > hi (U+{hi:04X})")]
    MalformedRange {
        /// The range start.
        lo: u32,
        /// The range end.
        hi: u32,
    },

    /// A range pattern string was not exactly `"<lo>-<hi>"`.
    #[error("malformed range pattern: {0:?}")]
    MalformedRangePattern(String),

    /// Repeat bounds with `min > max`.
    #[error("malformed repeat bounds: min ({min}) > max ({max})")]
    MalformedBounds {
        /// The lower repetition bound.
        min: usize,
        /// The upper repetition bound.
        max: usize,
    },

    /// A Unicode general category name outside the 30-name catalogue.
    #[error("unknown unicode general category: {0:?}")]
    UnknownCategory(String),

    /// A matcher composition the engine rejects.
    #[error("illegal composition: {0}")]
    IllegalComposition(&'static str),

    /// An empty key offered to the prefix index.
    #[error("prefix index keys must be non-empty")]
    EmptyIndexKey,
}

/// Result type for matchweave operations.
pub type MWResult<T> = core::result::Result<T, MatchweaveError>;
