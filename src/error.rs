/// The reason a single code point failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ErrorKind {
    /// The input ended early, or a continuation byte/trail surrogate was expected and missing.
    #[error("incomplete sequence")]
    IncompleteSequence,
    /// The first byte/unit cannot start any sequence.
    #[error("invalid lead")]
    InvalidLead,
    /// The decoded value is a surrogate or above U+10FFFF.
    #[error("invalid code point")]
    InvalidCodePoint,
    /// The value was encoded with more bytes than it needs.
    #[error("overlong sequence")]
    OverlongSequence,
}

/// A decoding failure inside a sequence, with the offset of the offending
/// byte (UTF-8) or unit (UTF-16) counted from the start of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{kind} at offset {offset}")]
pub struct DecodingError {
    pub kind: ErrorKind,
    pub offset: usize,
}

impl DecodingError {
    pub const fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum EncodingError {
    #[error("cannot encode invalid code point {0:#X}")]
    InvalidCodePoint(u32),
}

/// Any error produced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("decoding error: {0}")]
    Decoding(#[from] DecodingError),
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),
}
