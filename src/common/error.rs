use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Bit stream
    #[error("Value {value} doesn't fit in {len} bits")]
    BitsOutOfRange { value: u32, len: usize },

    // Segments
    #[error("Invalid character: {0:?}")]
    InvalidChar(char),
    #[error("ECI designator out of range: {0}")]
    InvalidEciDesignator(u32),
    #[error("Segment too long: {0} bytes")]
    SegmentTooLong(usize),

    // Metadata
    #[error("Invalid version: {0}")]
    InvalidVersion(usize),
    #[error("Invalid version range: {min}..={max}")]
    InvalidVersionRange { min: usize, max: usize },
    #[error("Invalid masking pattern: {0}")]
    InvalidMaskingPattern(u8),

    // Error correction
    #[error("Invalid Reed-Solomon degree: {0}")]
    InvalidDegree(usize),

    // Builder
    #[error("Data too long")]
    DataTooLong,

    #[error("Internal error: {0}")]
    Internal(#[from] Invariant),
}

pub type QRResult<T> = Result<T, QRError>;

// Broken algorithmic invariants. None of these are reachable from any input, they
// only surface if the capacity tables or the placement geometry are wrong.
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum Invariant {
    #[error("Codeword count mismatch: expected {expected}, got {actual}")]
    CodewordCountMismatch { expected: usize, actual: usize },
    #[error("Bit count mismatch: expected {expected}, got {actual}")]
    BitCountMismatch { expected: usize, actual: usize },
    #[error("BCH code {value:#x} overflows {bits} bits")]
    BchOverflow { value: u32, bits: usize },
}
