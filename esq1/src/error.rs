//! Error types shared by the patch model and both codec layers

use thiserror::Error;

/// A value did not fit the range of the parameter it was assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    /// A parameter was constructed with its bounds the wrong way around
    #[error("minimum ({min}) must not be greater than maximum ({max})")]
    Inverted {
        /// The requested minimum
        min: i16,
        /// The requested maximum
        max: i16,
    },
    /// The value lies outside of `min..=max`
    #[error("value ({value}) is outside of the range {min}..={max}")]
    OutOfRange {
        /// The rejected value
        value: i16,
        /// Inclusive lower bound
        min: i16,
        /// Inclusive upper bound
        max: i16,
    },
}

/// The SysEx container (or a packed byte run) is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A fixed marker byte (header or end of SysEx) did not match
    #[error("expected {expected:#04x} at offset {offset}, found {found:#04x}")]
    UnexpectedByte {
        /// Offset of the byte within the input
        offset: usize,
        /// The marker that should be there
        expected: u8,
        /// The byte that was found instead
        found: u8,
    },
    /// The dump type byte is neither a single nor an all program dump
    #[error("unknown dump type {0:#04x}")]
    UnknownDumpType(u8),
    /// A transport byte carried more than four bits
    #[error("transport byte {value:#04x} at offset {offset} is not a nibble")]
    InvalidNibble {
        /// Offset of the byte within the input
        offset: usize,
        /// The offending byte
        value: u8,
    },
    /// A patch name byte lies outside of ASCII
    #[error("name byte {value:#04x} at payload offset {offset} is not ASCII")]
    InvalidName {
        /// Offset of the byte within the packed patch data
        offset: usize,
        /// The offending byte
        value: u8,
    },
    /// The input ended before the fixed layout was complete
    #[error("unexpected end of data")]
    UnexpectedEnd,
    /// Bytes were left over after a complete value was decoded
    #[error("{0} trailing byte(s) after the end of the data")]
    TrailingData(usize),
}

/// Everything that can go wrong while editing, packing or framing patches.
#[derive(Debug, Error)]
pub enum Error {
    /// See [RangeError]
    #[error(transparent)]
    Range(#[from] RangeError),
    /// See [FormatError]
    #[error(transparent)]
    Format(#[from] FormatError),
    /// A dump was requested for an empty list of patches
    #[error("at least one patch is required")]
    NoPatches,
    /// The reserved wire value 64 showed up where a signed amount was expected
    #[error("wire value {0} is reserved and has no display value")]
    InvalidCode(u8),
    /// Reading or writing a SysEx file failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            Error::from(RangeError::OutOfRange {
                value: 11,
                min: 5,
                max: 10
            })
            .to_string(),
            "value (11) is outside of the range 5..=10"
        );
        assert_eq!(
            Error::from(FormatError::UnexpectedByte {
                offset: 209,
                expected: 0xF7,
                found: 0x00
            })
            .to_string(),
            "expected 0xf7 at offset 209, found 0x00"
        );
        assert_eq!(
            Error::from(FormatError::UnknownDumpType(3)).to_string(),
            "unknown dump type 0x03"
        );
        assert_eq!(
            Error::InvalidCode(64).to_string(),
            "wire value 64 is reserved and has no display value"
        );
    }
}
