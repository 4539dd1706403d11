//! Conversion between the signed values shown on the instrument's display
//! and their seven bit representation in patch memory.
//!
//! Display values `0..=63` are stored unchanged and `-63..=-1` are stored as
//! `128 + value` (`65..=127`).  The code point 64 is never produced and is
//! rejected when decoding.

use crate::error::{Error, RangeError};

/// Lowest signed display value
pub const DISPLAY_MIN: i16 = -63;
/// Highest signed display value
pub const DISPLAY_MAX: i16 = 63;
/// The wire value that has no display counterpart
pub const RESERVED_WIRE: u8 = 64;

/// Convert a display value (`-63..=63`) into its wire value.
///
/// ```
/// assert_eq!(esq1::sign::display_to_wire(-1).unwrap(), 127);
/// assert_eq!(esq1::sign::display_to_wire(17).unwrap(), 17);
/// assert!(esq1::sign::display_to_wire(64).is_err());
/// ```
pub fn display_to_wire(value: i16) -> Result<u8, RangeError> {
    if !(DISPLAY_MIN..=DISPLAY_MAX).contains(&value) {
        return Err(RangeError::OutOfRange {
            value,
            min: DISPLAY_MIN,
            max: DISPLAY_MAX,
        });
    }
    Ok(fold(value))
}

/// Convert a wire value (`0..=127`, except 64) into its display value.
///
/// ```
/// assert_eq!(esq1::sign::wire_to_display(65).unwrap(), -63);
/// assert!(matches!(
///     esq1::sign::wire_to_display(64),
///     Err(esq1::Error::InvalidCode(64))
/// ));
/// ```
pub fn wire_to_display(wire: u8) -> Result<i16, Error> {
    match wire {
        0..=63 => Ok(i16::from(wire)),
        RESERVED_WIRE => Err(Error::InvalidCode(wire)),
        65..=127 => Ok(i16::from(wire) - 128),
        _ => Err(RangeError::OutOfRange {
            value: i16::from(wire),
            min: 0,
            max: 127,
        }
        .into()),
    }
}

/// Unchecked fold of an in-range display value into seven bits
pub(crate) const fn fold(value: i16) -> u8 {
    (value as u8) & 0x7F
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trip() {
        for value in DISPLAY_MIN..=DISPLAY_MAX {
            let wire = display_to_wire(value).unwrap();
            assert_ne!(wire, RESERVED_WIRE);
            assert!(wire <= 127);
            assert_eq!(wire_to_display(wire).unwrap(), value);
        }
    }
    #[test]
    fn wire_round_trip() {
        for wire in (0..=127u8).filter(|w| *w != RESERVED_WIRE) {
            let value = wire_to_display(wire).unwrap();
            assert_eq!(display_to_wire(value).unwrap(), wire);
        }
    }
    #[test]
    fn known_values() {
        assert_eq!(display_to_wire(0).unwrap(), 0);
        assert_eq!(display_to_wire(63).unwrap(), 63);
        assert_eq!(display_to_wire(-63).unwrap(), 65);
        assert_eq!(display_to_wire(-15).unwrap(), 113);
        assert_eq!(wire_to_display(113).unwrap(), -15);
    }
    #[test]
    fn out_of_domain() {
        assert!(display_to_wire(-64).is_err());
        assert!(display_to_wire(64).is_err());
        assert!(matches!(wire_to_display(64), Err(Error::InvalidCode(64))));
        assert!(matches!(wire_to_display(128), Err(Error::Range(_))));
        assert!(matches!(wire_to_display(255), Err(Error::Range(_))));
    }
}
