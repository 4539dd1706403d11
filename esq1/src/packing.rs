//! The fixed-layout byte runs that make up a patch in memory.
//!
//! Every section of a patch is packed into a run of [Packed::SIZE] bytes and
//! decoded again by reading exactly that many bytes from a shared
//! [ByteReader], so sections can be chained one after another.

use crate::error::{Error, FormatError};

/// A sequential cursor over a byte slice
#[derive(Clone, Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Start reading at the beginning of `data`
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
    /// Number of bytes consumed so far
    pub const fn position(&self) -> usize {
        self.pos
    }
    /// Number of bytes left to read
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
    /// Take the next byte
    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        let byte = *self.data.get(self.pos).ok_or(FormatError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(byte)
    }
    /// Take the next `N` bytes
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let mut out = [0u8; N];
        for byte in out.iter_mut() {
            *byte = self.read_u8()?;
        }
        Ok(out)
    }
    /// Take the next byte and check that it is `expected`
    pub fn expect(&mut self, expected: u8) -> Result<(), FormatError> {
        let offset = self.pos;
        let found = self.read_u8()?;
        if found != expected {
            return Err(FormatError::UnexpectedByte {
                offset,
                expected,
                found,
            });
        }
        Ok(())
    }
}

/// A value with a fixed-size packed representation
pub trait Packed: Default {
    /// Length of the packed representation in bytes
    const SIZE: usize;

    /// Append exactly [Self::SIZE] bytes to `out`
    fn pack(&self, out: &mut Vec<u8>);

    /// Read exactly [Self::SIZE] bytes from `reader` into a new value
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, Error>;

    /// Decode into `self`.  On failure `self` is left untouched.
    fn unpack(&mut self, reader: &mut ByteReader<'_>) -> Result<(), Error> {
        *self = Self::decode(reader)?;
        Ok(())
    }

    /// The packed representation as a new buffer
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE);
        self.pack(&mut out);
        debug_assert_eq!(out.len(), Self::SIZE);
        out
    }

    /// Decode a buffer holding exactly one packed value
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let mut reader = ByteReader::new(bytes);
        let value = Self::decode(&mut reader)?;
        match reader.remaining() {
            0 => Ok(value),
            n => Err(FormatError::TrailingData(n).into()),
        }
    }
}

/// A flag packed into the top bit of a byte
pub(crate) const fn flag_bit(flag: bool) -> u8 {
    (flag as u8) << 7
}

/// The flag held in the top bit of a byte
pub(crate) const fn bit_flag(byte: u8) -> bool {
    byte & 0x80 != 0
}

/// Randomize a value five times over, checking that each packed run has
/// the declared length and decodes back to an equal value.
#[cfg(test)]
pub(crate) fn check_round_trip<T>(seed: u64)
where
    T: Packed + crate::Randomize + PartialEq + core::fmt::Debug,
{
    use rand::{rngs::SmallRng, SeedableRng};

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut original = T::default();
    for _ in 0..5 {
        original.randomize(&mut rng);
        let bytes = original.to_bytes();
        assert_eq!(bytes.len(), T::SIZE);

        let mut reader = ByteReader::new(&bytes);
        let copy = T::decode(&mut reader).unwrap();
        assert_eq!(reader.position(), T::SIZE);
        assert_eq!(original, copy);
        assert_eq!(copy.to_bytes(), bytes);

        original = copy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_tracks_position() {
        let data = [1u8, 2, 3, 4];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_u8().unwrap(), 1);
        assert_eq!(reader.read_array::<2>().unwrap(), [2, 3]);
        assert_eq!(reader.position(), 3);
        assert_eq!(reader.remaining(), 1);
        assert_eq!(
            reader.expect(5),
            Err(FormatError::UnexpectedByte {
                offset: 3,
                expected: 5,
                found: 4
            })
        );
        assert_eq!(reader.read_u8(), Err(FormatError::UnexpectedEnd));
    }
    #[test]
    fn flag_bits() {
        assert_eq!(flag_bit(true), 0x80);
        assert_eq!(flag_bit(false), 0);
        assert!(bit_flag(0xC0));
        assert!(!bit_flag(0x7F));
    }
}
