//! The four functional sections of a patch.
//!
//! Each section is a fixed set of fields with fixed ranges, packed into a
//! fixed-length run of bytes.  The fields are public so patches can be edited
//! in place.  Numeric fields are [Ranged] or [ModAmount], whose ranges are
//! fixed by their types, so any value a field can hold fits its packed bits.

use rand::Rng;

use crate::error::Error;
use crate::modsource::ModSource;
use crate::packing::{bit_flag, flag_bit, ByteReader, Packed};
use crate::param::{Bounded, ModAmount, Randomize, Ranged};

#[cfg(test)]
use crate::packing::check_round_trip;

mod env;
pub use env::Envelope;

mod lfo;
pub use lfo::{Lfo, LfoWave};

mod osc;
pub use osc::{Oscillator, Waveform};

mod misc;
pub use misc::Miscellaneous;

/// Mask for the seven bits below a packed flag
const LOW7: u8 = 0x7F;
/// Mask for a four bit modulation source
const NIBBLE: u8 = 0x0F;

/// Pack two modulation sources into one byte, the second in the high nibble
const fn pack_sources(sources: &[ModSource; 2]) -> u8 {
    (sources[1] as u8) << 4 | sources[0] as u8
}

/// The inverse of [pack_sources]
fn unpack_sources(byte: u8) -> Result<[ModSource; 2], Error> {
    Ok([
        ModSource::try_from(byte & NIBBLE)?,
        ModSource::try_from(byte >> 4)?,
    ])
}
