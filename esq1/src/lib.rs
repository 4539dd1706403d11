//! This crate models the sound programs ("patches") of the Ensoniq ESQ-1 and
//! converts them to and from the SysEx dumps the instrument sends and
//! receives.
//!
//! A [Patch] is a name plus four groups of parameters (see [sections]),
//! each made of range checked [Ranged] values, signed [ModAmount]s, flags and
//! small enumerations such as [ModSource].  Every group has a fixed packed
//! layout implemented through the [Packed] trait, and a patch packs into
//! [Patch::SIZE] bytes.  The [sysex] module wraps one patch, or a bank of
//! forty, in the transport framing used on the wire.
//!
//! Values are never clamped: assigning or decoding a value outside of its
//! range fails with an [Error].
//!
//! ```
//! use esq1::{sysex, Packed};
//!
//! let mut patch = esq1::simple_patch();
//! patch.name = "Organ".into();
//! patch.oscillators[0].waveform = esq1::Waveform::Organ;
//! patch.miscellaneous.filter_modulation_amount[0].set(-15)?;
//!
//! let dump = sysex::encode(&[patch], 0)?;
//! let patches = sysex::decode(&dump)?;
//! assert_eq!(patches[0].name, "ORGAN ");
//! assert_eq!(patches[0].to_bytes().len(), esq1::Patch::SIZE);
//! # Ok::<(), esq1::Error>(())
//! ```

#![warn(missing_docs)]

mod error;
mod modsource;
mod packing;
mod param;
mod patch;

pub mod sections;
pub mod sign;
pub mod sysex;

pub use error::{Error, FormatError, RangeError};
pub use modsource::ModSource;
pub use packing::{ByteReader, Packed};
pub use param::{Bounded, ModAmount, Parameter, Randomize, Ranged};
pub use patch::{simple_patch, Patch, NAME_LENGTH};
pub use sections::{Envelope, Lfo, LfoWave, Miscellaneous, Oscillator, Waveform};
