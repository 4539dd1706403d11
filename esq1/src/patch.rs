//! A complete ESQ-1 program: a name plus the four section groups.

use rand::Rng;

use crate::error::{Error, FormatError};
use crate::packing::{ByteReader, Packed};
use crate::param::{Bounded, Randomize};
use crate::sections::{Envelope, Lfo, Miscellaneous, Oscillator};

/// Number of characters in a patch name on the instrument
pub const NAME_LENGTH: usize = 6;

/// One complete program.
///
/// Packed as the six name bytes followed by the envelopes, the LFOs, the
/// oscillators and the miscellaneous section, in that order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Patch {
    /// The patch name.  It is stored as six upper-case ASCII characters
    /// (see [Patch::wire_name]); decoded patches hold the name as stored.
    /// Stored names outside of ASCII are rejected when decoding.
    pub name: String,
    /// Envelopes 1 to 4
    pub envelopes: [Envelope; 4],
    /// LFOs 1 to 3
    pub lfos: [Lfo; 3],
    /// Oscillators 1 to 3
    pub oscillators: [Oscillator; 3],
    /// Filter, DCA 4, pan, modes and split/layer settings
    pub miscellaneous: Miscellaneous,
}

impl Default for Patch {
    fn default() -> Self {
        Self {
            name: " ".repeat(NAME_LENGTH),
            envelopes: Default::default(),
            lfos: Default::default(),
            oscillators: Default::default(),
            miscellaneous: Default::default(),
        }
    }
}

impl Patch {
    /// A patch with every field at its default and a blank name
    pub fn new() -> Self {
        Self::default()
    }

    /// The name as it is stored: upper-cased, with anything outside of
    /// ASCII replaced by `?`, padded with spaces or cut to six characters.
    pub fn wire_name(&self) -> [u8; NAME_LENGTH] {
        let mut out = [b' '; NAME_LENGTH];
        for (slot, c) in out.iter_mut().zip(self.name.chars()) {
            *slot = if c.is_ascii() {
                c.to_ascii_uppercase() as u8
            } else {
                b'?'
            };
        }
        out
    }
}

/// Randomizes every section.  The name is left as it is.
impl Randomize for Patch {
    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.envelopes.randomize(rng);
        self.lfos.randomize(rng);
        self.oscillators.randomize(rng);
        self.miscellaneous.randomize(rng);
    }
}

impl Packed for Patch {
    const SIZE: usize = NAME_LENGTH
        + 4 * Envelope::SIZE
        + 3 * Lfo::SIZE
        + 3 * Oscillator::SIZE
        + Miscellaneous::SIZE;

    fn pack(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.wire_name());
        for env in &self.envelopes {
            env.pack(out);
        }
        for lfo in &self.lfos {
            lfo.pack(out);
        }
        for osc in &self.oscillators {
            osc.pack(out);
        }
        self.miscellaneous.pack(out);
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, Error> {
        let offset = reader.position();
        let name = reader.read_array::<NAME_LENGTH>()?;
        if let Some(i) = name.iter().position(|b| !b.is_ascii()) {
            return Err(FormatError::InvalidName {
                offset: offset + i,
                value: name[i],
            }
            .into());
        }
        let mut patch = Self {
            name: name.iter().copied().map(char::from).collect(),
            ..Self::default()
        };
        for env in patch.envelopes.iter_mut() {
            *env = Envelope::decode(reader)?;
        }
        for lfo in patch.lfos.iter_mut() {
            *lfo = Lfo::decode(reader)?;
        }
        for osc in patch.oscillators.iter_mut() {
            *osc = Oscillator::decode(reader)?;
        }
        patch.miscellaneous = Miscellaneous::decode(reader)?;
        Ok(patch)
    }
}

/// A starting point that makes a sound: oscillator 1 fully on into an
/// open filter, with envelope 4 held at full level.
pub fn simple_patch() -> Patch {
    let mut patch = Patch::new();
    let osc = &mut patch.oscillators[0];
    osc.dca_enable = true;
    osc.dca_level.set_to_maximum();
    let misc = &mut patch.miscellaneous;
    misc.frequency.set_to_maximum();
    misc.dca4_modulation_amount.set_to_maximum();
    let env = &mut patch.envelopes[3];
    env.levels[0].set_to_maximum();
    env.levels[2].set_to_maximum();
    patch
}
