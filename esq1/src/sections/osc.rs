use super::*;

/// Octave range accepted by [Oscillator::set_octave]
const OCTAVE_MIN: i16 = -3;
const OCTAVE_MAX: i16 = 5;

/// The oscillator waveforms, in the order they are stored in patch memory
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Waveform {
    #[default]
    Saw,
    Bell,
    Sine,
    Square,
    Pulse,
    Noise1,
    Noise2,
    Noise3,
    Bass,
    Piano,
    ElPiano,
    Voice1,
    Voice2,
    Voice3,
    Kick,
    Reed,
    Organ,
    Synth1,
    Synth2,
    Synth3,
    Formant1,
    Formant2,
    Formant3,
    Formant4,
    Formant5,
    Pulse2,
    Square2,
    FourOctaves,
    Prime,
    Bass2,
    ElPiano2,
    Octave,
    Octave5,
}

impl Waveform {
    /// An array containing all possible `Waveform` values, in order
    pub const ELEM: [Waveform; Self::numel()] = [
        Waveform::Saw,
        Waveform::Bell,
        Waveform::Sine,
        Waveform::Square,
        Waveform::Pulse,
        Waveform::Noise1,
        Waveform::Noise2,
        Waveform::Noise3,
        Waveform::Bass,
        Waveform::Piano,
        Waveform::ElPiano,
        Waveform::Voice1,
        Waveform::Voice2,
        Waveform::Voice3,
        Waveform::Kick,
        Waveform::Reed,
        Waveform::Organ,
        Waveform::Synth1,
        Waveform::Synth2,
        Waveform::Synth3,
        Waveform::Formant1,
        Waveform::Formant2,
        Waveform::Formant3,
        Waveform::Formant4,
        Waveform::Formant5,
        Waveform::Pulse2,
        Waveform::Square2,
        Waveform::FourOctaves,
        Waveform::Prime,
        Waveform::Bass2,
        Waveform::ElPiano2,
        Waveform::Octave,
        Waveform::Octave5,
    ];
    /// The number of waveforms
    pub const fn numel() -> usize {
        1 + Self::Octave5 as usize
    }
    /// Convert a `u8` to a `Waveform`
    pub const fn from_u8(value: u8) -> Option<Self> {
        if value as usize >= Self::numel() {
            None
        } else {
            Some(Self::ELEM[value as usize])
        }
    }
    /// The label used for this waveform on the instrument
    pub const fn to_str(&self) -> &'static str {
        match self {
            Self::Saw => "SAW",
            Self::Bell => "BELL",
            Self::Sine => "SINE",
            Self::Square => "SQUARE",
            Self::Pulse => "PULSE",
            Self::Noise1 => "NOISE 1",
            Self::Noise2 => "NOISE 2",
            Self::Noise3 => "NOISE 3",
            Self::Bass => "BASS",
            Self::Piano => "PIANO",
            Self::ElPiano => "EL PNO",
            Self::Voice1 => "VOICE 1",
            Self::Voice2 => "VOICE 2",
            Self::Voice3 => "VOICE 3",
            Self::Kick => "KICK",
            Self::Reed => "REED",
            Self::Organ => "ORGAN",
            Self::Synth1 => "SYNTH 1",
            Self::Synth2 => "SYNTH 2",
            Self::Synth3 => "SYNTH 3",
            Self::Formant1 => "FORMT 1",
            Self::Formant2 => "FORMT 2",
            Self::Formant3 => "FORMT 3",
            Self::Formant4 => "FORMT 4",
            Self::Formant5 => "FORMT 5",
            Self::Pulse2 => "PULSE 2",
            Self::Square2 => "SQR 2",
            Self::FourOctaves => "FOUR OCTS",
            Self::Prime => "PRIME",
            Self::Bass2 => "BASS 2",
            Self::ElPiano2 => "E PNO 2",
            Self::Octave => "OCTAVE",
            Self::Octave5 => "OCT+5",
        }
    }
}

impl TryFrom<u8> for Waveform {
    type Error = crate::RangeError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(crate::RangeError::OutOfRange {
            value: i16::from(value),
            min: Self::Saw as i16,
            max: Self::Octave5 as i16,
        })
    }
}

impl Randomize for Waveform {
    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::ELEM[rng.gen_range(0..Self::numel())];
    }
}

impl Bounded for Waveform {
    fn reset(&mut self) {
        *self = Self::default();
    }
    fn set_to_minimum(&mut self) {
        *self = Self::Saw;
    }
    fn set_to_maximum(&mut self) {
        *self = Self::Octave5;
    }
}

/// Parameters for one of the three oscillators (and its DCA) of a patch.
///
/// Packed layout (10 bytes):
///
/// | byte | contents                                                 |
/// |------|----------------------------------------------------------|
/// | 0    | `semitone`                                               |
/// | 1    | `fine_tune << 3`                                         |
/// | 2    | `frequency_modulation_sources[1] << 4 \| [0]`            |
/// | 3..5 | `frequency_modulation_amounts[i]` (wire value) `<< 1`    |
/// | 5    | `waveform`                                               |
/// | 6    | `dca_enable << 7 \| dca_level << 1`                      |
/// | 7    | `dca_modulation_sources[1] << 4 \| [0]`                  |
/// | 8..10| `dca_modulation_amounts[i]` (wire value) `<< 1`          |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Oscillator {
    /// Pitch in semitones, 0 to 96 (default 36).  See [Oscillator::set_octave]
    pub semitone: Ranged<96, 36>,
    /// Fine tune, 0 to 31
    pub fine_tune: Ranged<31>,
    /// The two frequency modulation sources
    pub frequency_modulation_sources: [ModSource; 2],
    /// The two frequency modulation amounts
    pub frequency_modulation_amounts: [ModAmount; 2],
    /// Oscillator waveform
    pub waveform: Waveform,
    /// Enable this oscillator's DCA
    pub dca_enable: bool,
    /// DCA output level, 0 to 63
    pub dca_level: Ranged<63>,
    /// The two amplitude modulation sources
    pub dca_modulation_sources: [ModSource; 2],
    /// The two amplitude modulation amounts
    pub dca_modulation_amounts: [ModAmount; 2],
}

impl Oscillator {
    /// Set the semitone to the start of an octave, -3 to 5
    pub fn set_octave(&mut self, octave: i16) -> Result<(), crate::RangeError> {
        if !(OCTAVE_MIN..=OCTAVE_MAX).contains(&octave) {
            return Err(crate::RangeError::OutOfRange {
                value: octave,
                min: OCTAVE_MIN,
                max: OCTAVE_MAX,
            });
        }
        self.semitone.set((octave - OCTAVE_MIN) * 12)
    }
}

impl Randomize for Oscillator {
    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.semitone.randomize(rng);
        self.fine_tune.randomize(rng);
        self.frequency_modulation_sources.randomize(rng);
        self.frequency_modulation_amounts.randomize(rng);
        self.waveform.randomize(rng);
        self.dca_enable.randomize(rng);
        self.dca_level.randomize(rng);
        self.dca_modulation_sources.randomize(rng);
        self.dca_modulation_amounts.randomize(rng);
    }
}

impl Packed for Oscillator {
    const SIZE: usize = 10;

    fn pack(&self, out: &mut Vec<u8>) {
        out.push(self.semitone.wire());
        out.push(self.fine_tune.wire() << 3);
        out.push(pack_sources(&self.frequency_modulation_sources));
        for amount in &self.frequency_modulation_amounts {
            out.push(amount.to_wire() << 1);
        }
        out.push(self.waveform as u8);
        out.push(flag_bit(self.dca_enable) | self.dca_level.wire() << 1);
        out.push(pack_sources(&self.dca_modulation_sources));
        for amount in &self.dca_modulation_amounts {
            out.push(amount.to_wire() << 1);
        }
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, Error> {
        let mut osc = Self::default();
        osc.semitone.set_wire(reader.read_u8()?)?;
        osc.fine_tune.set_wire(reader.read_u8()? >> 3)?;
        osc.frequency_modulation_sources = unpack_sources(reader.read_u8()?)?;
        for amount in osc.frequency_modulation_amounts.iter_mut() {
            amount.set_wire(reader.read_u8()? >> 1)?;
        }
        osc.waveform = Waveform::try_from(reader.read_u8()?)?;

        let byte = reader.read_u8()?;
        osc.dca_enable = bit_flag(byte);
        osc.dca_level.set_wire((byte & LOW7) >> 1)?;

        osc.dca_modulation_sources = unpack_sources(reader.read_u8()?)?;
        for amount in osc.dca_modulation_amounts.iter_mut() {
            amount.set_wire(reader.read_u8()? >> 1)?;
        }
        Ok(osc)
    }
}
