use super::*;

/// The six bit field below the packed top bits
const LOW6: u8 = 0x3F;
/// Bit holding the humanize flag, below the reset flag
const HUMANIZE: u8 = 1 << 6;
/// Bits of the modulation source stored in byte 1
const SOURCE_HIGH: u8 = 0b1100;
/// Bits of the modulation source stored in byte 2
const SOURCE_LOW: u8 = 0b0011;

/// The LFO waveform in use
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LfoWave {
    /// Triangle wave is default
    #[default]
    Triangle,
    /// Sawtooth wave
    Saw,
    /// Square wave
    Square,
    /// Noise
    Noise,
}

impl LfoWave {
    /// An array containing all possible `LfoWave` values, in order
    pub const ELEM: [LfoWave; 4] = [
        LfoWave::Triangle,
        LfoWave::Saw,
        LfoWave::Square,
        LfoWave::Noise,
    ];
    /// Convert a `u8` to an `LfoWave`
    pub const fn new_from_u8(value: u8) -> Option<Self> {
        if value as usize >= Self::ELEM.len() {
            None
        } else {
            Some(Self::ELEM[value as usize])
        }
    }
    /// The label used for this waveform on the instrument
    pub const fn to_str(&self) -> &'static str {
        match self {
            Self::Triangle => "TRI",
            Self::Saw => "SAW",
            Self::Square => "SQR",
            Self::Noise => "NOI",
        }
    }
}

impl TryFrom<u8> for LfoWave {
    type Error = crate::RangeError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new_from_u8(value).ok_or(crate::RangeError::OutOfRange {
            value: i16::from(value),
            min: Self::Triangle as i16,
            max: Self::Noise as i16,
        })
    }
}

impl Randomize for LfoWave {
    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::ELEM[rng.gen_range(0..Self::ELEM.len())];
    }
}

impl Bounded for LfoWave {
    fn reset(&mut self) {
        *self = Self::default();
    }
    fn set_to_minimum(&mut self) {
        *self = Self::Triangle;
    }
    fn set_to_maximum(&mut self) {
        *self = Self::Noise;
    }
}

/// Parameters for one of the three LFOs of a patch.
///
/// The LFO output ramps from `levels[0]` (when the key is struck) to
/// `levels[1]` at a rate set by `delay`; a delay of 0 holds `levels[0]`.
///
/// Packed layout (4 bytes):
///
/// | byte | bits 7..6                    | bits 5..0    |
/// |------|------------------------------|--------------|
/// | 0    | `waveform`                   | `frequency`  |
/// | 1    | `modulation_source` bits 3..2| `levels[0]`  |
/// | 2    | `modulation_source` bits 1..0| `levels[1]`  |
/// | 3    | `reset`, `humanize`          | `delay`      |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Lfo {
    /// Start and end level, 0 to 63
    pub levels: [Ranged<63>; 2],
    /// LFO rate, 0 to 63
    pub frequency: Ranged<63>,
    /// Restart the cycle each time a key is struck
    pub reset: bool,
    /// Add a random element to the frequency
    pub humanize: bool,
    /// The LFO waveform
    pub waveform: LfoWave,
    /// Rate of change from `levels[0]` to `levels[1]`, 0 to 63
    pub delay: Ranged<63>,
    /// Modulation source for the LFO depth
    pub modulation_source: ModSource,
}

impl Randomize for Lfo {
    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.levels.randomize(rng);
        self.frequency.randomize(rng);
        self.reset.randomize(rng);
        self.humanize.randomize(rng);
        self.waveform.randomize(rng);
        self.delay.randomize(rng);
        self.modulation_source.randomize(rng);
    }
}

impl Packed for Lfo {
    const SIZE: usize = 4;

    fn pack(&self, out: &mut Vec<u8>) {
        let source = self.modulation_source as u8;
        out.push((self.waveform as u8) << 6 | self.frequency.wire());
        out.push((source & SOURCE_HIGH) << 4 | self.levels[0].wire());
        out.push((source & SOURCE_LOW) << 6 | self.levels[1].wire());
        out.push(flag_bit(self.reset) | (self.humanize as u8) << 6 | self.delay.wire());
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, Error> {
        let mut lfo = Self::default();

        let byte = reader.read_u8()?;
        lfo.waveform = LfoWave::try_from(byte >> 6)?;
        lfo.frequency.set_wire(byte & LOW6)?;

        let byte = reader.read_u8()?;
        let source_high = byte >> 6;
        lfo.levels[0].set_wire(byte & LOW6)?;

        let byte = reader.read_u8()?;
        let source_low = byte >> 6;
        lfo.levels[1].set_wire(byte & LOW6)?;
        lfo.modulation_source = ModSource::try_from(source_high << 2 | source_low)?;

        let byte = reader.read_u8()?;
        lfo.reset = bit_flag(byte);
        lfo.humanize = byte & HUMANIZE != 0;
        lfo.delay.set_wire(byte & LOW6)?;

        Ok(lfo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        let mut lfo = Lfo::default();
        lfo.waveform = LfoWave::Square;
        lfo.frequency.set(33).unwrap();
        // 0b1001: high pair 0b10 goes to byte 1, low pair 0b01 to byte 2
        lfo.modulation_source = ModSource::Keyboard;
        lfo.levels[0].set(5).unwrap();
        lfo.levels[1].set(63).unwrap();
        lfo.reset = true;
        lfo.delay.set(17).unwrap();
        assert_eq!(
            lfo.to_bytes(),
            [0b1010_0001, 0b1000_0101, 0b0111_1111, 0b1001_0001]
        );

        lfo.reset = false;
        lfo.humanize = true;
        lfo.modulation_source = ModSource::Env1;
        assert_eq!(
            lfo.to_bytes(),
            [0b1010_0001, 0b0000_0101, 0b1111_1111, 0b0101_0001]
        );
    }
    #[test]
    fn default_layout() {
        // OFF (0b1111) lands in the top bits of bytes 1 and 2
        assert_eq!(Lfo::default().to_bytes(), [0, 0xC0, 0xC0, 0]);
    }
    #[test]
    fn source_split_is_interleaved() {
        for src in ModSource::elements() {
            let mut lfo = Lfo::default();
            lfo.modulation_source = *src;
            let bytes = lfo.to_bytes();
            let bits = *src as u8;
            assert_eq!(bytes[1] >> 6, bits >> 2);
            assert_eq!(bytes[2] >> 6, bits & 0b11);
            assert_eq!(Lfo::from_bytes(&bytes).unwrap().modulation_source, *src);
        }
    }
    #[test]
    fn round_trip() {
        check_round_trip::<Lfo>(2);
    }
    #[test]
    fn rejects_short_input() {
        assert!(Lfo::from_bytes(&[0, 0, 0]).is_err());
        assert!(Lfo::from_bytes(&[0, 0, 0, 0, 0]).is_err());
    }
}
