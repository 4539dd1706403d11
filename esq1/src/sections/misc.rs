use super::*;

/// Everything in a patch that is not an envelope, LFO or oscillator: the
/// filter, the final DCA, pan, voice modes, and split/layer settings.
///
/// Most of the 14 packed bytes carry a flag in the top bit:
///
/// | byte | bit 7              | bits 6..0                                |
/// |------|--------------------|------------------------------------------|
/// | 0    | `am`               | `dca4_modulation_amount << 1`            |
/// | 1    | `sync`             | `frequency`                              |
/// | 2    |                    | `resonance`                              |
/// | 3    | `filter_modulation_sources[1] << 4 \| [0]` (whole byte)       ||
/// | 4    | `reset_voice`      | `filter_modulation_amount[0]` (wire)     |
/// | 5    | `mono`             | `filter_modulation_amount[1]` (wire)     |
/// | 6    | `reset_envelope`   | `filter_keyboard_tracking << 1`          |
/// | 7    | `reset_oscillator` | `glide`                                  |
/// | 8    | `split_direction`  | `split_point`                            |
/// | 9    | `layer_flag`       | `layer_program`                          |
/// | 10   | `split_flag`       | `split_program`                          |
/// | 11   | `split_layer_flag` | `split_layer_program`                    |
/// | 12   | `pan << 4 \| pan_modulation_source` (whole byte)              ||
/// | 13   | `cycle`            | `pan_modulation_amount` (wire)           |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Miscellaneous {
    /// Oscillator 2 restarts whenever oscillator 1 completes a cycle
    pub sync: bool,
    /// Oscillator 1 modulates the amplitude of oscillator 2
    pub am: bool,
    /// Monophonic mode
    pub mono: bool,
    /// Glide (portamento), 0 to 63
    pub glide: Ranged<63>,
    /// Steal the voice when the same note is played twice
    pub reset_voice: bool,
    /// Restart all envelopes when a key is re-struck
    pub reset_envelope: bool,
    /// Restart the oscillators when a key is struck
    pub reset_oscillator: bool,
    /// Run envelopes through their full cycle, ignoring key release
    pub cycle: bool,
    /// Pan position, 0 to 15 (default 8)
    pub pan: Ranged<15, 8>,
    /// Pan modulation source
    pub pan_modulation_source: ModSource,
    /// Pan modulation amount
    pub pan_modulation_amount: ModAmount,
    /// How far DCA 4 is modulated by envelope 4, 0 to 63
    pub dca4_modulation_amount: Ranged<63>,
    /// Filter cut-off frequency, 0 to 127
    pub frequency: Ranged<127>,
    /// Filter resonance, 0 to 31
    pub resonance: Ranged<31>,
    /// The two filter modulation sources
    pub filter_modulation_sources: [ModSource; 2],
    /// The two filter modulation amounts
    pub filter_modulation_amount: [ModAmount; 2],
    /// Filter cut-off tracking of the keyboard position, 0 to 63
    pub filter_keyboard_tracking: Ranged<63>,
    /// Direction of the keyboard split
    pub split_direction: bool,
    /// Keyboard split point, 0 to 108
    pub split_point: Ranged<108>,
    /// Layer another program
    pub layer_flag: bool,
    /// The layered program, 0 to 39
    pub layer_program: Ranged<39>,
    /// Split with another program
    pub split_flag: bool,
    /// The split program, 0 to 39
    pub split_program: Ranged<39>,
    /// Layer the split program
    pub split_layer_flag: bool,
    /// The program layered on the split, 0 to 39
    pub split_layer_program: Ranged<39>,
}

impl Randomize for Miscellaneous {
    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.sync.randomize(rng);
        self.am.randomize(rng);
        self.mono.randomize(rng);
        self.glide.randomize(rng);
        self.reset_voice.randomize(rng);
        self.reset_envelope.randomize(rng);
        self.reset_oscillator.randomize(rng);
        self.cycle.randomize(rng);
        self.pan.randomize(rng);
        self.pan_modulation_source.randomize(rng);
        self.pan_modulation_amount.randomize(rng);
        self.dca4_modulation_amount.randomize(rng);
        self.frequency.randomize(rng);
        self.resonance.randomize(rng);
        self.filter_modulation_sources.randomize(rng);
        self.filter_modulation_amount.randomize(rng);
        self.filter_keyboard_tracking.randomize(rng);
        self.split_direction.randomize(rng);
        self.split_point.randomize(rng);
        self.layer_flag.randomize(rng);
        self.layer_program.randomize(rng);
        self.split_flag.randomize(rng);
        self.split_program.randomize(rng);
        self.split_layer_flag.randomize(rng);
        self.split_layer_program.randomize(rng);
    }
}

impl Packed for Miscellaneous {
    const SIZE: usize = 14;

    fn pack(&self, out: &mut Vec<u8>) {
        out.push(flag_bit(self.am) | self.dca4_modulation_amount.wire() << 1);
        out.push(flag_bit(self.sync) | self.frequency.wire());
        out.push(self.resonance.wire());
        out.push(pack_sources(&self.filter_modulation_sources));
        out.push(flag_bit(self.reset_voice) | self.filter_modulation_amount[0].to_wire());
        out.push(flag_bit(self.mono) | self.filter_modulation_amount[1].to_wire());
        out.push(flag_bit(self.reset_envelope) | self.filter_keyboard_tracking.wire() << 1);
        out.push(flag_bit(self.reset_oscillator) | self.glide.wire());
        out.push(flag_bit(self.split_direction) | self.split_point.wire());
        out.push(flag_bit(self.layer_flag) | self.layer_program.wire());
        out.push(flag_bit(self.split_flag) | self.split_program.wire());
        out.push(flag_bit(self.split_layer_flag) | self.split_layer_program.wire());
        out.push(self.pan.wire() << 4 | self.pan_modulation_source as u8);
        out.push(flag_bit(self.cycle) | self.pan_modulation_amount.to_wire());
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, Error> {
        let mut misc = Self::default();

        let byte = reader.read_u8()?;
        misc.am = bit_flag(byte);
        misc.dca4_modulation_amount.set_wire((byte & LOW7) >> 1)?;

        let byte = reader.read_u8()?;
        misc.sync = bit_flag(byte);
        misc.frequency.set_wire(byte & LOW7)?;

        misc.resonance.set_wire(reader.read_u8()?)?;
        misc.filter_modulation_sources = unpack_sources(reader.read_u8()?)?;

        let byte = reader.read_u8()?;
        misc.reset_voice = bit_flag(byte);
        misc.filter_modulation_amount[0].set_wire(byte & LOW7)?;

        let byte = reader.read_u8()?;
        misc.mono = bit_flag(byte);
        misc.filter_modulation_amount[1].set_wire(byte & LOW7)?;

        let byte = reader.read_u8()?;
        misc.reset_envelope = bit_flag(byte);
        misc.filter_keyboard_tracking.set_wire((byte & LOW7) >> 1)?;

        read_flagged(reader, &mut misc.reset_oscillator, &mut misc.glide)?;
        read_flagged(reader, &mut misc.split_direction, &mut misc.split_point)?;
        read_flagged(reader, &mut misc.layer_flag, &mut misc.layer_program)?;
        read_flagged(reader, &mut misc.split_flag, &mut misc.split_program)?;
        read_flagged(reader, &mut misc.split_layer_flag, &mut misc.split_layer_program)?;

        let byte = reader.read_u8()?;
        misc.pan.set_wire(byte >> 4)?;
        misc.pan_modulation_source = ModSource::try_from(byte & NIBBLE)?;

        let byte = reader.read_u8()?;
        misc.cycle = bit_flag(byte);
        misc.pan_modulation_amount.set_wire(byte & LOW7)?;

        Ok(misc)
    }
}

/// A flag in bit 7 with a plain seven bit field below it
fn read_flagged<const MAX: u8, const DEFAULT: u8>(
    reader: &mut ByteReader<'_>,
    flag: &mut bool,
    field: &mut Ranged<MAX, DEFAULT>,
) -> Result<(), Error> {
    let byte = reader.read_u8()?;
    *flag = bit_flag(byte);
    field.set_wire(byte & LOW7)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        assert_eq!(
            Miscellaneous::default().to_bytes(),
            [0, 0, 0, 0xFF, 0, 0, 0, 0, 0, 0, 0, 0, 0x8F, 0]
        );
    }
    #[test]
    fn layout() {
        let mut misc = Miscellaneous::default();
        misc.am = true;
        misc.dca4_modulation_amount.set(63).unwrap();
        misc.sync = true;
        misc.frequency.set(119).unwrap();
        misc.resonance.set(14).unwrap();
        misc.filter_modulation_sources = [ModSource::Lfo1, ModSource::Pedal];
        misc.reset_voice = true;
        misc.filter_modulation_amount[0].set(-15).unwrap();
        misc.filter_modulation_amount[1].set(2).unwrap();
        misc.reset_envelope = true;
        misc.filter_keyboard_tracking.set(32).unwrap();
        misc.mono = true;
        misc.reset_oscillator = true;
        misc.glide.set(9).unwrap();
        misc.split_direction = true;
        misc.split_point.set(108).unwrap();
        misc.layer_flag = true;
        misc.layer_program.set(39).unwrap();
        misc.split_flag = true;
        misc.split_program.set(1).unwrap();
        misc.split_layer_flag = true;
        misc.pan.set(15).unwrap();
        misc.pan_modulation_source = ModSource::Velocity;
        misc.cycle = true;
        misc.pan_modulation_amount.set(-63).unwrap();
        assert_eq!(
            misc.to_bytes(),
            [
                0xFE, // am | 63 << 1
                0xF7, // sync | 119
                14,
                0xC0, // PEDAL << 4 | LFO 1
                0xF1, // reset voice | wire(-15)
                0x82, // mono | 2
                0xC0, // reset envelope | 32 << 1
                0x89, // reset oscillator | 9
                0xEC, // split direction | 108
                0xA7, // layer | 39
                0x81,
                0x80,
                0xF7, // 15 << 4 | VEL
                0xC1, // cycle | wire(-63)
            ]
        );
        assert_eq!(Miscellaneous::from_bytes(&misc.to_bytes()).unwrap(), misc);
    }
    #[test]
    fn round_trip() {
        check_round_trip::<Miscellaneous>(4);
    }
    #[test]
    fn rejects_out_of_domain() {
        let good = Miscellaneous::default().to_bytes();

        let mut bytes = good.clone();
        bytes[2] = 32; // resonance
        assert!(matches!(
            Miscellaneous::from_bytes(&bytes),
            Err(Error::Range(_))
        ));

        let mut bytes = good.clone();
        bytes[8] = 109; // split point
        assert!(matches!(
            Miscellaneous::from_bytes(&bytes),
            Err(Error::Range(_))
        ));

        let mut bytes = good.clone();
        bytes[9] = 40; // layer program
        assert!(matches!(
            Miscellaneous::from_bytes(&bytes),
            Err(Error::Range(_))
        ));

        let mut bytes = good;
        bytes[13] = 0x80 | 64; // cycle | reserved pan amount
        assert!(matches!(
            Miscellaneous::from_bytes(&bytes),
            Err(Error::InvalidCode(64))
        ));
    }
}
