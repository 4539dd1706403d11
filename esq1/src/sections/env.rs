use super::*;

/// Parameters for one of the four envelopes of a patch.
///
/// Packed layout (10 bytes):
///
/// | byte | contents                          |
/// |------|-----------------------------------|
/// | 0..3 | `levels[i]` (wire value) `<< 1`   |
/// | 3..7 | `times[i]`                        |
/// | 7    | `velocity_level << 2`             |
/// | 8    | `velocity_attack_control`         |
/// | 9    | `keyboard_decay_scaling`          |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Envelope {
    /// The three envelope levels, -63 to 63
    pub levels: [ModAmount; 3],
    /// The four envelope times, 0 to 63
    pub times: [Ranged<63>; 4],
    /// How far the levels are lowered by note velocity
    pub velocity_level: Ranged<63>,
    /// How far `times[0]` is shortened by note velocity
    pub velocity_attack_control: Ranged<63>,
    /// How far `times[1]` and `times[2]` are shortened by note height
    pub keyboard_decay_scaling: Ranged<63>,
}

impl Randomize for Envelope {
    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.levels.randomize(rng);
        self.times.randomize(rng);
        self.velocity_level.randomize(rng);
        self.velocity_attack_control.randomize(rng);
        self.keyboard_decay_scaling.randomize(rng);
    }
}

impl Packed for Envelope {
    const SIZE: usize = 10;

    fn pack(&self, out: &mut Vec<u8>) {
        for level in &self.levels {
            out.push(level.to_wire() << 1);
        }
        for time in &self.times {
            out.push(time.wire());
        }
        out.push(self.velocity_level.wire() << 2);
        out.push(self.velocity_attack_control.wire());
        out.push(self.keyboard_decay_scaling.wire());
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, Error> {
        let mut env = Self::default();
        for level in env.levels.iter_mut() {
            level.set_wire(reader.read_u8()? >> 1)?;
        }
        for time in env.times.iter_mut() {
            time.set_wire(reader.read_u8()?)?;
        }
        env.velocity_level.set_wire(reader.read_u8()? >> 2)?;
        env.velocity_attack_control.set_wire(reader.read_u8()?)?;
        env.keyboard_decay_scaling.set_wire(reader.read_u8()?)?;
        Ok(env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;

    fn sample() -> Envelope {
        let mut env = Envelope::default();
        env.levels[0].set(-63).unwrap();
        env.levels[2].set(63).unwrap();
        env.times[0].set(1).unwrap();
        env.times[1].set(2).unwrap();
        env.times[2].set(3).unwrap();
        env.times[3].set(63).unwrap();
        env.velocity_level.set(63).unwrap();
        env.velocity_attack_control.set(5).unwrap();
        env.keyboard_decay_scaling.set(7).unwrap();
        env
    }

    #[test]
    fn layout() {
        assert_eq!(
            sample().to_bytes(),
            [130, 0, 126, 1, 2, 3, 63, 252, 5, 7]
        );
        assert_eq!(Envelope::default().to_bytes(), [0; 10]);
    }
    #[test]
    fn decode_layout() {
        let env = Envelope::from_bytes(&[130, 0, 126, 1, 2, 3, 63, 252, 5, 7]).unwrap();
        assert_eq!(env, sample());
        assert_eq!(env.levels[0].value(), -63);
        assert_eq!(env.velocity_level.value(), 63);
    }
    #[test]
    fn round_trip() {
        check_round_trip::<Envelope>(1);
    }
    #[test]
    fn rejects_out_of_domain() {
        // a level byte carrying the reserved wire value
        let mut bytes = sample().to_bytes();
        bytes[1] = 64 << 1;
        assert!(matches!(
            Envelope::from_bytes(&bytes),
            Err(Error::InvalidCode(64))
        ));
        // a time above 63
        let mut bytes = sample().to_bytes();
        bytes[4] = 64;
        assert!(matches!(Envelope::from_bytes(&bytes), Err(Error::Range(_))));
        assert!(matches!(
            Envelope::from_bytes(&sample().to_bytes()[..9]),
            Err(Error::Format(FormatError::UnexpectedEnd))
        ));
    }
    #[test]
    fn failed_unpack_leaves_value_alone() {
        let mut env = sample();
        let bytes = [0xFF; 10];
        assert!(env.unpack(&mut ByteReader::new(&bytes)).is_err());
        assert_eq!(env, sample());
    }
}
