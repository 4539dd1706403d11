//! The modulation source selector shared by oscillators, LFOs, the filter
//! and the pan section

use rand::Rng;

use crate::error::RangeError;
use crate::param::{Bounded, Randomize};

/// An enum representing a choice in modulation source.  The discriminant is
/// the four bit value stored in patch memory.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModSource {
    /// LFO #1
    Lfo1,
    /// LFO #2
    Lfo2,
    /// LFO #3
    Lfo3,
    /// Envelope #1
    Env1,
    /// Envelope #2
    Env2,
    /// Envelope #3
    Env3,
    /// Envelope #4
    Env4,
    /// Linear keyboard velocity
    Velocity,
    /// Non-linear keyboard velocity
    Velocity2,
    /// Position of the note on the keyboard (partial range, 0 to 127)
    Keyboard,
    /// Position of the note on the keyboard, -63 to 63
    Keyboard2,
    /// The modulation wheel
    Wheel,
    /// The foot pedal
    Pedal,
    /// External controller
    ExtControl,
    /// Aftertouch (received, but never sent by the ESQ-1 itself)
    Pressure,
    /// No modulation
    #[default]
    Off,
}

impl ModSource {
    /// An array containing all possible `ModSource` values, in order
    pub const ELEM: [ModSource; Self::numel()] = [
        ModSource::Lfo1,
        ModSource::Lfo2,
        ModSource::Lfo3,
        ModSource::Env1,
        ModSource::Env2,
        ModSource::Env3,
        ModSource::Env4,
        ModSource::Velocity,
        ModSource::Velocity2,
        ModSource::Keyboard,
        ModSource::Keyboard2,
        ModSource::Wheel,
        ModSource::Pedal,
        ModSource::ExtControl,
        ModSource::Pressure,
        ModSource::Off,
    ];
    /// An iterator over all the different elements in `ModSource`
    pub const fn elements() -> &'static [ModSource] {
        &Self::ELEM
    }
    /// Convert a `u8` to a `ModSource`
    pub const fn from_u8(val: u8) -> Option<Self> {
        if val as usize >= Self::numel() {
            None
        } else {
            Some(Self::ELEM[val as usize])
        }
    }
    /// The first value in elements
    pub const fn min() -> Self {
        Self::Lfo1
    }
    /// The last value in elements
    pub const fn max() -> Self {
        Self::Off
    }
    /// The number of different modulation sources
    pub const fn numel() -> usize {
        1 + Self::max() as usize - Self::min() as usize
    }
    /// The label used for this source on the instrument
    pub const fn to_str(&self) -> &'static str {
        match self {
            Self::Lfo1 => "LFO 1",
            Self::Lfo2 => "LFO 2",
            Self::Lfo3 => "LFO 3",
            Self::Env1 => "ENV 1",
            Self::Env2 => "ENV 2",
            Self::Env3 => "ENV 3",
            Self::Env4 => "ENV 4",
            Self::Velocity => "VEL",
            Self::Velocity2 => "VEL 2",
            Self::Keyboard => "KYBD",
            Self::Keyboard2 => "KYBD 2",
            Self::Wheel => "WHEEL",
            Self::Pedal => "PEDAL",
            Self::ExtControl => "XCTRL",
            Self::Pressure => "PRESS",
            Self::Off => "OFF",
        }
    }
}

impl TryFrom<u8> for ModSource {
    type Error = RangeError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(RangeError::OutOfRange {
            value: i16::from(value),
            min: Self::min() as i16,
            max: Self::max() as i16,
        })
    }
}

impl Randomize for ModSource {
    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::ELEM[rng.gen_range(0..Self::numel())];
    }
}

impl Bounded for ModSource {
    fn reset(&mut self) {
        *self = Self::default();
    }
    fn set_to_minimum(&mut self) {
        *self = Self::min();
    }
    fn set_to_maximum(&mut self) {
        *self = Self::max();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_order() {
        for (i, src) in ModSource::elements().iter().enumerate() {
            assert_eq!(*src as usize, i);
            assert_eq!(ModSource::from_u8(i as u8), Some(*src));
        }
        assert_eq!(ModSource::numel(), 16);
        assert_eq!(ModSource::Off as u8, 15);
        assert_eq!(ModSource::from_u8(16), None);
        assert!(ModSource::try_from(16).is_err());
    }
    #[test]
    fn defaults_to_off() {
        let mut src = ModSource::Wheel;
        src.reset();
        assert_eq!(src, ModSource::Off);
        src.set_to_minimum();
        assert_eq!(src, ModSource::Lfo1);
    }
}
