//! Range checked parameter values and the traits shared by everything that
//! lives inside a patch.
//!
//! A [Parameter] is an integer with an inclusive range and a default.
//! Assignments outside of the range are rejected with a [RangeError], never
//! clamped.  The fields of a patch use [Ranged] and [ModAmount], which carry
//! their range in the type so it can not be swapped out at runtime.  The enumerated domains ([crate::ModSource], [crate::LfoWave],
//! [crate::Waveform]) and `bool` flags implement the same [Bounded]
//! operations so a section can treat all of its fields alike.

use core::fmt;
use rand::Rng;

use crate::error::RangeError;
use crate::sign;

/// Anything that can be set to a uniformly random value within its domain.
///
/// Sections and the patch implement this by walking their fields explicitly.
pub trait Randomize {
    /// Replace the current value(s) with random ones drawn from `rng`
    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R);
}

impl<T: Randomize, const N: usize> Randomize for [T; N] {
    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for item in self.iter_mut() {
            item.randomize(rng);
        }
    }
}

/// The operations every single patch value supports
pub trait Bounded: Randomize {
    /// Return to the default value
    fn reset(&mut self);
    /// Set the lowest value in the domain
    fn set_to_minimum(&mut self);
    /// Set the highest value in the domain
    fn set_to_maximum(&mut self);
}

/// An integer parameter with an inclusive range and a default.
///
/// Two parameters compare equal when their current values are equal,
/// regardless of their ranges.
#[derive(Clone, Copy, Debug)]
pub struct Parameter {
    min: i16,
    max: i16,
    default: i16,
    value: i16,
}

impl Parameter {
    /// Create a new parameter.  If `default` is `None` the minimum is used.
    ///
    /// Fails if `min > max` or if the default does not lie in `min..=max`.
    pub fn new(min: i16, max: i16, default: Option<i16>) -> Result<Self, RangeError> {
        if min > max {
            return Err(RangeError::Inverted { min, max });
        }
        let default = default.unwrap_or(min);
        if default < min || default > max {
            return Err(RangeError::OutOfRange {
                value: default,
                min,
                max,
            });
        }
        Ok(Self {
            min,
            max,
            default,
            value: default,
        })
    }
    /// Constructor for the fixed field layouts, used from `const` contexts
    /// so a bad range fails the build.
    pub(crate) const fn with_default(min: i16, max: i16, default: i16) -> Self {
        assert!(min <= default && default <= max);
        Self {
            min,
            max,
            default,
            value: default,
        }
    }
    /// Inclusive lower bound
    pub const fn min(&self) -> i16 {
        self.min
    }
    /// Inclusive upper bound
    pub const fn max(&self) -> i16 {
        self.max
    }
    /// The value restored by [Bounded::reset]
    pub const fn default_value(&self) -> i16 {
        self.default
    }
    /// The current value
    pub const fn value(&self) -> i16 {
        self.value
    }
    /// True if `value` may be assigned to this parameter
    pub const fn contains(&self, value: i16) -> bool {
        self.min <= value && value <= self.max
    }
    /// Assign a new value.  On failure the current value is left unchanged.
    pub fn set(&mut self, value: i16) -> Result<(), RangeError> {
        if !self.contains(value) {
            return Err(RangeError::OutOfRange {
                value,
                min: self.min,
                max: self.max,
            });
        }
        self.value = value;
        Ok(())
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Parameter {}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Randomize for Parameter {
    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.value = rng.gen_range(self.min..=self.max);
    }
}

impl Bounded for Parameter {
    fn reset(&mut self) {
        self.value = self.default;
    }
    fn set_to_minimum(&mut self) {
        self.value = self.min;
    }
    fn set_to_maximum(&mut self) {
        self.value = self.max;
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Parameter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i16(self.value)
    }
}

/// An unsigned patch field with the range `0..=MAX`, defaulting to `DEFAULT`.
///
/// The range is part of the type, so a field always packs into the bits
/// its layout reserves for it.  `MAX` must fit in seven bits.
///
/// A field can not be replaced by a value with a different range:
///
/// ```compile_fail
/// let mut osc = esq1::Oscillator::default();
/// osc.fine_tune = esq1::Parameter::new(0, 63, Some(40))?;
/// # Ok::<(), esq1::Error>(())
/// ```
///
/// ```compile_fail
/// let mut osc = esq1::Oscillator::default();
/// osc.fine_tune = esq1::Ranged::<63>::new();
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Ranged<const MAX: u8, const DEFAULT: u8 = 0>(Parameter);

impl<const MAX: u8, const DEFAULT: u8> Ranged<MAX, DEFAULT> {
    const CHECKED: () = assert!(DEFAULT <= MAX && MAX <= 0x7F);

    /// A field holding its default value
    pub const fn new() -> Self {
        let () = Self::CHECKED;
        Self(Parameter::with_default(0, MAX as i16, DEFAULT as i16))
    }
    /// Inclusive upper bound (the lower bound is always 0)
    pub const fn max(&self) -> i16 {
        MAX as i16
    }
    /// The value restored by [Bounded::reset]
    pub const fn default_value(&self) -> i16 {
        DEFAULT as i16
    }
    /// The current value
    pub const fn value(&self) -> i16 {
        self.0.value()
    }
    /// Assign a value in `0..=MAX`
    pub fn set(&mut self, value: i16) -> Result<(), RangeError> {
        self.0.set(value)
    }
    /// The underlying range checked parameter
    pub const fn as_parameter(&self) -> &Parameter {
        &self.0
    }
    /// The current value as a raw byte, at most seven bits wide
    pub(crate) const fn wire(&self) -> u8 {
        self.0.value() as u8
    }
    /// Assign a raw byte extracted from the packed layout
    pub(crate) fn set_wire(&mut self, byte: u8) -> Result<(), RangeError> {
        self.0.set(i16::from(byte))
    }
}

impl<const MAX: u8, const DEFAULT: u8> Default for Ranged<MAX, DEFAULT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MAX: u8, const DEFAULT: u8> fmt::Display for Ranged<MAX, DEFAULT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<const MAX: u8, const DEFAULT: u8> Randomize for Ranged<MAX, DEFAULT> {
    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.0.randomize(rng)
    }
}

impl<const MAX: u8, const DEFAULT: u8> Bounded for Ranged<MAX, DEFAULT> {
    fn reset(&mut self) {
        self.0.reset()
    }
    fn set_to_minimum(&mut self) {
        self.0.set_to_minimum()
    }
    fn set_to_maximum(&mut self) {
        self.0.set_to_maximum()
    }
}

const MOD_AMOUNT: Parameter = Parameter::with_default(sign::DISPLAY_MIN, sign::DISPLAY_MAX, 0);

/// A signed modulation amount, `-63..=63` as shown on the display, default 0.
///
/// On the wire it is folded into seven bits by [sign::display_to_wire].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ModAmount(Parameter);

impl ModAmount {
    /// A zero modulation amount
    pub const fn new() -> Self {
        Self(MOD_AMOUNT)
    }
    /// The current (display) value
    pub const fn value(&self) -> i16 {
        self.0.value()
    }
    /// Assign a display value in `-63..=63`
    pub fn set(&mut self, value: i16) -> Result<(), RangeError> {
        self.0.set(value)
    }
    /// The underlying range checked parameter
    pub const fn as_parameter(&self) -> &Parameter {
        &self.0
    }
    /// Seven bit wire representation of the current value
    pub(crate) const fn to_wire(self) -> u8 {
        // the range is fixed at -63..=63, so the fold is always valid
        sign::fold(self.0.value())
    }
    /// Assign from a seven bit wire value, rejecting the reserved code
    pub(crate) fn set_wire(&mut self, wire: u8) -> Result<(), crate::Error> {
        let value = sign::wire_to_display(wire)?;
        self.0.set(value)?;
        Ok(())
    }
}

impl Default for ModAmount {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ModAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Randomize for ModAmount {
    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.0.randomize(rng)
    }
}

impl Bounded for ModAmount {
    fn reset(&mut self) {
        self.0.reset()
    }
    fn set_to_minimum(&mut self) {
        self.0.set_to_minimum()
    }
    fn set_to_maximum(&mut self) {
        self.0.set_to_maximum()
    }
}

impl Randomize for bool {
    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = rng.gen();
    }
}

/// Flags default to off
impl Bounded for bool {
    fn reset(&mut self) {
        *self = false;
    }
    fn set_to_minimum(&mut self) {
        *self = false;
    }
    fn set_to_maximum(&mut self) {
        *self = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn bounds() {
        let param = Parameter::new(3, 7, None).unwrap();
        assert_eq!(param.min(), 3);
        let param = Parameter::new(1, 153, None).unwrap();
        assert_eq!(param.max(), 153);
    }
    #[test]
    fn default_falls_back_to_minimum() {
        let param = Parameter::new(6, 43, None).unwrap();
        assert_eq!(param.default_value(), 6);
        assert_eq!(param.value(), 6);

        let param = Parameter::new(6, 43, Some(32)).unwrap();
        assert_eq!(param.default_value(), 32);
        assert_eq!(param.value(), 32);
    }
    #[test]
    fn construction_errors() {
        assert_eq!(
            Parameter::new(4, 3, None).unwrap_err(),
            RangeError::Inverted { min: 4, max: 3 }
        );
        assert_eq!(
            Parameter::new(0, 10, Some(11)).unwrap_err(),
            RangeError::OutOfRange {
                value: 11,
                min: 0,
                max: 10
            }
        );
        assert!(Parameter::new(5, 5, None).is_ok());
    }
    #[test]
    fn assignment_is_range_checked() {
        let mut param = Parameter::new(5, 10, Some(7)).unwrap();
        for value in 5..=10 {
            param.set(value).unwrap();
            assert_eq!(param.value(), value);
        }
        param.set(8).unwrap();
        assert!(param.set(4).is_err());
        assert!(param.set(11).is_err());
        assert_eq!(param.value(), 8);
    }
    #[test]
    fn boundary_setters_and_reset() {
        let mut param = Parameter::new(-2, 9, Some(4)).unwrap();
        param.set_to_minimum();
        assert_eq!(param.value(), -2);
        param.set_to_maximum();
        assert_eq!(param.value(), 9);
        param.reset();
        assert_eq!(param.value(), 4);
    }
    #[test]
    fn randomize_stays_in_range() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let mut param = Parameter::new(-3, 3, None).unwrap();
        let mut seen = [false; 7];
        for _ in 0..500 {
            param.randomize(&mut rng);
            assert!(param.contains(param.value()));
            seen[(param.value() + 3) as usize] = true;
        }
        assert!(seen.iter().all(|x| *x));
    }
    #[test]
    fn equality_ignores_range() {
        let a = Parameter::new(0, 10, Some(5)).unwrap();
        let b = Parameter::new(-20, 20, Some(5)).unwrap();
        assert_eq!(a, b);
    }
    #[test]
    fn ranged_field() {
        let mut field = Ranged::<31>::new();
        assert_eq!(field.max(), 31);
        assert_eq!(field.value(), 0);
        assert!(field.set(40).is_err());
        assert!(field.set(-1).is_err());
        field.set_to_maximum();
        assert_eq!(field.wire(), 31);
        assert!(field.set_wire(32).is_err());
        assert_eq!(field.value(), 31);

        let mut pan = Ranged::<15, 8>::default();
        assert_eq!(pan.value(), 8);
        pan.set_to_minimum();
        pan.reset();
        assert_eq!(pan.value(), 8);
    }
    #[test]
    fn ranged_randomize_stays_in_seven_bits() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut field = Ranged::<127>::new();
        for _ in 0..200 {
            field.randomize(&mut rng);
            assert!(field.wire() <= 0x7F);
        }
    }
    #[test]
    fn mod_amount() {
        let mut amount = ModAmount::new();
        assert_eq!(amount.value(), 0);
        amount.set(-63).unwrap();
        assert_eq!(amount.to_wire(), 65);
        assert!(amount.set(64).is_err());
        assert!(amount.set(-64).is_err());
        amount.set_to_maximum();
        assert_eq!(amount.to_wire(), 63);
        assert!(matches!(
            amount.set_wire(64),
            Err(crate::Error::InvalidCode(64))
        ));
        amount.set_wire(127).unwrap();
        assert_eq!(amount.value(), -1);
    }
    #[test]
    fn flags() {
        let mut flag = true;
        flag.reset();
        assert!(!flag);
        flag.set_to_maximum();
        assert!(flag);
        flag.set_to_minimum();
        assert!(!flag);
    }
}
