use super::ComplexShort;
use core::ops::{Add, AddAssign};
use num_complex::Complex;

/// Fixed-point complex number with 32-bit parts.
///
/// Storage for sums of many [`ComplexShort`] values; it has no polar
/// accessors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct ComplexInt {
    pub re: i32,
    pub im: i32,
}

impl ComplexInt {
    #[inline]
    pub const fn new(re: i32, im: i32) -> Self {
        Self { re, im }
    }

    /// Widens a Q15 value to Q31 (`<< 16` on both parts).
    #[inline]
    pub const fn from_q15(value: ComplexShort) -> Self {
        Self::new((value.re as i32) << 16, (value.im as i32) << 16)
    }

    /// Narrows back to Q15, dropping the low 16 bits.
    #[inline]
    pub const fn to_q15(self) -> ComplexShort {
        ComplexShort::new((self.re >> 16) as i16, (self.im >> 16) as i16)
    }
}

impl Add for ComplexInt {
    type Output = ComplexInt;

    #[inline]
    fn add(self, rhs: ComplexInt) -> Self::Output {
        ComplexInt::new(self.re.saturating_add(rhs.re), self.im.saturating_add(rhs.im))
    }
}

impl AddAssign for ComplexInt {
    #[inline]
    fn add_assign(&mut self, rhs: ComplexInt) {
        *self = *self + rhs;
    }
}

impl From<ComplexShort> for ComplexInt {
    fn from(value: ComplexShort) -> Self {
        Self::from_q15(value)
    }
}

impl From<Complex<i32>> for ComplexInt {
    fn from(value: Complex<i32>) -> Self {
        Self::new(value.re, value.im)
    }
}

impl From<ComplexInt> for Complex<i32> {
    fn from(value: ComplexInt) -> Self {
        Complex::new(value.re, value.im)
    }
}
