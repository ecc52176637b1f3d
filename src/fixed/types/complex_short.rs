use super::saturate_i16;
use crate::fixed::core::{ActiveBackend, DspBackend, atan2, sin_cos};
use num_complex::Complex;

/// Fixed-point complex number with 16-bit parts.
///
/// The fractional scale (usually Q15) is a contract between producer and
/// consumer; arithmetic here works on the raw integers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct ComplexShort {
    pub re: i16,
    pub im: i16,
}

impl ComplexShort {
    #[inline]
    pub const fn new(re: i16, im: i16) -> Self {
        Self { re, im }
    }

    /// Builds a value from polar coordinates, see [`ComplexShort::set_polar`].
    pub fn from_polar(magnitude: i16, phase: f32) -> Self {
        let mut value = Self::default();
        value.set_polar(magnitude, phase);
        value
    }

    /// Rounded `sqrt(re² + im²)`, saturated at `i16::MAX`.
    ///
    /// Computed by the active backend. With `hw-accel` the result can be one
    /// LSB above the scalar value for odd magnitudes.
    pub fn magnitude(&self) -> i16 {
        let mut out = [0i16];
        ActiveBackend::cmplx_mag(&[self.re, self.im], &mut out);
        out[0]
    }

    /// `re² + im²`, saturated at `i16::MAX`.
    pub fn magnitude_squared(&self) -> i16 {
        let (re, im) = (self.re as i64, self.im as i64);
        saturate_i16(re * re + im * im)
    }

    /// Angle in radians, in `(-π, π]`.
    pub fn phase(&self) -> f32 {
        atan2(self.im as f32, self.re as f32)
    }

    /// Sets the phase, keeping the current magnitude.
    ///
    /// The magnitude is re-read from the value on every call, so a
    /// `set_magnitude` followed by `set_phase` is not the same as one
    /// `set_polar`.
    pub fn set_phase(&mut self, phase: f32) {
        let magnitude = self.magnitude();
        self.set_polar(magnitude, phase);
    }

    /// Sets the magnitude, keeping the current phase.
    pub fn set_magnitude(&mut self, magnitude: i16) {
        let phase = self.phase();
        self.set_polar(magnitude, phase);
    }

    /// `re = m·cos(p) + 0.5`, `im = m·sin(p) + 0.5`, truncated toward zero.
    ///
    /// The products are taken in `f32` and the rounding offset is added in
    /// `f64`. The float to integer conversion saturates at the `i16` range.
    pub fn set_polar(&mut self, magnitude: i16, phase: f32) {
        let (sin, cos) = sin_cos(phase);
        let magnitude = magnitude as f32;
        self.re = ((magnitude * cos) as f64 + 0.5) as i16;
        self.im = ((magnitude * sin) as f64 + 0.5) as i16;
    }

    /// Returns the complex conjugate (a - bi)
    #[inline]
    pub fn conj(self) -> Self {
        Self::new(self.re, self.im.saturating_neg())
    }

    /// Multiplies both parts by an integer factor, saturating.
    #[inline]
    pub fn scale(self, factor: i16) -> Self {
        let factor = factor as i64;
        Self::new(saturate_i16(self.re as i64 * factor), saturate_i16(self.im as i64 * factor))
    }
}

use core::ops::{Add, AddAssign, Mul, Sub, SubAssign};

impl Add for ComplexShort {
    type Output = ComplexShort;

    #[inline]
    fn add(self, rhs: ComplexShort) -> Self::Output {
        ComplexShort::new(self.re.saturating_add(rhs.re), self.im.saturating_add(rhs.im))
    }
}

impl AddAssign for ComplexShort {
    #[inline]
    fn add_assign(&mut self, rhs: ComplexShort) {
        *self = *self + rhs;
    }
}

impl Sub for ComplexShort {
    type Output = ComplexShort;

    #[inline]
    fn sub(self, rhs: ComplexShort) -> Self::Output {
        ComplexShort::new(self.re.saturating_sub(rhs.re), self.im.saturating_sub(rhs.im))
    }
}

impl SubAssign for ComplexShort {
    #[inline]
    fn sub_assign(&mut self, rhs: ComplexShort) {
        *self = *self - rhs;
    }
}

// Straight integer product, no Q15 renormalisation.
impl Mul for ComplexShort {
    type Output = ComplexShort;

    #[inline]
    fn mul(self, rhs: ComplexShort) -> Self::Output {
        let (a, b) = (self.re as i64, self.im as i64);
        let (c, d) = (rhs.re as i64, rhs.im as i64);
        // (ac - bd) + (ad + bc)i
        ComplexShort::new(saturate_i16(a * c - b * d), saturate_i16(a * d + b * c))
    }
}

impl From<Complex<i16>> for ComplexShort {
    fn from(value: Complex<i16>) -> Self {
        Self::new(value.re, value.im)
    }
}

impl From<ComplexShort> for Complex<i16> {
    fn from(value: ComplexShort) -> Self {
        Complex::new(value.re, value.im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_magnitude_and_phase() {
        let c = ComplexShort::new(3, 4);
        assert!((c.magnitude() - 5).abs() <= 1);
        assert!((c.phase() - 0.927_295_2).abs() < 1e-6);

        let c = ComplexShort::new(6, 8);
        assert_eq!(c.magnitude(), 10);
    }

    #[cfg(not(feature = "hw-accel"))]
    #[test]
    fn test_scalar_magnitude_exact() {
        assert_eq!(ComplexShort::new(3, 4).magnitude(), 5);
        assert_eq!(ComplexShort::new(-5, 12).magnitude(), 13);
    }

    #[test]
    fn test_magnitude_saturates() {
        let c = ComplexShort::new(i16::MIN, i16::MIN);
        assert_eq!(c.magnitude(), i16::MAX);
    }

    #[test]
    fn test_phase_principal_value() {
        assert_eq!(ComplexShort::new(0, 0).phase(), 0.0);
        assert_eq!(ComplexShort::new(-1, 0).phase(), PI);
        assert!((ComplexShort::new(0, -7).phase() + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_magnitude_squared() {
        assert_eq!(ComplexShort::new(3, 4).magnitude_squared(), 25);
        assert_eq!(ComplexShort::new(-100, 100).magnitude_squared(), 20000);
        assert_eq!(ComplexShort::new(200, 0).magnitude_squared(), i16::MAX);
    }

    #[test]
    fn test_set_polar_rounding() {
        let mut c = ComplexShort::default();
        c.set_polar(10, 0.0);
        assert_eq!(c, ComplexShort::new(10, 0));

        c.set_polar(10, FRAC_PI_2);
        assert_eq!(c, ComplexShort::new(0, 10));

        // -10 + 0.5 = -9.5 truncates toward zero
        c.set_polar(10, PI);
        assert_eq!(c, ComplexShort::new(-9, 0));
    }

    #[test]
    fn test_set_polar_saturates() {
        let c = ComplexShort::from_polar(i16::MAX, 0.0);
        assert_eq!(c.re, i16::MAX);
        assert_eq!(c.im, 0);
    }

    #[test]
    fn test_set_phase_keeps_value_when_phase_unchanged() {
        for (re, im) in [(6, 8), (12, 16), (10, 24), (16, 30), (24, 32)] {
            let mut c = ComplexShort::new(re, im);
            let phase = c.phase();
            c.set_phase(phase);
            assert_eq!(c, ComplexShort::new(re, im));
        }
    }

    #[test]
    fn test_set_phase_moves_negative_parts_toward_zero() {
        // `+ 0.5` then truncation rounds negative parts up by one, so
        // the identity above only holds in the first quadrant.
        let cases = [((-6, 8), (-5, 8)), ((-6, -8), (-5, -7)), ((6, -8), (6, -7))];
        for ((re, im), expected) in cases {
            let mut c = ComplexShort::new(re, im);
            let phase = c.phase();
            c.set_phase(phase);
            assert_eq!(c, ComplexShort::new(expected.0, expected.1), "from ({}, {})", re, im);
        }
    }

    #[test]
    fn test_polar_round_trip_drifts_in_third_quadrant() {
        let c = ComplexShort::new(-2121, -2121);
        assert_eq!(c.magnitude(), 3000);

        let back = ComplexShort::from_polar(c.magnitude(), c.phase());
        assert_eq!(back, ComplexShort::new(-2120, -2120));
        assert_eq!(back.magnitude(), 2998);
    }

    #[test]
    fn test_set_polar_negative_magnitude() {
        // -3 + 0.5 = -2.5 truncates toward zero
        let mut c = ComplexShort::default();
        c.set_polar(3, 0.0);
        assert_eq!(c, ComplexShort::new(3, 0));
        c.set_polar(-3, 0.0);
        assert_eq!(c, ComplexShort::new(-2, 0));
    }

    #[test]
    fn test_set_magnitude_keeps_phase() {
        let mut c = ComplexShort::new(6, 8);
        c.set_magnitude(20);
        assert_eq!(c, ComplexShort::new(12, 16));
    }

    #[test]
    fn test_polar_round_trip_magnitude() {
        for (re, im) in [(3, 4), (100, 7), (1000, 2000), (30000, 500), (17, 9)] {
            let c = ComplexShort::new(re, im);
            let back = ComplexShort::from_polar(c.magnitude(), c.phase());
            let tolerance = if cfg!(feature = "hw-accel") { 2 } else { 1 };
            assert!((back.magnitude() - c.magnitude()).abs() <= tolerance, "{:?} -> {:?}", c, back);
        }
    }

    #[test]
    fn test_setters_compose_by_reread() {
        // Starting from zero, the order decides which coordinate survives.
        let mut c = ComplexShort::default();
        c.set_phase(FRAC_PI_2);
        c.set_magnitude(8);
        assert_eq!(c, ComplexShort::new(8, 0));

        let mut d = ComplexShort::default();
        d.set_magnitude(8);
        d.set_phase(FRAC_PI_2);
        assert_eq!(d, ComplexShort::new(0, 8));
        assert_eq!(d, ComplexShort::from_polar(8, FRAC_PI_2));
    }

    #[test]
    fn test_arithmetic() {
        let a = ComplexShort::new(1, 2);
        let b = ComplexShort::new(3, 4);
        assert_eq!(a + b, ComplexShort::new(4, 6));
        assert_eq!(a - b, ComplexShort::new(-2, -2));
        // (1 + 2i)(3 + 4i) = -5 + 10i
        assert_eq!(a * b, ComplexShort::new(-5, 10));

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let big = ComplexShort::new(i16::MAX, i16::MIN);
        assert_eq!(big + ComplexShort::new(1, -1), big);
        assert_eq!(big * ComplexShort::new(2, 0), big);
        assert_eq!(ComplexShort::new(300, 0).scale(200), ComplexShort::new(i16::MAX, 0));
        assert_eq!(ComplexShort::new(-3, 4).scale(-2), ComplexShort::new(6, -8));
    }

    #[test]
    fn test_conj() {
        assert_eq!(ComplexShort::new(3, 4).conj(), ComplexShort::new(3, -4));
        assert_eq!(ComplexShort::new(2, -5).conj().conj(), ComplexShort::new(2, -5));
        assert_eq!(ComplexShort::new(0, i16::MIN).conj(), ComplexShort::new(0, i16::MAX));
    }

    #[test]
    fn test_num_complex_interop() {
        let c: ComplexShort = Complex::new(7i16, -3).into();
        assert_eq!(c, ComplexShort::new(7, -3));
        let back: Complex<i16> = c.into();
        assert_eq!(back, Complex::new(7, -3));
    }
}
