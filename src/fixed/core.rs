// src/fixed/core.rs

// In no_std we take the float math from libm.
// With the "std" feature the inherent f32/f64 methods are used instead.

/// Number of complex pairs processed per iteration by [`VectorBackend`].
pub const LANES: usize = 4;

/// Block primitives over raw fixed-point data.
///
/// Every primitive takes interleaved `re, im, re, im, ...` slices, the way the
/// DSP block functions take a `(src, dst, count)` triple. Lengths are the
/// caller's business: the primitives process `min(src.len(), dst.len())`
/// values and never look past either slice.
///
/// Implementations must agree with each other. The only tolerated difference
/// is the one LSB the vector magnitude loses to its half-scale output.
pub trait DspBackend {
    /// Identifier used in logs and test messages.
    const NAME: &'static str;

    /// Magnitude of each `(re, im)` pair of `src`, one value per pair in `dst`.
    /// Results are rounded and saturate at `i16::MAX`.
    fn cmplx_mag(src: &[i16], dst: &mut [i16]);

    /// `dst[i] = sat(dst[i] + src[i])`
    fn add_assign_q15(dst: &mut [i16], src: &[i16]);

    /// `dst[i] = sat(dst[i] - src[i])`
    fn sub_assign_q15(dst: &mut [i16], src: &[i16]);

    /// `dst[i] = sat(dst[i] + src[i])` on 32-bit data.
    fn add_assign_q31(dst: &mut [i32], src: &[i32]);

    /// Widens Q15 to Q31 (`<< 16`).
    fn q15_to_q31(src: &[i16], dst: &mut [i32]);

    /// Narrows Q31 to Q15 (`>> 16`, dropping the low half).
    fn q31_to_q15(src: &[i32], dst: &mut [i16]);
}

/// Portable per-element loops.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarBackend;

/// Lane-blocked implementation modelled on the DSP vector primitives.
///
/// The magnitude primitive returns its result at half scale (2.14 for 1.15
/// inputs), so [`DspBackend::cmplx_mag`] applies a saturating corrective
/// shift before handing values back.
#[derive(Clone, Copy, Debug, Default)]
pub struct VectorBackend;

/// The backend the array types dispatch to.
#[cfg(feature = "hw-accel")]
pub type ActiveBackend = VectorBackend;

/// The backend the array types dispatch to.
#[cfg(not(feature = "hw-accel"))]
pub type ActiveBackend = ScalarBackend;

// --- Float helpers -----------------------------------------------------------

pub(crate) fn sin_cos(angle: f32) -> (f32, f32) {
    #[cfg(feature = "std")]
    return (angle.sin(), angle.cos());

    #[cfg(not(feature = "std"))]
    return (libm::sinf(angle), libm::cosf(angle));
}

pub(crate) fn atan2(y: f32, x: f32) -> f32 {
    #[cfg(feature = "std")]
    return y.atan2(x);

    #[cfg(not(feature = "std"))]
    return libm::atan2f(y, x);
}

fn sqrt(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.sqrt();

    #[cfg(not(feature = "std"))]
    return libm::sqrt(x);
}

#[inline]
fn sum_of_squares(re: i16, im: i16) -> u64 {
    let (re, im) = (re as i64, im as i64);
    (re * re + im * im) as u64
}

#[inline]
fn sat_q15(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

#[inline]
fn sat_q31(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

// --- Scalar path -------------------------------------------------------------

impl DspBackend for ScalarBackend {
    const NAME: &'static str = "scalar";

    fn cmplx_mag(src: &[i16], dst: &mut [i16]) {
        for (pair, out) in src.chunks_exact(2).zip(dst.iter_mut()) {
            let mag = sqrt(sum_of_squares(pair[0], pair[1]) as f64) + 0.5;
            *out = if mag >= i16::MAX as f64 { i16::MAX } else { mag as i16 };
        }
    }

    fn add_assign_q15(dst: &mut [i16], src: &[i16]) {
        for (d, s) in dst.iter_mut().zip(src) {
            *d = d.saturating_add(*s);
        }
    }

    fn sub_assign_q15(dst: &mut [i16], src: &[i16]) {
        for (d, s) in dst.iter_mut().zip(src) {
            *d = d.saturating_sub(*s);
        }
    }

    fn add_assign_q31(dst: &mut [i32], src: &[i32]) {
        for (d, s) in dst.iter_mut().zip(src) {
            *d = d.saturating_add(*s);
        }
    }

    fn q15_to_q31(src: &[i16], dst: &mut [i32]) {
        for (s, d) in src.iter().zip(dst.iter_mut()) {
            *d = (*s as i32) << 16;
        }
    }

    fn q31_to_q15(src: &[i32], dst: &mut [i16]) {
        for (s, d) in src.iter().zip(dst.iter_mut()) {
            *d = (*s >> 16) as i16;
        }
    }
}

// --- Vector path -------------------------------------------------------------

/// Magnitude primitive with the DSP library's output format: the rounded
/// magnitude of each pair, halved (2.14 relative to 1.15 inputs).
pub(crate) fn cmplx_mag_q15(src: &[i16], dst: &mut [i16]) {
    for (pair, out) in src.chunks_exact(2).zip(dst.iter_mut()) {
        let sum = sum_of_squares(pair[0], pair[1]);
        let mut root = sum.isqrt();
        // round to nearest: sqrt(sum) >= root + 0.5  <=>  sum > root^2 + root
        if sum - root * root > root {
            root += 1;
        }
        *out = ((root + 1) >> 1) as i16;
    }
}

/// Applies `op` lane block by lane block, then over the tail.
#[inline]
fn zip_lanes<D, S>(dst: &mut [D], src: &[S], op: impl Fn(&mut D, &S)) {
    let n = dst.len().min(src.len());
    let (dst, src) = (&mut dst[..n], &src[..n]);
    let width = LANES * 2;

    let mut dst_blocks = dst.chunks_exact_mut(width);
    let mut src_blocks = src.chunks_exact(width);
    for (d, s) in (&mut dst_blocks).zip(&mut src_blocks) {
        for lane in 0..width {
            op(&mut d[lane], &s[lane]);
        }
    }
    for (d, s) in dst_blocks.into_remainder().iter_mut().zip(src_blocks.remainder()) {
        op(d, s);
    }
}

impl DspBackend for VectorBackend {
    const NAME: &'static str = "vector";

    fn cmplx_mag(src: &[i16], dst: &mut [i16]) {
        cmplx_mag_q15(src, dst);
        let n = dst.len().min(src.len() / 2);
        // back from 2.14 to the element scale
        for out in &mut dst[..n] {
            *out = out.saturating_mul(2);
        }
    }

    fn add_assign_q15(dst: &mut [i16], src: &[i16]) {
        zip_lanes(dst, src, |d, s| *d = sat_q15(*d as i32 + *s as i32));
    }

    fn sub_assign_q15(dst: &mut [i16], src: &[i16]) {
        zip_lanes(dst, src, |d, s| *d = sat_q15(*d as i32 - *s as i32));
    }

    fn add_assign_q31(dst: &mut [i32], src: &[i32]) {
        zip_lanes(dst, src, |d, s| *d = sat_q31(*d as i64 + *s as i64));
    }

    fn q15_to_q31(src: &[i16], dst: &mut [i32]) {
        zip_lanes(dst, src, |d, s| *d = (*s as i32) << 16);
    }

    fn q31_to_q15(src: &[i32], dst: &mut [i16]) {
        zip_lanes(dst, src, |d, s| *d = (*s >> 16) as i16);
    }
}

#[cfg(test)]
#[path = "core_tests.rs"]
mod tests;
