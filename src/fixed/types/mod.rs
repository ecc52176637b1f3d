mod complex_int;
mod complex_short;

pub use complex_int::ComplexInt;
pub use complex_short::ComplexShort;

/// Clamps a wide intermediate into the 16-bit part range.
#[inline]
pub(crate) fn saturate_i16(value: i64) -> i16 {
    value.clamp(i16::MIN as i64, i16::MAX as i64) as i16
}
