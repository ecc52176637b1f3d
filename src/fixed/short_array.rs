use crate::common::{ArrayError, fits, in_range, precondition, same_size};
use super::core::{ActiveBackend, DspBackend};
use super::types::{ComplexShort, saturate_i16};
use core::{fmt, ops, slice};

/// An array of [`ComplexShort`] over storage it does not own.
///
/// This is an unsized view, used as `&ComplexShortArray` or
/// `&mut ComplexShortArray`, much like `str` is to `String`. Views come from
/// caller storage ([`ComplexShortArray::from_slice`]), from a
/// [`ComplexShortBuffer`] through `Deref`, or from
/// [`ComplexShortArray::sub_array`]. None of them can be released: only the
/// owning buffer has [`ComplexShortBuffer::destroy`].
///
/// Operations that write into a `destination` require it to hold at least as
/// many elements as `self`, and a second operand to have exactly as many.
/// These are preconditions: only the `checked` feature validates them.
/// Writing into `self` is done with the `_in_place` forms.
#[repr(transparent)]
pub struct ComplexShortArray {
    data: [ComplexShort],
}

impl ComplexShortArray {
    /// Wraps caller storage.
    #[inline]
    pub fn from_slice(data: &[ComplexShort]) -> &Self {
        // Safety: repr(transparent) over [ComplexShort].
        unsafe { &*(data as *const [ComplexShort] as *const Self) }
    }

    /// Wraps mutable caller storage.
    #[inline]
    pub fn from_mut_slice(data: &mut [ComplexShort]) -> &mut Self {
        // Safety: repr(transparent) over [ComplexShort].
        unsafe { &mut *(data as *mut [ComplexShort] as *mut Self) }
    }

    /// A view of size 0.
    #[inline]
    pub fn empty() -> &'static Self {
        Self::from_slice(&[])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[ComplexShort] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [ComplexShort] {
        &mut self.data
    }

    /// The raw `re, im, re, im, ...` layout the backend primitives work on.
    #[inline]
    pub fn as_interleaved(&self) -> &[i16] {
        // Safety: ComplexShort is repr(C) of two i16, so there is no padding
        // and the alignment is that of i16.
        unsafe { slice::from_raw_parts(self.data.as_ptr() as *const i16, self.data.len() * 2) }
    }

    #[inline]
    pub fn as_interleaved_mut(&mut self) -> &mut [i16] {
        // Safety: see as_interleaved.
        unsafe {
            slice::from_raw_parts_mut(self.data.as_mut_ptr() as *mut i16, self.data.len() * 2)
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, ComplexShort> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, ComplexShort> {
        self.data.iter_mut()
    }

    #[inline]
    pub fn re(&self, i: usize) -> i16 {
        self.data[i].re
    }

    #[inline]
    pub fn im(&self, i: usize) -> i16 {
        self.data[i].im
    }

    /// Magnitude of element `i`.
    pub fn mag(&self, i: usize) -> i16 {
        self.data[i].magnitude()
    }

    /// Squared magnitude of element `i`.
    pub fn mag2(&self, i: usize) -> i16 {
        self.data[i].magnitude_squared()
    }

    // --- Elementwise arithmetic ----------------------------------------------

    /// `destination[i] = self[i] + operand2[i]`, saturating.
    pub fn add(&self, operand2: &ComplexShortArray, destination: &mut ComplexShortArray) {
        self.check_binary("add", operand2.len(), destination.len());
        destination.load(self);
        ActiveBackend::add_assign_q15(destination.as_interleaved_mut(), operand2.as_interleaved());
    }

    /// `self[i] += operand2[i]`, saturating.
    pub fn add_in_place(&mut self, operand2: &ComplexShortArray) {
        precondition("add", same_size(self.len(), operand2.len()));
        ActiveBackend::add_assign_q15(self.as_interleaved_mut(), operand2.as_interleaved());
    }

    /// `destination[i] = self[i] - operand2[i]`, saturating.
    pub fn subtract(&self, operand2: &ComplexShortArray, destination: &mut ComplexShortArray) {
        self.check_binary("subtract", operand2.len(), destination.len());
        destination.load(self);
        ActiveBackend::sub_assign_q15(destination.as_interleaved_mut(), operand2.as_interleaved());
    }

    /// `self[i] -= operand2[i]`, saturating.
    pub fn subtract_in_place(&mut self, operand2: &ComplexShortArray) {
        precondition("subtract", same_size(self.len(), operand2.len()));
        ActiveBackend::sub_assign_q15(self.as_interleaved_mut(), operand2.as_interleaved());
    }

    /// `destination[i] = self[i] * operand2[i]`.
    pub fn complex_by_complex_multiplication(
        &self,
        operand2: &ComplexShortArray,
        destination: &mut ComplexShortArray,
    ) {
        self.check_binary("complex_by_complex_multiplication", operand2.len(), destination.len());
        for ((d, a), b) in destination.data.iter_mut().zip(&self.data).zip(&operand2.data) {
            *d = *a * *b;
        }
    }

    pub fn complex_by_complex_multiplication_in_place(&mut self, operand2: &ComplexShortArray) {
        precondition("complex_by_complex_multiplication", same_size(self.len(), operand2.len()));
        for (a, b) in self.data.iter_mut().zip(&operand2.data) {
            *a = *a * *b;
        }
    }

    /// Multiplies both parts of `self[i]` by the real value `operand2[i]`.
    pub fn complex_by_real_multiplication(
        &self,
        operand2: &[i16],
        destination: &mut ComplexShortArray,
    ) {
        self.check_binary("complex_by_real_multiplication", operand2.len(), destination.len());
        for ((d, a), r) in destination.data.iter_mut().zip(&self.data).zip(operand2) {
            *d = a.scale(*r);
        }
    }

    pub fn complex_by_real_multiplication_in_place(&mut self, operand2: &[i16]) {
        precondition("complex_by_real_multiplication", same_size(self.len(), operand2.len()));
        for (a, r) in self.data.iter_mut().zip(operand2) {
            *a = a.scale(*r);
        }
    }

    /// `Σ self[i] * operand2[i]`, without conjugation.
    ///
    /// The sum is accumulated in 64 bits and saturated to 16 bits once, at the
    /// end, so intermediate overflow cannot wrap.
    pub fn complex_dot_product(&self, operand2: &ComplexShortArray) -> ComplexShort {
        precondition("complex_dot_product", same_size(self.len(), operand2.len()));
        let (mut re, mut im) = (0i64, 0i64);
        for (x, y) in self.data.iter().zip(&operand2.data) {
            let (a, b) = (x.re as i64, x.im as i64);
            let (c, d) = (y.re as i64, y.im as i64);
            re += a * c - b * d;
            im += a * d + b * c;
        }
        ComplexShort::new(saturate_i16(re), saturate_i16(im))
    }

    /// `destination[i] = conj(self[i])`
    pub fn get_complex_conjugate_values(&self, destination: &mut ComplexShortArray) {
        precondition("get_complex_conjugate_values", fits(self.len(), destination.len()));
        for (d, s) in destination.data.iter_mut().zip(&self.data) {
            *d = s.conj();
        }
    }

    pub fn conjugate_in_place(&mut self) {
        for v in &mut self.data {
            *v = v.conj();
        }
    }

    /// Multiplies every element by `factor`, in place, saturating.
    pub fn scale(&mut self, factor: i16) {
        for v in &mut self.data {
            *v = v.scale(factor);
        }
    }

    // --- Projections to real arrays --------------------------------------------

    pub fn get_magnitude_values(&self, destination: &mut [i16]) {
        precondition("get_magnitude_values", fits(self.len(), destination.len()));
        ActiveBackend::cmplx_mag(self.as_interleaved(), destination);
    }

    pub fn get_magnitude_squared_values(&self, destination: &mut [i16]) {
        precondition("get_magnitude_squared_values", fits(self.len(), destination.len()));
        for (d, s) in destination.iter_mut().zip(&self.data) {
            *d = s.magnitude_squared();
        }
    }

    pub fn get_real_values(&self, destination: &mut [i16]) {
        precondition("get_real_values", fits(self.len(), destination.len()));
        for (d, s) in destination.iter_mut().zip(&self.data) {
            *d = s.re;
        }
    }

    pub fn get_imaginary_values(&self, destination: &mut [i16]) {
        precondition("get_imaginary_values", fits(self.len(), destination.len()));
        for (d, s) in destination.iter_mut().zip(&self.data) {
            *d = s.im;
        }
    }

    // --- Polar bulk operations -------------------------------------------------

    /// `self[i] = polar(magnitude[i], phase[i])` over the whole array.
    pub fn set_polar(&mut self, magnitude: &[i16], phase: &[f32]) {
        self.set_polar_range(magnitude, phase, 0, self.len());
    }

    /// [`ComplexShortArray::set_polar`] restricted to `[offset, offset + count)`.
    pub fn set_polar_range(
        &mut self,
        magnitude: &[i16],
        phase: &[f32],
        offset: usize,
        count: usize,
    ) {
        self.check_window("set_polar", offset, count);
        precondition("set_polar", fits(offset + count, magnitude.len()));
        precondition("set_polar", fits(offset + count, phase.len()));
        for i in offset..offset + count {
            self.data[i].set_polar(magnitude[i], phase[i]);
        }
    }

    /// Sets the phase of every element, keeping its magnitude.
    pub fn set_phase(&mut self, phase: &[f32]) {
        self.set_phase_range(phase, 0, self.len());
    }

    pub fn set_phase_range(&mut self, phase: &[f32], offset: usize, count: usize) {
        self.check_window("set_phase", offset, count);
        precondition("set_phase", fits(offset + count, phase.len()));
        for i in offset..offset + count {
            self.data[i].set_phase(phase[i]);
        }
    }

    /// `destination[i] = polar(self[i].magnitude(), phase[i])`
    pub fn set_phase_into(&self, phase: &[f32], destination: &mut ComplexShortArray) {
        self.set_phase_range_into(phase, 0, self.len(), destination);
    }

    /// [`ComplexShortArray::set_phase_into`] restricted to
    /// `[offset, offset + count)`. Elements of `destination` outside the
    /// window are left alone.
    pub fn set_phase_range_into(
        &self,
        phase: &[f32],
        offset: usize,
        count: usize,
        destination: &mut ComplexShortArray,
    ) {
        self.check_window("set_phase", offset, count);
        precondition("set_phase", fits(offset + count, phase.len()));
        precondition("set_phase", fits(offset + count, destination.len()));
        for i in offset..offset + count {
            let magnitude = self.data[i].magnitude();
            destination.data[i].set_polar(magnitude, phase[i]);
        }
    }

    /// Sets the magnitude of every element, keeping its phase.
    pub fn set_magnitude(&mut self, magnitude: &[i16]) {
        self.set_magnitude_range(magnitude, 0, self.len());
    }

    pub fn set_magnitude_range(&mut self, magnitude: &[i16], offset: usize, count: usize) {
        self.check_window("set_magnitude", offset, count);
        precondition("set_magnitude", fits(offset + count, magnitude.len()));
        for i in offset..offset + count {
            self.data[i].set_magnitude(magnitude[i]);
        }
    }

    /// `destination[i] = polar(magnitude[i], self[i].phase())`
    pub fn set_magnitude_into(&self, magnitude: &[i16], destination: &mut ComplexShortArray) {
        self.set_magnitude_range_into(magnitude, 0, self.len(), destination);
    }

    pub fn set_magnitude_range_into(
        &self,
        magnitude: &[i16],
        offset: usize,
        count: usize,
        destination: &mut ComplexShortArray,
    ) {
        self.check_window("set_magnitude", offset, count);
        precondition("set_magnitude", fits(offset + count, magnitude.len()));
        precondition("set_magnitude", fits(offset + count, destination.len()));
        for i in offset..offset + count {
            let phase = self.data[i].phase();
            destination.data[i].set_polar(magnitude[i], phase);
        }
    }

    // --- Reductions --------------------------------------------------------------

    /// Largest element magnitude, 0 for an empty array.
    pub fn get_max_magnitude_value(&self) -> i16 {
        self.max_magnitude().1
    }

    /// Index of the first element with the largest magnitude, 0 for an empty
    /// array.
    pub fn get_max_magnitude_index(&self) -> usize {
        self.max_magnitude().0
    }

    fn max_magnitude(&self) -> (usize, i16) {
        let mut best = (0, 0);
        for (i, v) in self.data.iter().enumerate() {
            let m = v.magnitude();
            // strict: earlier index wins ties
            if m > best.1 {
                best = (i, m);
            }
        }
        best
    }

    // --- Views -------------------------------------------------------------------

    /// The elements `[offset, offset + length)`, sharing storage with `self`.
    pub fn sub_array(&self, offset: usize, length: usize) -> &ComplexShortArray {
        self.check_window("sub_array", offset, length);
        Self::from_slice(&self.data[offset..offset + length])
    }

    /// Mutable [`ComplexShortArray::sub_array`]. Writes land in the parent.
    pub fn sub_array_mut(&mut self, offset: usize, length: usize) -> &mut ComplexShortArray {
        self.check_window("sub_array", offset, length);
        Self::from_mut_slice(&mut self.data[offset..offset + length])
    }

    /// Like [`ComplexShortArray::sub_array`], reporting a bad range instead of
    /// panicking.
    pub fn try_sub_array(
        &self,
        offset: usize,
        length: usize,
    ) -> Result<&ComplexShortArray, ArrayError> {
        match in_range(offset, length, self.len()) {
            Some(err) => Err(err),
            None => Ok(Self::from_slice(&self.data[offset..offset + length])),
        }
    }

    // --- Comparison and copies ---------------------------------------------------

    /// Same size and bit-identical parts.
    pub fn equals(&self, other: &ComplexShortArray) -> bool {
        self.data == other.data
    }

    /// Loads `re, im, re, im, ...` from a real array twice as long as `self`.
    pub fn copy_from_interleaved(&mut self, source: &[i16]) {
        precondition("copy_from_interleaved", same_size(self.len() * 2, source.len()));
        for (d, s) in self.as_interleaved_mut().iter_mut().zip(source) {
            *d = *s;
        }
    }

    /// Stores `re, im, re, im, ...` into a real array twice as long as `self`.
    pub fn copy_to_interleaved(&self, destination: &mut [i16]) {
        precondition("copy_to_interleaved", same_size(self.len() * 2, destination.len()));
        for (d, s) in destination.iter_mut().zip(self.as_interleaved()) {
            *d = *s;
        }
    }

    pub fn copy_from(&mut self, source: &ComplexShortArray) {
        precondition("copy_from", same_size(self.len(), source.len()));
        self.load(source);
    }

    pub fn copy_to(&self, destination: &mut ComplexShortArray) {
        precondition("copy_to", fits(self.len(), destination.len()));
        destination.load(self);
    }

    /// Copies `source.len()` elements into the start of the array.
    pub fn copy_from_slice(&mut self, source: &[ComplexShort]) {
        precondition("copy_from_slice", fits(source.len(), self.len()));
        for (d, s) in self.data.iter_mut().zip(source) {
            *d = *s;
        }
    }

    /// Copies the first `destination.len()` elements out of the array.
    pub fn copy_to_slice(&self, destination: &mut [ComplexShort]) {
        precondition("copy_to_slice", fits(destination.len(), self.len()));
        for (d, s) in destination.iter_mut().zip(&self.data) {
            *d = *s;
        }
    }

    // --- Fill --------------------------------------------------------------------

    pub fn set_all(&mut self, value: ComplexShort) {
        self.data.fill(value);
    }

    /// Sets both parts of every element to `value`.
    pub fn set_all_value(&mut self, value: i16) {
        self.set_all(ComplexShort::new(value, value));
    }

    pub fn set_all_parts(&mut self, re: i16, im: i16) {
        self.set_all(ComplexShort::new(re, im));
    }

    pub fn clear(&mut self) {
        self.set_all_value(0);
    }

    // --- helpers -----------------------------------------------------------------

    /// Copies the overlapping prefix of `source` into `self`.
    #[inline]
    fn load(&mut self, source: &ComplexShortArray) {
        let n = self.len().min(source.len());
        self.data[..n].copy_from_slice(&source.data[..n]);
    }

    #[inline]
    fn check_binary(&self, op: &'static str, operand2: usize, destination: usize) {
        precondition(op, same_size(self.len(), operand2));
        precondition(op, fits(self.len(), destination));
    }

    #[inline]
    fn check_window(&self, op: &'static str, offset: usize, count: usize) {
        precondition(op, in_range(offset, count, self.len()));
    }
}

impl ops::Index<usize> for ComplexShortArray {
    type Output = ComplexShort;

    #[inline]
    fn index(&self, index: usize) -> &ComplexShort {
        &self.data[index]
    }
}

impl ops::IndexMut<usize> for ComplexShortArray {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut ComplexShort {
        &mut self.data[index]
    }
}

impl PartialEq for ComplexShortArray {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for ComplexShortArray {}

impl fmt::Debug for ComplexShortArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a ComplexShortArray {
    type Item = &'a ComplexShort;
    type IntoIter = slice::Iter<'a, ComplexShort>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(feature = "alloc")]
pub use self::buffer::ComplexShortBuffer;

#[cfg(feature = "alloc")]
mod buffer {
    use super::ComplexShortArray;
    use crate::fixed::types::ComplexShort;
    use alloc::{boxed::Box, vec, vec::Vec};
    use core::{fmt, ops};

    /// Owning counterpart of [`ComplexShortArray`].
    ///
    /// Dereferences to the array view, so every array operation is available
    /// on it. [`ComplexShortBuffer::destroy`] consumes the buffer, which makes
    /// a second release or a use after release a compile error.
    #[derive(Clone, PartialEq, Eq)]
    pub struct ComplexShortBuffer {
        data: Box<[ComplexShort]>,
    }

    impl ComplexShortBuffer {
        /// Allocates `size` zeroed elements.
        pub fn create(size: usize) -> Self {
            log::trace!("allocating ComplexShortBuffer of {} elements", size);
            Self { data: vec![ComplexShort::default(); size].into_boxed_slice() }
        }

        /// Releases the storage.
        pub fn destroy(self) {
            log::trace!("releasing ComplexShortBuffer of {} elements", self.data.len());
            drop(self);
        }

        pub fn into_vec(self) -> Vec<ComplexShort> {
            self.data.into_vec()
        }
    }

    impl From<Vec<ComplexShort>> for ComplexShortBuffer {
        fn from(data: Vec<ComplexShort>) -> Self {
            Self { data: data.into_boxed_slice() }
        }
    }

    impl From<&[ComplexShort]> for ComplexShortBuffer {
        fn from(data: &[ComplexShort]) -> Self {
            Self { data: data.into() }
        }
    }

    impl ops::Deref for ComplexShortBuffer {
        type Target = ComplexShortArray;

        #[inline]
        fn deref(&self) -> &ComplexShortArray {
            ComplexShortArray::from_slice(&self.data)
        }
    }

    impl ops::DerefMut for ComplexShortBuffer {
        #[inline]
        fn deref_mut(&mut self) -> &mut ComplexShortArray {
            ComplexShortArray::from_mut_slice(&mut self.data)
        }
    }

    impl fmt::Debug for ComplexShortBuffer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            fmt::Debug::fmt(&**self, f)
        }
    }
}

#[cfg(test)]
#[path = "short_array_tests.rs"]
mod tests;
