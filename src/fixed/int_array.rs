use crate::common::{fits, precondition, same_size};
use super::core::{ActiveBackend, DspBackend};
use super::short_array::ComplexShortArray;
use super::types::ComplexInt;
use core::{fmt, ops, slice};

/// An array of [`ComplexInt`], the wide companion of [`ComplexShortArray`].
///
/// Used to host sums that would overflow 16 bits. It has no polar
/// operations. Views and ownership work as for `ComplexShortArray`.
#[repr(transparent)]
pub struct ComplexIntArray {
    data: [ComplexInt],
}

impl ComplexIntArray {
    #[inline]
    pub fn from_slice(data: &[ComplexInt]) -> &Self {
        // Safety: repr(transparent) over [ComplexInt].
        unsafe { &*(data as *const [ComplexInt] as *const Self) }
    }

    #[inline]
    pub fn from_mut_slice(data: &mut [ComplexInt]) -> &mut Self {
        // Safety: repr(transparent) over [ComplexInt].
        unsafe { &mut *(data as *mut [ComplexInt] as *mut Self) }
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
    pub fn as_slice(&self) -> &[ComplexInt] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [ComplexInt] {
        &mut self.data
    }

    #[inline]
    pub fn as_interleaved(&self) -> &[i32] {
        // Safety: ComplexInt is repr(C) of two i32.
        unsafe { slice::from_raw_parts(self.data.as_ptr() as *const i32, self.data.len() * 2) }
    }

    #[inline]
    pub fn as_interleaved_mut(&mut self) -> &mut [i32] {
        // Safety: ComplexInt is repr(C) of two i32.
        unsafe {
            slice::from_raw_parts_mut(self.data.as_mut_ptr() as *mut i32, self.data.len() * 2)
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, ComplexInt> {
        self.data.iter()
    }

    /// `destination[i] = self[i] + operand2[i]`, saturating at 32 bits.
    pub fn add(&self, operand2: &ComplexIntArray, destination: &mut ComplexIntArray) {
        precondition("add", same_size(self.len(), operand2.len()));
        precondition("add", fits(self.len(), destination.len()));
        let n = self.len().min(destination.len());
        destination.data[..n].copy_from_slice(&self.data[..n]);
        ActiveBackend::add_assign_q31(destination.as_interleaved_mut(), operand2.as_interleaved());
    }

    /// `self[i] += operand2[i]`, saturating at 32 bits.
    pub fn add_in_place(&mut self, operand2: &ComplexIntArray) {
        precondition("add", same_size(self.len(), operand2.len()));
        ActiveBackend::add_assign_q31(self.as_interleaved_mut(), operand2.as_interleaved());
    }

    /// Widens `source` into `self` (`<< 16` per part).
    pub fn copy_from(&mut self, source: &ComplexShortArray) {
        precondition("copy_from", same_size(self.len(), source.len()));
        ActiveBackend::q15_to_q31(source.as_interleaved(), self.as_interleaved_mut());
    }

    /// Narrows `self` into `destination` (`>> 16` per part).
    pub fn copy_to(&self, destination: &mut ComplexShortArray) {
        precondition("copy_to", fits(self.len(), destination.len()));
        ActiveBackend::q31_to_q15(self.as_interleaved(), destination.as_interleaved_mut());
    }

    pub fn clear(&mut self) {
        self.data.fill(ComplexInt::default());
    }

    pub fn equals(&self, other: &ComplexIntArray) -> bool {
        self.data == other.data
    }
}

impl ops::Index<usize> for ComplexIntArray {
    type Output = ComplexInt;

    #[inline]
    fn index(&self, index: usize) -> &ComplexInt {
        &self.data[index]
    }
}

impl ops::IndexMut<usize> for ComplexIntArray {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut ComplexInt {
        &mut self.data[index]
    }
}

impl PartialEq for ComplexIntArray {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for ComplexIntArray {}

impl fmt::Debug for ComplexIntArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

#[cfg(feature = "alloc")]
pub use self::buffer::ComplexIntBuffer;

#[cfg(feature = "alloc")]
mod buffer {
    use super::ComplexIntArray;
    use crate::fixed::types::ComplexInt;
    use alloc::{boxed::Box, vec};
    use core::{fmt, ops};

    /// Owning counterpart of [`ComplexIntArray`].
    #[derive(Clone, PartialEq, Eq)]
    pub struct ComplexIntBuffer {
        data: Box<[ComplexInt]>,
    }

    impl ComplexIntBuffer {
        /// Allocates `size` zeroed elements.
        pub fn create(size: usize) -> Self {
            log::trace!("allocating ComplexIntBuffer of {} elements", size);
            Self { data: vec![ComplexInt::default(); size].into_boxed_slice() }
        }

        /// Releases the storage.
        pub fn destroy(self) {
            log::trace!("releasing ComplexIntBuffer of {} elements", self.data.len());
            drop(self);
        }
    }

    impl ops::Deref for ComplexIntBuffer {
        type Target = ComplexIntArray;

        #[inline]
        fn deref(&self) -> &ComplexIntArray {
            ComplexIntArray::from_slice(&self.data)
        }
    }

    impl ops::DerefMut for ComplexIntBuffer {
        #[inline]
        fn deref_mut(&mut self) -> &mut ComplexIntArray {
            ComplexIntArray::from_mut_slice(&mut self.data)
        }
    }

    impl fmt::Debug for ComplexIntBuffer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            fmt::Debug::fmt(&**self, f)
        }
    }
}

#[cfg(test)]
#[path = "int_array_tests.rs"]
mod tests;
