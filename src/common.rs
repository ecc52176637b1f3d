// src/common.rs

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ArrayError {
    SizeMismatch { expected: usize, actual: usize },
    DestinationTooSmall { required: usize, actual: usize },
    OutOfBounds { offset: usize, length: usize, size: usize },
}

use core::fmt;

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayError::SizeMismatch { expected, actual } => {
                write!(f, "Array size mismatch: expected {} elements, got {}", expected, actual)
            }
            ArrayError::DestinationTooSmall { required, actual } => {
                write!(f, "Destination too small: need {} elements, got {}", required, actual)
            }
            ArrayError::OutOfBounds { offset, length, size } => {
                write!(
                    f,
                    "Range {}..{} is outside an array of {} elements",
                    offset,
                    offset + length,
                    size
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ArrayError {}

/// Validates a size precondition.
///
/// Only the `checked` build looks at the sizes; a violation is logged and
/// then panics. Release builds compile this to nothing and rely on the caller.
#[inline(always)]
pub(crate) fn precondition(op: &'static str, violation: Option<ArrayError>) {
    #[cfg(feature = "checked")]
    if let Some(err) = violation {
        log::error!("{}: {}", op, err);
        panic!("{}: {}", op, err);
    }
    #[cfg(not(feature = "checked"))]
    let _ = (op, violation);
}

/// `operand` must have exactly `expected` elements.
#[inline(always)]
pub(crate) fn same_size(expected: usize, actual: usize) -> Option<ArrayError> {
    (expected != actual).then_some(ArrayError::SizeMismatch { expected, actual })
}

/// `destination` must hold at least `required` elements.
#[inline(always)]
pub(crate) fn fits(required: usize, actual: usize) -> Option<ArrayError> {
    (actual < required).then_some(ArrayError::DestinationTooSmall { required, actual })
}

/// `[offset, offset + length)` must lie inside `size` elements.
#[inline(always)]
pub(crate) fn in_range(offset: usize, length: usize, size: usize) -> Option<ArrayError> {
    match offset.checked_add(length) {
        Some(end) if end <= size => None,
        _ => Some(ArrayError::OutOfBounds { offset, length, size }),
    }
}
