#![cfg_attr(not(feature = "std"), no_std)]

// Without the "std" feature the tests still need the standard library.
#[cfg(all(test, not(feature = "std")))]
extern crate std;

// Owning buffers need the allocator; views work on any borrowed storage.
#[cfg(feature = "alloc")]
extern crate alloc;

pub mod common;
pub mod fixed;

pub use common::ArrayError;
pub use fixed::{
    ActiveBackend, ComplexInt, ComplexIntArray, ComplexShort, ComplexShortArray, DspBackend,
};
#[cfg(feature = "alloc")]
pub use fixed::{ComplexIntBuffer, ComplexShortBuffer};
