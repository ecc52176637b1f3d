pub mod types;
mod core;
pub mod short_array;
pub mod int_array;

pub use self::core::{ActiveBackend, DspBackend, ScalarBackend, VectorBackend};
pub use int_array::ComplexIntArray;
pub use short_array::ComplexShortArray;
pub use types::{ComplexInt, ComplexShort};

#[cfg(feature = "alloc")]
pub use int_array::ComplexIntBuffer;
#[cfg(feature = "alloc")]
pub use short_array::ComplexShortBuffer;
