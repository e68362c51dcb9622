//! Data module: heavy-data boundary
#![deny(missing_docs)]

pub mod buffer;
pub mod scalar;
pub mod store;

pub use buffer::{DataBuffer, HeavyDataHandle, InMemoryHandle};
pub use scalar::{Scalar, ScalarType};
pub use store::{HeavyDataResolver, HeavyDataStore};
