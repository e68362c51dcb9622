//! Non-owning, scalar-tagged views onto externally owned heavy data.
//!
//! The heavy-data backend owns the storage behind an `Arc`; a [`DataBuffer`]
//! only keeps a `Weak` reference together with the scalar type it was bound
//! with. Once the backend drops the storage every binding to it reports
//! [`XdmfError::HeavyData`] on access.

use std::fmt;
use std::sync::{Arc, Weak};

use bytes::Bytes;

use crate::data::scalar::{Scalar, ScalarType};
use crate::xdmf_error::XdmfError;

/// Handle to bulk array storage provided by a heavy-data backend.
pub trait HeavyDataHandle: fmt::Debug + Send + Sync {
    /// Scalar type declared by the backend.
    fn scalar_type(&self) -> ScalarType;

    /// Number of elements stored.
    fn element_count(&self) -> usize;

    /// Textual locator forwarded to visitors, e.g. `mesh.h5:/coordinates`.
    fn reference(&self) -> String;

    /// Raw element bytes in native byte order.
    fn read_bytes(&self) -> Result<Bytes, XdmfError>;
}

/// `Bytes`-backed handle for arrays that already live in memory.
#[derive(Clone, Debug)]
pub struct InMemoryHandle {
    reference: String,
    scalar_type: ScalarType,
    element_count: usize,
    bytes: Bytes,
}

impl InMemoryHandle {
    /// Copy `values` into a new handle addressed by `reference`.
    pub fn from_values<T: Scalar>(reference: impl Into<String>, values: &[T]) -> Self {
        Self {
            reference: reference.into(),
            scalar_type: T::SCALAR_TYPE,
            element_count: values.len(),
            bytes: Bytes::copy_from_slice(bytemuck::cast_slice(values)),
        }
    }
}

impl HeavyDataHandle for InMemoryHandle {
    fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    fn element_count(&self) -> usize {
        self.element_count
    }

    fn reference(&self) -> String {
        self.reference.clone()
    }

    fn read_bytes(&self) -> Result<Bytes, XdmfError> {
        Ok(self.bytes.clone())
    }
}

#[derive(Clone)]
struct Binding {
    handle: Weak<dyn HeavyDataHandle>,
    scalar_type: ScalarType,
}

/// Scalar-tagged, non-owning reference to heavy data.
///
/// Rebinding replaces the previous handle and scalar type as a whole.
#[derive(Clone, Default)]
pub struct DataBuffer {
    binding: Option<Binding>,
}

impl DataBuffer {
    /// An unbound buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to `handle` using the scalar type the backend declares.
    pub fn bind(&mut self, handle: &Arc<dyn HeavyDataHandle>) {
        let scalar_type = handle.scalar_type();
        self.bind_as(handle, scalar_type);
    }

    /// Bind to `handle`, interpreting its elements as `scalar_type`.
    pub fn bind_as(&mut self, handle: &Arc<dyn HeavyDataHandle>, scalar_type: ScalarType) {
        self.binding = Some(Binding {
            handle: Arc::downgrade(handle),
            scalar_type,
        });
    }

    /// Drop the current binding, if any.
    pub fn unbind(&mut self) {
        self.binding = None;
    }

    /// True if a handle was bound, whether or not it is still alive.
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// True if a handle was bound and the backend has since released it.
    pub fn is_released(&self) -> bool {
        self.binding
            .as_ref()
            .is_some_and(|binding| binding.handle.strong_count() == 0)
    }

    /// Scalar type of the current binding.
    pub fn scalar_type(&self) -> Option<ScalarType> {
        self.binding.as_ref().map(|binding| binding.scalar_type)
    }

    /// Upgrade the binding to a live handle.
    pub fn handle(&self) -> Result<Arc<dyn HeavyDataHandle>, XdmfError> {
        let binding = self
            .binding
            .as_ref()
            .ok_or_else(|| XdmfError::HeavyData("buffer is not bound".into()))?;
        binding
            .handle
            .upgrade()
            .ok_or_else(|| XdmfError::HeavyData("heavy data was released by its backend".into()))
    }

    /// Read the bound elements as `T`.
    ///
    /// `T` must match the bound scalar type exactly.
    pub fn read_values<T: Scalar>(&self) -> Result<Vec<T>, XdmfError> {
        let bound = self
            .scalar_type()
            .ok_or_else(|| XdmfError::HeavyData("buffer is not bound".into()))?;
        if bound != T::SCALAR_TYPE {
            return Err(XdmfError::HeavyData(format!(
                "buffer is bound as {} but was read as {}",
                bound.as_str(),
                T::SCALAR_TYPE.as_str()
            )));
        }
        let bytes = self.handle()?.read_bytes()?;
        let width = std::mem::size_of::<T>();
        if bytes.len() % width != 0 {
            return Err(XdmfError::HeavyData(format!(
                "{} bytes is not a whole number of {} elements",
                bytes.len(),
                bound.as_str()
            )));
        }
        Ok(bytes
            .chunks_exact(width)
            .map(bytemuck::pod_read_unaligned::<T>)
            .collect())
    }
}

impl fmt::Debug for DataBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.binding {
            Some(binding) => f
                .debug_struct("DataBuffer")
                .field("scalar_type", &binding.scalar_type)
                .field("live", &(binding.handle.strong_count() > 0))
                .finish(),
            None => f.write_str("DataBuffer(unbound)"),
        }
    }
}
