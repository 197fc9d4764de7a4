use crate::error::{AllocationFailure, TensorError};
use crate::shape::Shape;
use crate::tensor::{Storage, StorageKind, Tensor};
use serde::{Deserialize, Serialize};

/// Allocation policy for a [`BufferStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Per-tensor ceiling on element bytes, for targets with a fixed RAM budget.
    /// `None` leaves the host allocator as the only limit.
    pub max_tensor_bytes: Option<usize>,
}

/// Creates and releases tensors.
///
/// Every tensor gets its own zero-filled storage; nothing is pooled or shared.
/// Allocation is fallible: an oversized request is reported as
/// [`TensorError::Allocation`] instead of aborting the process.
#[derive(Debug, Clone, Default)]
pub struct BufferStore {
    config: StoreConfig,
}

impl BufferStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Allocate a zero-filled tensor of the given shape and representation.
    pub fn create(&self, dims: &[usize], kind: StorageKind) -> Result<Tensor, TensorError> {
        let shape = Shape::new(dims)?;
        let count = shape.element_count();
        let bytes = count
            .checked_mul(kind.element_size())
            .ok_or_else(|| TensorError::allocation(dims, AllocationFailure::ElementCountOverflow))?;

        if let Some(limit) = self.config.max_tensor_bytes {
            if bytes > limit {
                return Err(TensorError::allocation(
                    dims,
                    AllocationFailure::ExceedsLimit {
                        requested: bytes,
                        limit,
                    },
                ));
            }
        }

        let storage = match kind {
            StorageKind::Float32 => Storage::Float32(zeroed(dims, count, bytes)?),
            StorageKind::Int8 => Storage::Int8 {
                data: zeroed(dims, count, bytes)?,
                params: None,
            },
        };

        tracing::trace!(shape = %shape, %kind, bytes, "allocated tensor");
        Ok(Tensor::from_parts(shape, storage))
    }

    /// Allocate a `Float32` tensor and copy `values` into it.
    pub fn create_from_f32(&self, dims: &[usize], values: &[f32]) -> Result<Tensor, TensorError> {
        let mut tensor = self.create(dims, StorageKind::Float32)?;
        let data = tensor.as_f32_mut()?;
        if data.len() != values.len() {
            return Err(TensorError::ElementCountMismatch {
                expected: data.len(),
                got: values.len(),
            });
        }
        data.copy_from_slice(values);
        Ok(tensor)
    }

    /// Release a tensor's storage. Taking the tensor by value makes a second
    /// release of the same tensor impossible.
    pub fn release(&self, tensor: Tensor) {
        tracing::trace!(
            shape = %tensor.shape(),
            kind = %tensor.storage_kind(),
            bytes = tensor.byte_size(),
            "released tensor"
        );
        drop(tensor);
    }
}

fn zeroed<T: Copy + Default>(dims: &[usize], count: usize, bytes: usize) -> Result<Vec<T>, TensorError> {
    let mut data = Vec::new();
    data.try_reserve_exact(count)
        .map_err(|_| TensorError::allocation(dims, AllocationFailure::Reserve { bytes }))?;
    data.resize(count, T::default());
    Ok(data)
}
