use crate::tensor::StorageKind;
use thiserror::Error;

/// Why a buffer could not be allocated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationFailure {
    #[error("shape has no dimensions")]
    EmptyShape,
    #[error("dimension {axis} is zero")]
    ZeroDimension { axis: usize },
    #[error("element or byte count overflows usize")]
    ElementCountOverflow,
    #[error("{requested} bytes exceeds the store limit of {limit} bytes")]
    ExceedsLimit { requested: usize, limit: usize },
    #[error("host refused to reserve {bytes} bytes")]
    Reserve { bytes: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorError {
    #[error("allocation failed for shape {shape:?}: {reason}")]
    Allocation {
        shape: Vec<usize>,
        reason: AllocationFailure,
    },
    #[error("storage mismatch: expected {expected}, got {got}")]
    StorageMismatch {
        expected: StorageKind,
        got: StorageKind,
    },
    #[error("index {index} out of bounds for {len} elements")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("element count mismatch: shape requires {expected}, got {got}")]
    ElementCountMismatch { expected: usize, got: usize },
    #[error("scale must be finite and positive, got {0}")]
    InvalidScale(f32),
}

impl TensorError {
    pub(crate) fn allocation(shape: &[usize], reason: AllocationFailure) -> Self {
        TensorError::Allocation {
            shape: shape.to_vec(),
            reason,
        }
    }

    /// True for failures raised while reserving storage.
    pub fn is_allocation(&self) -> bool {
        matches!(self, TensorError::Allocation { .. })
    }
}
