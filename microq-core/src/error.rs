use microq_tensor::{StorageKind, TensorError};
use thiserror::Error;

/// Caller-side problems with a tensor handed to the quantizer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInput {
    #[error("expected {expected} storage, got {got}")]
    WrongStorage {
        expected: StorageKind,
        got: StorageKind,
    },
    #[error("non-finite value {value} at index {index}")]
    NonFinite { index: usize, value: f32 },
    #[error("range [{min}, {max}] cannot be mapped onto int8")]
    Unrepresentable { min: f32, max: f32 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantizeError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("tensor error: {0}")]
    Tensor(#[from] TensorError),
}

impl QuantizeError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, QuantizeError::InvalidInput(_))
    }

    pub fn is_allocation(&self) -> bool {
        matches!(self, QuantizeError::Tensor(e) if e.is_allocation())
    }
}
