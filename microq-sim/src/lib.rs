//! # microq-sim
//!
//! Synthetic input for the quantization pipeline. Randomness lives only here,
//! behind [`DataSource`], so quantization stays deterministic and testable.

pub mod source;
pub mod uniform;

pub use source::{ConstantSource, DataSource, SequenceSource};
pub use uniform::UniformSource;

use microq_tensor::{Tensor, TensorError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("invalid sampling range [{low}, {high}]")]
    InvalidRange { low: f32, high: f32 },
    #[error("sequence source needs at least one value")]
    EmptySequence,
}

/// Overwrite every element of a `Float32` tensor with values from `source`.
pub fn fill_tensor<S: DataSource + ?Sized>(
    tensor: &mut Tensor,
    source: &mut S,
) -> Result<(), TensorError> {
    source.fill(tensor.as_f32_mut()?);
    Ok(())
}
