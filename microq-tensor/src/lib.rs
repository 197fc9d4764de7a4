//! # microq-tensor
//!
//! Dense tensor buffers for the microq quantization pipeline.
//!
//! A [`Tensor`] owns exactly one representation at a time: either `f32`
//! elements or `i8` elements plus the affine [`QuantParams`] that produced them.
//! Tensors are created zero-filled through a [`BufferStore`] and released by
//! dropping them (or explicitly via [`BufferStore::release`]).

pub mod error;
pub mod shape;
pub mod store;
pub mod tensor;

pub use error::{AllocationFailure, TensorError};
pub use shape::Shape;
pub use store::{BufferStore, StoreConfig};
pub use tensor::{QuantParams, Storage, StorageKind, Tensor};
