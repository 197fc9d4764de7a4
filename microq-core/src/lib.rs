//! # microq-core
//!
//! Per-tensor affine INT8 post-training quantization.
//!
//! - [`Quantizer`]: turn a `Float32` tensor into a new `Int8` tensor
//! - [`AffineQuantizer`]: asymmetric scale + zero-point mapping with saturation
//! - [`MemoryReport`] / [`QuantSummary`]: textual before/after comparison

pub mod affine;
pub mod error;
pub mod quantizer;
pub mod report;

pub use affine::{AffineQuantizer, ObservedRange, QuantConfig, RoundingRule};
pub use error::{InvalidInput, QuantizeError};
pub use quantizer::Quantizer;
pub use report::{MemoryReport, QuantSummary};
