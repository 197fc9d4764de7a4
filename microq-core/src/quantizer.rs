use crate::error::QuantizeError;
use microq_tensor::Tensor;

/// Quantizer interface for float-to-integer tensor compression.
///
/// Implementations never mutate `source`; the quantized result is a freshly
/// allocated tensor carrying the parameters needed to interpret its codes.
/// Given identical input, output must be bit-for-bit identical.
pub trait Quantizer {
    fn quantize(&self, source: &Tensor) -> Result<Tensor, QuantizeError>;
}
