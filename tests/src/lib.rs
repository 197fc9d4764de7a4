//! Shared helpers for the cross-crate integration tests.

use microq_tensor::Tensor;

/// Reconstruct approximate reals from a quantized tensor:
/// `(q - zero_point) * scale`. Test-only; the library has no dequantize path.
pub fn reconstruct(quantized: &Tensor) -> Vec<f32> {
    let params = quantized
        .quant_params()
        .expect("tensor was not produced by a quantizer");
    quantized
        .as_i8()
        .expect("quantized tensor holds int8 codes")
        .iter()
        .map(|&q| (q as i32 - params.zero_point()) as f32 * params.scale())
        .collect()
}

/// Largest absolute elementwise difference.
pub fn max_abs_error(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "length mismatch");
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0f32, f32::max)
}
