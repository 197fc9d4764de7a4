use microq_core::{AffineQuantizer, Quantizer};
use microq_tensor::BufferStore;

// Prints a digest of the quantized codes and parameters for a fixed input, so
// runs on different platforms can be compared byte for byte.
fn main() {
    let vals: Vec<f32> = vec![
        -20.0, -12.5, -0.25, 0.0, 0.25, 1.0, 2.5, 7.75, 13.0, 21.5, 34.0, 55.0, 70.0,
    ];
    let store = BufferStore::new();
    let source = store
        .create_from_f32(&[vals.len()], &vals)
        .expect("allocate source");
    let quantized = AffineQuantizer::default()
        .quantize(&source)
        .expect("quantize");
    let params = quantized.quant_params().expect("quantized tensor carries params");

    let mut bytes = Vec::with_capacity(quantized.element_count() + 8);
    bytes.extend_from_slice(&params.scale().to_le_bytes());
    bytes.extend_from_slice(&params.zero_point().to_le_bytes());
    for &code in quantized.as_i8().expect("int8 codes") {
        bytes.push(code as u8);
    }
    println!("AFFINE_INT8_HASH {}", sha256(&bytes));
}

fn sha256(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(data);
    let out = hasher.finalize();
    hex::encode(out)
}
