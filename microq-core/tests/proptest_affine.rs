use microq_core::{AffineQuantizer, QuantConfig, Quantizer, RoundingRule};
use microq_tensor::BufferStore;
use proptest::prelude::*;

fn rounding_rule() -> impl Strategy<Value = RoundingRule> {
    prop_oneof![
        Just(RoundingRule::HalfAwayFromZero),
        Just(RoundingRule::HalfToEven),
    ]
}

// Property 1: Dequantized codes stay within one scale step of the source
proptest! {
    #[test]
    fn prop_error_within_one_step(
        values in prop::collection::vec(-1000.0f32..1000.0f32, 1..200),
        rounding in rounding_rule(),
    ) {
        let store = BufferStore::new();
        let source = store.create_from_f32(&[values.len()], &values).unwrap();
        let quantizer = AffineQuantizer::new(QuantConfig { rounding, ..QuantConfig::default() });

        let quantized = quantizer.quantize(&source).unwrap();
        let params = quantized.quant_params().unwrap();
        let scale = params.scale();

        for (i, (&original, &code)) in values.iter().zip(quantized.as_i8().unwrap()).enumerate() {
            let approx = (code as i32 - params.zero_point()) as f32 * scale;
            let diff = (approx - original).abs();
            // Slack covers f32 rounding in real / scale at large magnitudes.
            prop_assert!(
                diff <= scale * 1.001 + original.abs() * 1e-6,
                "Error bound violated at {}: {} vs {} (diff {}, scale {})",
                i, original, approx, diff, scale
            );
        }
    }
}

// Property 2: Observed minimum lands on -128, maximum near 127
proptest! {
    #[test]
    fn prop_range_endpoints(
        values in prop::collection::vec(-500.0f32..500.0f32, 2..100),
        rounding in rounding_rule(),
    ) {
        prop_assume!(values.iter().any(|&v| v != values[0]));

        let store = BufferStore::new();
        let source = store.create_from_f32(&[values.len()], &values).unwrap();
        let quantizer = AffineQuantizer::new(QuantConfig { rounding, ..QuantConfig::default() });
        let quantized = quantizer.quantize(&source).unwrap();
        let codes = quantized.as_i8().unwrap();

        let (min_idx, _) = values
            .iter()
            .enumerate()
            .fold((0, f32::MAX), |acc, (i, &v)| if v < acc.1 { (i, v) } else { acc });
        let (max_idx, _) = values
            .iter()
            .enumerate()
            .fold((0, f32::MIN), |acc, (i, &v)| if v > acc.1 { (i, v) } else { acc });

        prop_assert_eq!(codes[min_idx], -128);
        prop_assert!(codes[max_idx] >= 126, "max mapped to {}", codes[max_idx]);
    }
}

// Property 3: Determinism (same input always produces same output)
proptest! {
    #[test]
    fn prop_determinism(
        values in prop::collection::vec(-100.0f32..100.0f32, 1..100),
        rounding in rounding_rule(),
    ) {
        let store = BufferStore::new();
        let source = store.create_from_f32(&[values.len()], &values).unwrap();
        let quantizer = AffineQuantizer::new(QuantConfig { rounding, ..QuantConfig::default() });

        let first = quantizer.quantize(&source).unwrap();
        let second = quantizer.quantize(&source).unwrap();

        prop_assert_eq!(first.quant_params(), second.quant_params());
        prop_assert_eq!(first.as_i8().unwrap(), second.as_i8().unwrap());
        prop_assert_eq!(source.as_f32().unwrap(), &values[..]);
    }
}

// Property 4: Constant tensors never divide by zero
proptest! {
    #[test]
    fn prop_constant_tensor(c in -1000.0f32..1000.0f32, len in 1usize..64) {
        let store = BufferStore::new();
        let source = store.create_from_f32(&[len], &vec![c; len]).unwrap();
        let quantized = AffineQuantizer::default().quantize(&source).unwrap();
        let params = quantized.quant_params().unwrap();

        prop_assert_eq!(params.scale(), ((c + 0.001) - c) / 255.0);
        prop_assert!(quantized.as_i8().unwrap().iter().all(|&q| q == -128));
    }
}

fn any_finite_f32() -> impl Strategy<Value = f32> {
    prop::num::f32::POSITIVE
        | prop::num::f32::NEGATIVE
        | prop::num::f32::NORMAL
        | prop::num::f32::SUBNORMAL
        | prop::num::f32::ZERO
}

// Property 5: Constants anywhere in the finite f32 range still quantize
proptest! {
    #[test]
    fn prop_constant_tensor_any_magnitude(
        c in any_finite_f32(),
        len in 1usize..16,
        rounding in rounding_rule(),
    ) {
        let store = BufferStore::new();
        let source = store.create_from_f32(&[len], &vec![c; len]).unwrap();
        let quantizer = AffineQuantizer::new(QuantConfig { rounding, ..QuantConfig::default() });

        let quantized = quantizer.quantize(&source).unwrap();
        let scale = quantized.quant_params().unwrap().scale();
        prop_assert!(scale.is_finite() && scale > 0.0, "scale {} for {}", scale, c);

        let codes = quantized.as_i8().unwrap();
        if c <= 3.0e38 {
            prop_assert!(codes.iter().all(|&q| q == -128), "codes {:?} for {}", codes, c);
        } else {
            // Within a few ulps of f32::MAX the window is placed below the value.
            prop_assert!(codes.iter().all(|&q| q == codes[0]));
        }
    }
}
