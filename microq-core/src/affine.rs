use crate::error::{InvalidInput, QuantizeError};
use crate::Quantizer;
use microq_tensor::{BufferStore, QuantParams, StorageKind, Tensor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest int8 code.
pub const QMIN: i32 = i8::MIN as i32;
/// Largest int8 code.
pub const QMAX: i32 = i8::MAX as i32;
/// Number of quantization steps between `QMIN` and `QMAX`.
const LEVELS: f32 = (QMAX - QMIN) as f32;

/// Widening applied to a constant tensor so the scale stays non-zero.
pub const DEFAULT_DEGENERATE_EPSILON: f32 = 0.001;

/// Tie-break rule for values exactly halfway between two integers.
///
/// Both rules are odd-symmetric (`round(-x) == -round(x)`), so the observed
/// minimum always lands exactly on `QMIN`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingRule {
    /// `2.5 -> 3`, `-2.5 -> -3`. Matches C `round()`.
    #[default]
    HalfAwayFromZero,
    /// `2.5 -> 2`, `3.5 -> 4` (banker's rounding).
    HalfToEven,
}

impl RoundingRule {
    #[inline]
    pub fn round(self, value: f32) -> f32 {
        match self {
            RoundingRule::HalfAwayFromZero => value.round(),
            RoundingRule::HalfToEven => value.round_ties_even(),
        }
    }
}

impl fmt::Display for RoundingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingRule::HalfAwayFromZero => write!(f, "half-away-from-zero"),
            RoundingRule::HalfToEven => write!(f, "half-to-even"),
        }
    }
}

impl FromStr for RoundingRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "half-away-from-zero" => Ok(RoundingRule::HalfAwayFromZero),
            "half-to-even" => Ok(RoundingRule::HalfToEven),
            other => Err(format!(
                "unknown rounding rule '{}' (expected half-away-from-zero or half-to-even)",
                other
            )),
        }
    }
}

/// Tunables for [`AffineQuantizer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantConfig {
    pub rounding: RoundingRule,
    /// Added to the maximum when every element is equal.
    pub degenerate_epsilon: f32,
}

impl Default for QuantConfig {
    fn default() -> Self {
        Self {
            rounding: RoundingRule::default(),
            degenerate_epsilon: DEFAULT_DEGENERATE_EPSILON,
        }
    }
}

/// Inclusive value range the affine parameters were derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservedRange {
    pub min: f32,
    pub max: f32,
}

impl ObservedRange {
    /// Single pass over `values`. Callers pass at least one element.
    fn scan(values: &[f32]) -> Result<Self, InvalidInput> {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(InvalidInput::NonFinite { index, value });
            }
            min = min.min(value);
            max = max.max(value);
        }
        Ok(Self { min, max })
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

/// Asymmetric per-tensor INT8 quantizer.
///
/// Maps the observed `[min, max]` range linearly onto `[-128, 127]`:
///
/// ```text
/// scale      = (max - min) / 255
/// zero_point = round(-min / scale) - 128
/// q          = clamp(round(real / scale) + zero_point, -128, 127)
/// ```
///
/// A constant tensor would give a zero scale, so its maximum is first widened
/// by `degenerate_epsilon`. This is a fixed approximation, not a general
/// normalization.
///
/// # Example
/// ```
/// use microq_core::{AffineQuantizer, Quantizer};
/// use microq_tensor::BufferStore;
///
/// let store = BufferStore::new();
/// let source = store.create_from_f32(&[2, 2], &[-20.0, 0.0, 35.0, 70.0]).unwrap();
///
/// let quantized = AffineQuantizer::default().quantize(&source).unwrap();
/// let params = quantized.quant_params().unwrap();
/// assert!((params.scale() - 90.0 / 255.0).abs() < 1e-6);
/// assert_eq!(quantized.get_i8(0).unwrap(), -128);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AffineQuantizer {
    config: QuantConfig,
    store: BufferStore,
}

impl AffineQuantizer {
    pub fn new(config: QuantConfig) -> Self {
        Self {
            config,
            store: BufferStore::new(),
        }
    }

    /// Allocate outputs through `store` (e.g. one with a byte ceiling).
    pub fn with_store(config: QuantConfig, store: BufferStore) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &QuantConfig {
        &self.config
    }

    /// Quantize `source` and also return the range the parameters came from.
    pub fn quantize_observed(
        &self,
        source: &Tensor,
    ) -> Result<(Tensor, ObservedRange), QuantizeError> {
        let values = source.as_f32().map_err(|_| InvalidInput::WrongStorage {
            expected: StorageKind::Float32,
            got: source.storage_kind(),
        })?;

        let range = self.widen_degenerate(ObservedRange::scan(values)?);
        let params = self.derive_params(range)?;

        tracing::debug!(
            min = range.min,
            max = range.max,
            scale = params.scale(),
            zero_point = params.zero_point(),
            rounding = %self.config.rounding,
            "derived affine parameters"
        );

        let mut output = self.store.create(source.shape().dims(), StorageKind::Int8)?;
        for (code, &real) in output.as_i8_mut()?.iter_mut().zip(values) {
            *code = self.quantize_value(real, params);
        }
        output.set_quant_params(params)?;

        Ok((output, range))
    }

    /// Scale and zero-point for a non-degenerate range.
    pub fn derive_params(&self, range: ObservedRange) -> Result<QuantParams, QuantizeError> {
        let unrepresentable = InvalidInput::Unrepresentable {
            min: range.min,
            max: range.max,
        };

        let scale = range.span() / LEVELS;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(unrepresentable.into());
        }

        let zero_point = f64::from(self.config.rounding.round(-range.min / scale)) + f64::from(QMIN);
        if zero_point < f64::from(i32::MIN) || zero_point > f64::from(i32::MAX) {
            return Err(unrepresentable.into());
        }

        Ok(QuantParams::new(scale, zero_point as i32)?)
    }

    /// Map one real value to its saturated int8 code.
    #[inline]
    pub fn quantize_value(&self, real: f32, params: QuantParams) -> i8 {
        let steps = self.config.rounding.round(real / params.scale());
        // `as` saturates at the i32 bounds.
        let raw = (steps as i32).saturating_add(params.zero_point());
        raw.clamp(QMIN, QMAX) as i8
    }

    /// Give a constant tensor a non-zero span.
    ///
    /// `min + degenerate_epsilon` is kept while it leaves `|min| / scale` within
    /// [`MAX_DEGENERATE_STEPS`]; past that the span grows with `|min|` so the
    /// zero-point stays inside `i32`. Only a constant within a few ulps of
    /// `f32::MAX` has its window shifted below the value instead.
    fn widen_degenerate(&self, range: ObservedRange) -> ObservedRange {
        if range.max != range.min {
            return range;
        }

        let min_span = degenerate_span_floor(range.min);
        let widened = range.min + self.config.degenerate_epsilon;
        if widened.is_finite() && widened - range.min >= min_span {
            return ObservedRange {
                min: range.min,
                max: widened,
            };
        }

        let max = range.min + min_span;
        if max.is_finite() {
            ObservedRange { min: range.min, max }
        } else {
            ObservedRange {
                min: range.min - min_span,
                max: range.min,
            }
        }
    }
}

/// Upper bound on `|min| / scale` for a widened constant range (2^29 steps).
const MAX_DEGENERATE_STEPS: f32 = (1u32 << 29) as f32;

/// Smallest span that keeps `|value| / scale` at or below `MAX_DEGENERATE_STEPS`.
fn degenerate_span_floor(value: f32) -> f32 {
    (value.abs() * (LEVELS / MAX_DEGENERATE_STEPS)).max(f32::MIN_POSITIVE)
}

impl Quantizer for AffineQuantizer {
    fn quantize(&self, source: &Tensor) -> Result<Tensor, QuantizeError> {
        self.quantize_observed(source).map(|(tensor, _)| tensor)
    }
}
