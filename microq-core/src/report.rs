use crate::affine::ObservedRange;
use microq_tensor::{QuantParams, Tensor};
use std::fmt;

/// Byte-size comparison between an original tensor and its quantized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryReport {
    pub original_bytes: usize,
    pub quantized_bytes: usize,
}

impl MemoryReport {
    pub fn new(original_bytes: usize, quantized_bytes: usize) -> Self {
        Self {
            original_bytes,
            quantized_bytes,
        }
    }

    pub fn from_tensors(original: &Tensor, quantized: &Tensor) -> Self {
        Self::new(original.byte_size(), quantized.byte_size())
    }

    /// `(1 - quantized / original) * 100`; zero for an empty original.
    pub fn savings_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.quantized_bytes as f64 / self.original_bytes as f64) * 100.0
    }

    pub fn compression_ratio(&self) -> f64 {
        if self.quantized_bytes == 0 {
            return 0.0;
        }
        self.original_bytes as f64 / self.quantized_bytes as f64
    }
}

impl fmt::Display for MemoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== MEMORY OPTIMIZATION REPORT ===")?;
        writeln!(f, "| Type      | Size (Byte)  | Status    |")?;
        writeln!(f, "|-----------|--------------|-----------|")?;
        writeln!(f, "| Float32   | {:<12} | Original  |", self.original_bytes)?;
        writeln!(f, "| Int8      | {:<12} | Quantized |", self.quantized_bytes)?;
        writeln!(f, "----------------------------------------")?;
        write!(
            f,
            ">> Total savings: {:.1}% ({:.2}x smaller)",
            self.savings_percent(),
            self.compression_ratio()
        )
    }
}

/// The range and affine parameters chosen for one tensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantSummary {
    pub range: ObservedRange,
    pub params: QuantParams,
}

impl fmt::Display for QuantSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[QUANTIZATION INFO]")?;
        writeln!(f, "  Range      : [{:.2}, {:.2}]", self.range.min, self.range.max)?;
        writeln!(f, "  Scale      : {:.6}", self.params.scale())?;
        write!(f, "  Zero-point : {}", self.params.zero_point())
    }
}
