use anyhow::{Context, Result};
use clap::Parser;
use microq_core::{AffineQuantizer, MemoryReport, QuantConfig, QuantSummary, RoundingRule};
use microq_sim::{fill_tensor, DataSource, UniformSource};
use microq_tensor::{BufferStore, StorageKind, StoreConfig, Tensor};
use tracing_subscriber::EnvFilter;

/// Quantize a synthetic sensor tensor to INT8 and report the memory saved.
///
/// Fills a float tensor with uniformly distributed readings, maps it onto
/// int8 with a per-tensor scale and zero-point, then prints both the chosen
/// parameters and a before/after size table.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
struct Args {
    /// Tensor dimensions, comma separated
    #[arg(long, value_delimiter = ',', default_value = "5,5")]
    shape: Vec<usize>,

    /// Lower bound of the simulated readings
    #[arg(long, default_value_t = -20.0, allow_negative_numbers = true)]
    low: f32,

    /// Upper bound of the simulated readings
    #[arg(long, default_value_t = 70.0, allow_negative_numbers = true)]
    high: f32,

    /// Seed for reproducible readings (entropy-seeded when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Tie-break rule: half-away-from-zero or half-to-even
    #[arg(long, default_value_t = RoundingRule::HalfAwayFromZero)]
    rounding: RoundingRule,

    /// Widening applied to the range of a constant tensor
    #[arg(long, default_value_t = 0.001)]
    epsilon: f32,

    /// Refuse to allocate any tensor larger than this many bytes
    #[arg(long)]
    max_tensor_bytes: Option<usize>,

    /// Number of leading elements to print from each tensor
    #[arg(long, default_value_t = 3)]
    preview: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    println!("TinyML Tensor Manager starting...");

    let store = BufferStore::with_config(StoreConfig {
        max_tensor_bytes: args.max_tensor_bytes,
    });

    // Step 1: float buffer with simulated sensor data
    let mut source: Box<dyn DataSource> = match args.seed {
        Some(seed) => Box::new(UniformSource::new(args.low, args.high, seed)?),
        None => Box::new(UniformSource::from_entropy(args.low, args.high)?),
    };
    let mut readings = store
        .create(&args.shape, StorageKind::Float32)
        .context("allocating float buffer")?;
    println!(">> Simulating sensor data in [{}, {}]...", args.low, args.high);
    fill_tensor(&mut readings, source.as_mut())?;
    println!("   Sample data : {}", preview_f32(&readings, args.preview)?);

    // Step 2: quantization
    let quantizer = AffineQuantizer::with_store(
        QuantConfig {
            rounding: args.rounding,
            degenerate_epsilon: args.epsilon,
        },
        store.clone(),
    );
    let (quantized, range) = quantizer
        .quantize_observed(&readings)
        .context("quantizing float buffer")?;
    let params = quantized
        .quant_params()
        .context("quantized tensor is missing its parameters")?;

    println!();
    println!("{}", QuantSummary { range, params });
    println!("   Int8 codes  : {}", preview_i8(&quantized, args.preview)?);

    // Step 3: report
    let report = MemoryReport::from_tensors(&readings, &quantized);
    println!();
    println!("{}", report);
    println!();

    store.release(quantized);
    store.release(readings);
    tracing::info!("buffers released");

    Ok(())
}

fn preview_f32(tensor: &Tensor, n: usize) -> Result<String> {
    let shown: Vec<String> = tensor
        .as_f32()?
        .iter()
        .take(n)
        .map(|v| format!("{:.2}", v))
        .collect();
    Ok(with_ellipsis(shown, tensor.element_count() > n))
}

fn preview_i8(tensor: &Tensor, n: usize) -> Result<String> {
    let shown: Vec<String> = tensor
        .as_i8()?
        .iter()
        .take(n)
        .map(|v| v.to_string())
        .collect();
    Ok(with_ellipsis(shown, tensor.element_count() > n))
}

fn with_ellipsis(shown: Vec<String>, truncated: bool) -> String {
    let mut line = shown.join(", ");
    if truncated {
        line.push_str(" ...");
    }
    line
}
