use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rasterrgb::logger;
use rasterrgb::raster_pipeline::{AdjustConfig, RasterAdjuster, TiffCompression};

use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "rasterrgb",
    about = "Colour balance and brightness normalisation for RGB GeoTIFF mosaics."
)]
struct Cli {
    /// Input GeoTIFF files
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory
    #[arg(long, short, default_value = ".")]
    out_dir: PathBuf,

    /// Adjustment to run
    #[arg(long, value_enum, default_value = "color")]
    mode: Mode,

    /// Reference image whose brightness every input is matched to
    #[arg(long, required_if_eq("mode", "brightness"))]
    reference: Option<PathBuf>,

    /// No-data sentinel (defaults to the image's own, or 0)
    #[arg(long)]
    no_data: Option<u16>,

    /// Output compression
    #[arg(long, value_enum, default_value = "none")]
    compression: Compression,

    /// Largest decoding buffer per image, in MiB (default 4096)
    #[arg(long, value_name = "MIB")]
    decode_limit: Option<u64>,

    /// Debug logging with stage timings
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Histogram 2SD stretch to 8 bits
    Color,
    /// Luminance shift towards --reference
    Brightness,
    /// Copy with 0 declared as no-data
    Border,
}

#[derive(Clone, Copy)]
enum Job {
    ColorBalance,
    Brightness([f64; 3]),
    RemoveBorder,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Compression {
    None,
    Lzw,
    Deflate,
}

impl From<Compression> for TiffCompression {
    fn from(value: Compression) -> Self {
        match value {
            Compression::None => TiffCompression::None,
            Compression::Lzw => TiffCompression::Lzw,
            Compression::Deflate => TiffCompression::Deflate,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let mut builder = AdjustConfig::builder()
        .output_dir(&cli.out_dir)
        .compression(cli.compression.into());
    if let Some(mib) = cli.decode_limit {
        builder = builder.decode_limit(mib.saturating_mul(1 << 20));
    }
    let config = builder.build();
    let adjuster = RasterAdjuster::new(config);

    info!("Adjuster initialized");
    info!("Mode: {:?}", cli.mode);
    info!("Output directory: {}", cli.out_dir.display());

    let job = match (cli.mode, &cli.reference) {
        (Mode::Color, _) => Job::ColorBalance,
        (Mode::Border, _) => Job::RemoveBorder,
        (Mode::Brightness, Some(path)) => {
            let medians = adjuster.reference_medians(path)?;
            info!(reference = %path.display(), ?medians, "Reference medians");
            Job::Brightness(medians)
        }
        (Mode::Brightness, None) => anyhow::bail!("--reference is required in brightness mode"),
    };

    let mut failures = 0usize;
    for input in &cli.inputs {
        let result = adjuster.open(input).and_then(|mut image| {
            let no_data = cli.no_data.unwrap_or_else(|| image.no_data_value());
            match job {
                Job::ColorBalance => adjuster.adjust_color_balance(&image, no_data),
                Job::Brightness(medians) => adjuster.adjust_brightness(&mut image, medians, no_data),
                Job::RemoveBorder => adjuster.adjust_remove_border(&image),
            }
        });

        match result {
            Ok(output) => info!("{} -> {}", input.display(), output.display()),
            Err(e) => {
                failures += 1;
                error!("{}: {}", input.display(), e);
            }
        }
    }

    if failures > 0 {
        error!("{} of {} images failed", failures, cli.inputs.len());
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
