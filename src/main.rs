use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use slopepeak::SlopePeakFinder;
use slopepeak::config::{AnalysisConfig, AxisUnit};
use slopepeak::output::{BandwidthSummary, OutputFormat, create_formatter, event_rows};
use slopepeak::signal_processing::power_spectrum;
use slopepeak::source::{FrameSource, WavFrameSource};

#[derive(Parser, Debug)]
#[command(name = "slopepeak")]
#[command(about = "Find slope-delimited peaks in the spectrum of a recording", long_about = None)]
struct Args {
    /// WAV recording to analyze
    file: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Smoothing and derivative window in bins
    #[arg(short, long)]
    width: Option<usize>,

    /// Slope threshold for edge detection
    #[arg(short = 't', long)]
    slope_threshold: Option<f64>,

    /// Extra smoothing passes (kernel shape)
    #[arg(long)]
    shape: Option<usize>,

    /// Number of frames to read
    #[arg(long)]
    frame_count: Option<usize>,

    /// First frame to read
    #[arg(long)]
    frame_offset: Option<usize>,

    /// Samples per frame
    #[arg(long)]
    frame_size: Option<usize>,

    /// FFT length (default: frame size rounded up to a power of two)
    #[arg(long)]
    fft_length: Option<usize>,

    /// Channel to analyze
    #[arg(long)]
    channel: Option<u16>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Unit of the frequency columns: bins, mhz
    #[arg(short = 'a', long, value_enum, default_value = "bins")]
    axis: AxisUnit,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn build_config(args: &Args) -> anyhow::Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(width) = args.width {
        config.smoothing.width = width;
    }
    if let Some(shape) = args.shape {
        config.smoothing.shape = shape;
    }
    if let Some(threshold) = args.slope_threshold {
        config.detection.slope_threshold = threshold;
    }
    if let Some(count) = args.frame_count {
        config.source.frame_count = count;
    }
    if let Some(offset) = args.frame_offset {
        config.source.frame_offset = offset;
    }
    if let Some(size) = args.frame_size {
        config.source.frame_size = size;
    }
    if let Some(channel) = args.channel {
        config.source.channel = channel;
    }
    if args.fft_length.is_some() {
        config.spectrum.fft_length = args.fft_length;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = build_config(&args)?;

    let mut source =
        WavFrameSource::open(&args.file, config.source.frame_size, config.source.channel)
            .with_context(|| format!("opening {}", args.file.display()))?;
    let frames = source
        .read_frames(config.source.frame_count, config.source.frame_offset)
        .with_context(|| format!("reading frames from {}", args.file.display()))?;

    let fft_length = config.spectrum.resolve_fft_length(frames.frame_size());
    log::info!(
        "{} frames of {} samples at {} Hz, fft length {}",
        frames.len(),
        frames.frame_size(),
        frames.sample_rate,
        fft_length
    );

    let spectrum = power_spectrum(&frames.frames, fft_length)?;
    let finder = SlopePeakFinder::new(&config.smoothing, &config.detection)?;
    let result = finder.run(&spectrum)?;

    let scale = args.axis.bin_scale(frames.sample_rate, fft_length);
    let rows = event_rows(&result.measurements, scale);

    let formatter = create_formatter(args.format, args.verbose > 0, args.axis.label());
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }
    for row in &rows {
        println!("{}", formatter.format(row));
    }

    if matches!(args.format, OutputFormat::Text) {
        eprintln!();
        eprintln!("{} events in {}", rows.len(), args.file.display());
        if let Some(summary) = BandwidthSummary::from_rows(&rows) {
            eprintln!(
                "  Slope band: {:.4} ± {:.4} {} (min {:.4}, max {:.4})",
                summary.slope_band.mean,
                summary.slope_band.std_dev,
                args.axis.label(),
                summary.slope_band.min,
                summary.slope_band.max
            );
            eprintln!(
                "  Half band:  {:.4} ± {:.4} {} (min {:.4}, max {:.4})",
                summary.half_band.mean,
                summary.half_band.std_dev,
                args.axis.label(),
                summary.half_band.min,
                summary.half_band.max
            );
        }
    }

    Ok(())
}
