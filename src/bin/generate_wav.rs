use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Deserialize;
use slopepeak::save_wav;
use slopepeak::simulation::{Tone, generate_tones};

#[derive(Parser, Debug)]
#[command(name = "generate_wav")]
#[command(about = "Generate synthetic multi-tone WAV recordings for peak analysis")]
struct Args {
    /// Output WAV file
    #[arg(short, long, default_value = "data/synthetic/tones.wav")]
    output: PathBuf,

    /// TOML file with a [[tones]] list
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tones as comma-separated freq:amplitude pairs (e.g., "1000:0.5,2500:0.2")
    #[arg(short, long)]
    tones: Option<String>,

    /// Recording length in samples
    #[arg(short = 'n', long, default_value_t = 96_000)]
    samples: usize,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 48_000)]
    sample_rate: u32,

    /// Standard deviation of additive white noise
    #[arg(long, default_value_t = 0.01)]
    noise_std: f64,

    /// Noise seed
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
}

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    #[serde(default)]
    tones: Vec<Tone>,
}

fn parse_tones(s: &str) -> Result<Vec<Tone>> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            let (freq, amp) = part
                .split_once(':')
                .with_context(|| format!("expected freq:amplitude, got {:?}", part))?;
            Ok(Tone {
                frequency_hz: freq.trim().parse().context("invalid tone frequency")?,
                amplitude: amp.trim().parse().context("invalid tone amplitude")?,
            })
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut tones = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config: TomlConfig = toml::from_str(&text).context("parsing tone config")?;
            config.tones
        }
        None => Vec::new(),
    };
    if let Some(spec) = &args.tones {
        tones.extend(parse_tones(spec)?);
    }
    if tones.is_empty() {
        bail!("no tones given; use --tones or --config");
    }

    let nyquist = args.sample_rate as f64 / 2.0;
    if let Some(tone) = tones.iter().find(|t| t.frequency_hz >= nyquist) {
        bail!(
            "tone at {} Hz is above Nyquist ({} Hz)",
            tone.frequency_hz,
            nyquist
        );
    }

    let samples = generate_tones(
        args.samples,
        args.sample_rate,
        &tones,
        args.noise_std,
        args.seed,
    )?;

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    save_wav(&args.output, &samples, args.sample_rate)
        .with_context(|| format!("writing {}", args.output.display()))?;

    log::info!("{} tones, {} samples", tones.len(), samples.len());
    println!("Wrote {}", args.output.display());
    Ok(())
}
