use std::io::Read;
use std::path::Path;

use hound::WavReader;

use super::{FrameSource, Frames};
use crate::error::{PeakError, Result};

/// Frame source over one channel of a WAV recording
pub struct WavFrameSource {
    samples: Vec<f64>,
    frame_size: usize,
    sample_rate: u32,
}

impl WavFrameSource {
    /// Open a WAV file and keep the samples of `channel`
    pub fn open<P: AsRef<Path>>(path: P, frame_size: usize, channel: u16) -> Result<Self> {
        let reader = WavReader::open(path.as_ref())?;
        Self::from_reader(reader, frame_size, channel)
    }

    pub fn from_reader<R: Read>(
        reader: WavReader<R>,
        frame_size: usize,
        channel: u16,
    ) -> Result<Self> {
        if frame_size == 0 {
            return Err(PeakError::InvalidParameter(
                "frame_size must be at least 1".to_string(),
            ));
        }

        let spec = reader.spec();
        if channel >= spec.channels {
            return Err(PeakError::Source(format!(
                "channel {} requested from a {}-channel recording",
                channel, spec.channels
            )));
        }

        let interleaved = Self::read_samples(reader, &spec)?;
        let samples: Vec<f64> = interleaved
            .into_iter()
            .skip(channel as usize)
            .step_by(spec.channels as usize)
            .collect();

        log::debug!(
            "loaded {} samples at {} Hz from channel {}",
            samples.len(),
            spec.sample_rate,
            channel
        );

        Ok(Self {
            samples,
            frame_size,
            sample_rate: spec.sample_rate,
        })
    }

    fn read_samples<R: Read>(mut reader: WavReader<R>, spec: &hound::WavSpec) -> Result<Vec<f64>> {
        let samples = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .map(|s| s.map(f64::from))
                .collect::<std::result::Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => {
                let max_val = 2_i64.pow(spec.bits_per_sample as u32 - 1) as f64;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f64 / max_val))
                    .collect::<std::result::Result<Vec<_>, _>>()?
            }
        };
        Ok(samples)
    }

    /// Total number of whole frames in the recording
    pub fn available_frames(&self) -> usize {
        self.samples.len() / self.frame_size
    }
}

impl FrameSource for WavFrameSource {
    fn read_frames(&mut self, frame_count: usize, frame_offset: usize) -> Result<Frames> {
        let available = self.samples.len();
        let start = frame_offset
            .checked_mul(self.frame_size)
            .ok_or_else(|| {
                PeakError::InvalidParameter(format!("frame offset {} is too large", frame_offset))
            })?;
        let needed = frame_offset
            .checked_add(frame_count)
            .and_then(|frames| frames.checked_mul(self.frame_size))
            .ok_or(PeakError::InsufficientData {
                needed: usize::MAX,
                available,
            })?;
        if needed > available {
            return Err(PeakError::InsufficientData { needed, available });
        }

        let frames = self.samples[start..needed]
            .chunks_exact(self.frame_size)
            .map(|chunk| chunk.to_vec())
            .collect();

        Ok(Frames {
            frames,
            sample_rate: self.sample_rate,
        })
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn frame_size(&self) -> usize {
        self.frame_size
    }
}
