use slopepeak::save_wav;
use slopepeak::signal_processing::power_spectrum;
use slopepeak::simulation::{Tone, generate_tones};
use slopepeak::source::{FrameSource, WavFrameSource};
use slopepeak::PeakError;

const SAMPLE_RATE: u32 = 48_000;
const FRAME_SIZE: usize = 1024;

fn write_tone_wav(dir: &tempfile::TempDir, bin: usize) -> std::path::PathBuf {
    let tone = Tone {
        frequency_hz: bin as f64 * SAMPLE_RATE as f64 / FRAME_SIZE as f64,
        amplitude: 0.5,
    };
    let samples = generate_tones(FRAME_SIZE * 12, SAMPLE_RATE, &[tone], 0.01, 42).unwrap();
    let path = dir.path().join("tone.wav");
    save_wav(&path, &samples, SAMPLE_RATE).unwrap();
    path
}

#[test]
fn test_reads_requested_frames() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_tone_wav(&dir, 100);

    let mut source = WavFrameSource::open(&path, FRAME_SIZE, 0).unwrap();
    assert_eq!(source.sample_rate(), SAMPLE_RATE);
    assert_eq!(source.available_frames(), 12);

    let frames = source.read_frames(10, 2).unwrap();
    assert_eq!(frames.len(), 10);
    assert_eq!(frames.frame_size(), FRAME_SIZE);
    assert_eq!(frames.sample_rate, SAMPLE_RATE);
}

#[test]
fn test_reading_past_the_end_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_tone_wav(&dir, 100);

    let mut source = WavFrameSource::open(&path, FRAME_SIZE, 0).unwrap();
    let err = source.read_frames(10, 10);
    assert!(matches!(err, Err(PeakError::InsufficientData { .. })));
}

#[test]
fn test_huge_frame_requests_fail_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_tone_wav(&dir, 100);

    let mut source = WavFrameSource::open(&path, FRAME_SIZE, 0).unwrap();
    assert!(matches!(
        source.read_frames(1, usize::MAX),
        Err(PeakError::InvalidParameter(_))
    ));
    assert!(matches!(
        source.read_frames(usize::MAX, 1),
        Err(PeakError::InsufficientData { .. })
    ));
    assert!(matches!(
        source.read_frames(usize::MAX / FRAME_SIZE, 0),
        Err(PeakError::InsufficientData { .. })
    ));
}

#[test]
fn test_missing_channel_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_tone_wav(&dir, 100);
    assert!(matches!(
        WavFrameSource::open(&path, FRAME_SIZE, 1),
        Err(PeakError::Source(_))
    ));
}

#[test]
fn test_missing_file_is_a_source_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = WavFrameSource::open(dir.path().join("absent.wav"), FRAME_SIZE, 0);
    assert!(matches!(err, Err(PeakError::Source(_))));
}

#[test]
fn test_tone_dominates_its_bin() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_tone_wav(&dir, 100);

    let mut source = WavFrameSource::open(&path, FRAME_SIZE, 0).unwrap();
    let frames = source.read_frames(10, 1).unwrap();
    let spectrum = power_spectrum(&frames.frames, FRAME_SIZE).unwrap();

    assert_eq!(spectrum.len(), FRAME_SIZE / 2);
    let peak = spectrum
        .iter()
        .enumerate()
        .fold(0, |best, (i, &x)| if x > spectrum[best] { i } else { best });
    assert_eq!(peak, 100);
    assert!(spectrum[100] > spectrum[50] + 1.0);
}
