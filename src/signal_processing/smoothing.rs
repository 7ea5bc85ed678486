use crate::error::{PeakError, Result};

/// Smooth a signal with a repeated centred moving average
///
/// Each pass replaces every sample with the mean of the `width` samples
/// centred on it. Windows shrink near the ends so the output has the same
/// length as the input. Running the flat kernel `shape + 1` times gives a
/// progressively more bell-shaped response: `shape = 0` is a plain box
/// filter, `shape = 1` a triangle.
///
/// # Arguments
/// * `signal` - Samples to smooth
/// * `width` - Window size in samples (at least 1)
/// * `shape` - Number of extra smoothing passes
pub fn smooth(signal: &[f64], width: usize, shape: usize) -> Result<Vec<f64>> {
    if width == 0 {
        return Err(PeakError::InvalidParameter(
            "smoothing width must be at least 1".to_string(),
        ));
    }

    let mut out = signal.to_vec();
    if width == 1 || out.is_empty() {
        return Ok(out);
    }

    for _ in 0..=shape {
        out = box_pass(&out, width);
    }
    Ok(out)
}

fn box_pass(signal: &[f64], width: usize) -> Vec<f64> {
    let len = signal.len();
    let before = (width - 1) / 2;
    let after = width / 2;

    let mut prefix = Vec::with_capacity(len + 1);
    prefix.push(0.0);
    let mut acc = 0.0;
    for &x in signal {
        acc += x;
        prefix.push(acc);
    }

    (0..len)
        .map(|i| {
            let start = i.saturating_sub(before);
            let end = i.saturating_add(after).saturating_add(1).min(len);
            (prefix[end] - prefix[start]) / (end - start) as f64
        })
        .collect()
}
