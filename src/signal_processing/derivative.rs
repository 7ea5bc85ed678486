use crate::error::{PeakError, Result};

/// Windowed slope estimate of a signal
///
/// For every index `i` the slope is the sum of the `n` samples to the right
/// of `i` minus the sum of the `n` samples to its left:
///
/// ```text
/// slope[i] = x[i+1..=i+n].sum() - x[i-n..i].sum()
/// ```
///
/// This is the same as smoothing with an `n`-point flat kernel and taking
/// the difference of the smoothed values `n` samples either side of `i`.
/// A large `n` rejects noise but flattens narrow peaks; a small `n` keeps
/// narrow peaks but follows the noise.
///
/// Indices closer than `n` to either end have no full window and are left
/// at zero.
///
/// # Arguments
/// * `signal` - Source samples
/// * `n` - Half window in samples, `1 <= n` and `2 * n < signal.len()`
///
/// # Returns
/// Slope signal of the same length, or an empty vector for an empty input
pub fn slope(signal: &[f64], n: usize) -> Result<Vec<f64>> {
    let len = signal.len();
    if len == 0 {
        return Ok(Vec::new());
    }
    if n == 0 {
        return Err(PeakError::InvalidParameter(
            "derivative window must be at least 1".to_string(),
        ));
    }
    if n >= len.div_ceil(2) {
        return Err(PeakError::InvalidParameter(format!(
            "derivative window {} must be less than half the signal length {}",
            n, len
        )));
    }

    // prefix[k] = signal[0..k].sum()
    let mut prefix = Vec::with_capacity(len + 1);
    prefix.push(0.0);
    let mut acc = 0.0;
    for &x in signal {
        acc += x;
        prefix.push(acc);
    }

    let mut out = vec![0.0; len];
    for (i, slot) in out.iter_mut().enumerate().take(len - n).skip(n) {
        let right = prefix[i + n + 1] - prefix[i + 1];
        let left = prefix[i] - prefix[i - n];
        *slot = right - left;
    }

    Ok(out)
}
