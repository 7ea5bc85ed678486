use super::{EventRow, Formatter};

pub struct TextFormatter {
    verbose: bool,
    unit: &'static str,
}

impl TextFormatter {
    pub fn new(verbose: bool, unit: &'static str) -> Self {
        Self { verbose, unit }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, row: &EventRow) -> String {
        if self.verbose {
            format!(
                "Event {:>3}: peak {:>10.4} {} (avg {:>10.4}) edges [{:.4}, {:.4}] band {:.4} half [{:.4}, {:.4}] half-band {:.4}",
                row.index,
                row.max_freq,
                self.unit,
                row.avg_freq,
                row.rise,
                row.fall,
                row.slope_band,
                row.half_left,
                row.half_right,
                row.half_band
            )
        } else {
            format!(
                "Event {:>3}: peak {:>10.4} {} (avg {:>10.4}) band {:.4} half-band {:.4}",
                row.index, row.max_freq, self.unit, row.avg_freq, row.slope_band, row.half_band
            )
        }
    }
}
