use super::{EventRow, Formatter};

pub struct CsvFormatter {
    verbose: bool,
}

impl CsvFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for CsvFormatter {
    fn format(&self, row: &EventRow) -> String {
        if self.verbose {
            format!(
                "{},{},{},{},{},{},{},{},{}",
                row.index,
                row.rise,
                row.fall,
                row.avg_freq,
                row.max_freq,
                row.slope_band,
                row.half_left,
                row.half_right,
                row.half_band
            )
        } else {
            format!(
                "{},{},{},{}",
                row.avg_freq, row.max_freq, row.slope_band, row.half_band
            )
        }
    }

    fn header(&self) -> Option<&'static str> {
        if self.verbose {
            Some("event,rise,fall,avg_freq,max_freq,slope_band,half_left,half_right,half_band")
        } else {
            Some("avg_freq,max_freq,slope_band,half_band")
        }
    }
}
