//! Human-readable optimization summaries.

use std::fmt;

use serde::Serialize;

const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];

/// Format a byte count with binary units and one decimal place, dropping a
/// trailing `.0` (`0 Bytes`, `512 Bytes`, `280.5 KB`, `20 MB`).
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut exponent = 0;
    while value >= 1024.0 && exponent < UNITS.len() - 1 {
        value /= 1024.0;
        exponent += 1;
    }
    let rounded = (value * 10.0).round() / 10.0;

    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, UNITS[exponent])
    } else {
        format!("{:.1} {}", rounded, UNITS[exponent])
    }
}

/// Before/after summary of one normalized image.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OptimizationReport {
    pub original_size: u64,
    pub compressed_size: u64,
    /// Side of the square output, in pixels
    pub side: u32,
    pub quality: f32,
    pub encode_passes: u8,
}

impl OptimizationReport {
    /// Percentage saved relative to the original, rounded. Negative when the
    /// re-encoded image is larger.
    pub fn savings_percent(&self) -> i64 {
        if self.original_size == 0 {
            return 0;
        }
        let saved = self.original_size as f64 - self.compressed_size as f64;
        (saved / self.original_size as f64 * 100.0).round() as i64
    }
}

impl fmt::Display for OptimizationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Optimized: {} -> {} ({}% smaller, {}x{}px)",
            format_file_size(self.original_size),
            format_file_size(self.compressed_size),
            self.savings_percent(),
            self.side,
            self.side
        )
    }
}
