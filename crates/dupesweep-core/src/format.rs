//! Human-readable size formatting.

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Format a byte count by repeated division by 1024, picking the largest
/// unit in B..PB for which the value stays below 1024, with two-decimal
/// precision. Shared by the scanner, the size analyzer and the ledger.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in &UNITS[..UNITS.len() - 1] {
        if value < 1024.0 {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.2} PB")
}
