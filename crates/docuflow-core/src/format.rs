//! Display formatting helpers shared with API clients.

/// Units for base-1024 file sizes.
const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Format a byte count using base-1024 units, rounded to at most two
/// decimal places. Trailing zeros are dropped (`1.00 KB` renders `1 KB`).
///
/// Clients render sizes with this exact rule, so the output is part of the
/// compatibility surface:
///
/// ```
/// use docuflow_core::format::format_file_size;
///
/// assert_eq!(format_file_size(0), "0 Bytes");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);

    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, UNITS[exponent])
    } else {
        // Up to two decimals, trailing zeros trimmed.
        let text = format!("{rounded:.2}");
        let text = text.trim_end_matches('0').trim_end_matches('.');
        format!("{} {}", text, UNITS[exponent])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_bytes() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn test_exact_units() {
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(1_073_741_824), "1 GB");
    }

    #[test]
    fn test_fractional_sizes() {
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1234), "1.21 KB");
        assert_eq!(format_file_size(500), "500 Bytes");
    }

    #[test]
    fn test_large_sizes_cap_at_tb() {
        let two_tb = 2 * 1024_u64.pow(4);
        assert_eq!(format_file_size(two_tb), "2 TB");
    }
}
