//! Human-readable formatting for legend and summary display

/// Format a model file size in bytes, e.g. `"3.56 GiB"`
pub fn format_model_size(bytes: u64) -> String {
    const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;

    let bytes = bytes as f64;
    if bytes >= GIB {
        format!("{:.2} GiB", bytes / GIB)
    } else if bytes >= MIB {
        format!("{:.2} MiB", bytes / MIB)
    } else {
        format!("{:.0} B", bytes)
    }
}

/// Format a parameter count, e.g. `"7.24 B"` or `"125.30 M"`
pub fn format_params(n_params: u64) -> String {
    let n = n_params as f64;
    if n >= 1e9 {
        format!("{:.2} B", n / 1e9)
    } else if n >= 1e6 {
        format!("{:.2} M", n / 1e6)
    } else {
        format!("{:.0}", n)
    }
}

/// Format a throughput measurement as `"mean ± stddev"`
pub fn format_throughput(mean: f64, stddev: f64) -> String {
    format!("{:.2} \u{00b1} {:.2}", mean, stddev)
}

/// Compact value formatting for chart axis labels
pub fn format_axis_value(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value >= 1.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_model_size() {
        assert_eq!(format_model_size(3_825_065_984), "3.56 GiB");
        assert_eq!(format_model_size(512 * 1024 * 1024), "512.00 MiB");
        assert_eq!(format_model_size(100), "100 B");
    }

    #[test]
    fn test_format_params() {
        assert_eq!(format_params(7_241_000_000), "7.24 B");
        assert_eq!(format_params(125_300_000), "125.30 M");
        assert_eq!(format_params(1_000), "1000");
    }

    #[test]
    fn test_format_throughput() {
        assert_eq!(format_throughput(5432.126, 12.3), "5432.13 ± 12.30");
    }

    #[test]
    fn test_format_axis_value() {
        assert_eq!(format_axis_value(2_500_000.0), "2.5M");
        assert_eq!(format_axis_value(5_432.1), "5.4K");
        assert_eq!(format_axis_value(123.4), "123");
        assert_eq!(format_axis_value(0.5), "0.50");
    }
}
