//! Display formatting helpers shared by the commands and the dashboard.

use crate::models::LatencyBreakdown;

/// Dollar amounts: cents below $1000, whole dollars with separators above.
pub fn format_currency(amount: f64) -> String {
    if amount >= 1000.0 {
        format!("${}", format_number(amount.round() as u64))
    } else {
        format!("${:.2}", amount)
    }
}

pub fn format_currency_precise(amount: f64, precision: usize) -> String {
    if amount >= 1000.0 {
        format!("${}", format_number(amount.round() as u64))
    } else {
        format!("${:.*}", precision, amount)
    }
}

/// Thousands separators for large counts.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// (ttft, decode, total, throughput) ready for display.
pub fn format_latency(latency: &LatencyBreakdown) -> (String, String, String, String) {
    let (ttft, decode) = latency.llm_phases();
    (
        format!("{:.2}s", ttft),
        format!("{:.2}s", decode),
        format!("{:.2}s", latency.total()),
        format!("{:.0} tok/s", latency.throughput()),
    )
}

/// Signed percentage, e.g. `+12.5%` / `-99.1%`.
pub fn format_percentage(value: f64) -> String {
    format!("{:+.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_switches_precision_at_1000() {
        assert_eq!(format_currency(3.6228), "$3.62");
        assert_eq!(format_currency(999.994), "$999.99");
        assert_eq!(format_currency(1000.4), "$1,000");
        assert_eq!(format_currency(108_684.0), "$108,684");
    }

    #[test]
    fn number_grouping() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(600_050), "600,050");
        assert_eq!(format_number(1_000_000), "1,000,000");
    }

    #[test]
    fn percentage_carries_sign() {
        assert_eq!(format_percentage(12.34), "+12.3%");
        assert_eq!(format_percentage(-99.06), "-99.1%");
    }
}
