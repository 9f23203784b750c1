//! Rupiah and rate rendering helpers.

/// `1234567` -> `"Rp 1.234.567"`, Indonesian dot separators.
pub fn rupiah(amount: u64) -> String {
    format!("Rp {}", group_digits(amount, '.'))
}

/// `1234567` -> `"Rp1,234,567"`, compact comma-separated form.
pub fn rupiah_compact(amount: u64) -> String {
    format!("Rp{}", group_digits(amount, ','))
}

/// Percentage with two decimals, e.g. `"2.50%"`.
pub fn percent(rate: f64) -> String {
    format!("{:.2}%", rate)
}

/// Strip everything but ASCII digits from free text and parse the remainder.
/// Returns `None` when no digits remain or the value overflows.
pub fn parse_amount(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

fn group_digits(amount: u64, separator: char) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupiah_grouping() {
        assert_eq!(rupiah(0), "Rp 0");
        assert_eq!(rupiah(500), "Rp 500");
        assert_eq!(rupiah(1_000), "Rp 1.000");
        assert_eq!(rupiah(59_999_000), "Rp 59.999.000");
        assert_eq!(rupiah_compact(1_234_567), "Rp1,234,567");
    }

    #[test]
    fn percent_rendering() {
        assert_eq!(percent(2.5), "2.50%");
        assert_eq!(percent(10.0), "10.00%");
    }

    #[test]
    fn amount_parsing() {
        assert_eq!(parse_amount("Rp 1.234.567"), Some(1_234_567));
        assert_eq!(parse_amount("50,000,000"), Some(50_000_000));
        assert_eq!(parse_amount("no digits"), None);
        assert_eq!(parse_amount(""), None);
        // 30 digits overflows u64.
        assert_eq!(parse_amount(&"9".repeat(30)), None);
    }
}
