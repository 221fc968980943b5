//! Display formatting for report amounts and ratios.
//!
//! Both helpers are total: every `f64` produces a string. Non-finite
//! inputs render as zero, and values that round to zero never carry a
//! minus sign.

/// Currency symbol prefixed to formatted amounts.
pub const CURRENCY_SYMBOL: &str = "$";

/// Thousands separator used by [`format_currency`].
const THOUSANDS_SEPARATOR: char = ',';

/// Format an amount as `$1,234.56`. Negative amounts render as `-$1,234.56`.
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };

    // Saturating float -> int cast; amounts beyond u128 are not meaningful here.
    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = cents / 100;
    let fraction = cents % 100;

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}{CURRENCY_SYMBOL}{}.{fraction:02}",
        group_thousands(whole)
    )
}

/// Format a fraction as a percentage: `0.25` becomes `25.00%`.
pub fn format_percentage(fraction: f64) -> String {
    let value = if fraction.is_finite() {
        fraction * 100.0
    } else {
        0.0
    };
    let text = format!("{value:.2}");
    match text.strip_prefix('-') {
        Some(unsigned) if unsigned.bytes().all(|b| b == b'0' || b == b'.') => {
            format!("{unsigned}%")
        }
        _ => format!("{text}%"),
    }
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}
