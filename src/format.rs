//! Price formatting, kept apart from the estimator so prices can be checked
//! as plain numbers.

/// Turns a whole RON amount into display text.
pub trait PriceFormatter {
    fn format_price(&self, amount: u64) -> String;
}

/// Romanian convention: `.` between groups of three digits, no decimals.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RomanianFormatter;

impl PriceFormatter for RomanianFormatter {
    fn format_price(&self, amount: u64) -> String {
        group_digits(amount, '.')
    }
}

/// Insert `separator` between every group of three digits, counted from the right.
pub fn group_digits(amount: u64, separator: char) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(digit);
    }
    out
}
