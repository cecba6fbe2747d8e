use crate::config::CurrencyConfig;

/// Formats an amount with the configured symbol and separators:
/// `1234567.891` → `R$ 1.234.567,89`, `-5.0` → `-R$ 5,00`.
pub fn format_currency(amount: f64, currency: &CurrencyConfig) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    format!(
        "{sign}{} {}{}{frac_part}",
        currency.symbol,
        group_digits(int_part, &currency.thousands_separator),
        currency.decimal_separator,
    )
}

/// `12345` → `12.345` with `.` as separator.
pub fn format_count(value: usize, separator: &str) -> String {
    group_digits(&value.to_string(), separator)
}

/// Fixed decimals with the configured decimal separator: `1.33` → `1,33`.
pub fn format_decimal(value: f64, decimals: usize, currency: &CurrencyConfig) -> String {
    let fixed = format!("{:.*}", decimals, value);
    match fixed.split_once('.') {
        Some((int_part, frac_part)) => format!(
            "{}{}{frac_part}",
            group_digits(int_part, &currency.thousands_separator),
            currency.decimal_separator
        ),
        None => group_digits(&fixed, &currency.thousands_separator),
    }
}

fn group_digits(digits: &str, separator: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len() + 1);
    out.push_str(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}
