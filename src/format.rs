//! Number parsing and display helpers.

/// Thousands separator used for display and stripped before parsing.
pub const SEPARATOR: char = ',';

/// Remove every thousands separator from `input`.
pub fn strip_separators(input: &str) -> String {
    input.chars().filter(|&c| c != SEPARATOR).collect()
}

/// Strict decimal parse: digits with at most one `.`, no sign, exponent or
/// whitespace. `"5."` and `".5"` are accepted so a value can be typed one
/// character at a time.
pub fn parse_decimal(input: &str) -> Option<f64> {
    let mut digits = 0;
    let mut dots = 0;
    for c in input.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return None,
        }
    }
    if digits == 0 || dots > 1 {
        return None;
    }

    let value: f64 = input.parse().ok()?;
    value.is_finite().then_some(value)
}

/// Insert a separator every three digits of the integer part, counting left
/// from the decimal point. The fractional part is left alone.
pub fn format_with_commas(input: &str) -> String {
    let (int_part, frac_part) = match input.find('.') {
        Some(idx) => input.split_at(idx),
        None => (input, ""),
    };
    let int_digits = strip_separators(int_part);

    let len = int_digits.chars().count();
    let mut out = String::with_capacity(len + len / 3 + frac_part.len());
    for (i, c) in int_digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(SEPARATOR);
        }
        out.push(c);
    }
    out.push_str(frac_part);
    out
}

/// Round half away from zero to two decimal places.
///
/// Values too large to scale by 100 have no fractional cents and are
/// returned as they are.
pub fn round_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

/// Render an amount with two decimals and thousands separators.
pub fn format_currency(value: f64) -> String {
    format_with_commas(&format!("{:.2}", round_cents(value)))
}
