//! Numeric coercion for raw form text.
//!
//! Quantity and price cells keep whatever the user typed; these helpers pull
//! the leading numeric portion out of that text. A cell with no usable
//! number coerces to zero rather than failing the whole calculation.

/// Parses the leading integer portion of `input`, ignoring trailing garbage
/// ("12abc" -> 12, "3.7" -> 3). Returns `None` when no digits lead.
pub fn parse_integer_prefix(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let bytes = trimmed.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    trimmed[..end].parse().ok()
}

/// Parses the leading decimal portion of `input` ("12.5 kg" -> 12.5,
/// ".5" -> 0.5, "1e3x" -> 1000.0). Returns `None` when no number leads.
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let bytes = trimmed.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut cursor = frac_start;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        frac_digits = cursor - frac_start;
        if int_digits > 0 || frac_digits > 0 {
            end = cursor;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // An exponent only counts when at least one digit follows it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut cursor = end + 1;
        if cursor < bytes.len() && (bytes[cursor] == b'+' || bytes[cursor] == b'-') {
            cursor += 1;
        }
        let exp_start = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > exp_start {
            end = cursor;
        }
    }

    trimmed[..end].parse().ok()
}

/// Unit count for a quantity cell; anything unparseable counts as 0.
pub fn coerce_quantity(input: &str) -> i64 {
    parse_integer_prefix(input).unwrap_or(0)
}

/// Monetary amount for a price cell; anything unparseable counts as 0.
pub fn coerce_amount(input: &str) -> f64 {
    parse_float_prefix(input).unwrap_or(0.0)
}
