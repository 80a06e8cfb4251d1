use rust_decimal::Decimal;
use std::str::FromStr;

/// Locale-tolerant text-to-number conversion.
///
/// Strips everything that is not a digit, comma, period or minus, treats the
/// first comma as a decimal separator, then parses the longest leading
/// numeric token. Returns 0 on empty input or anything unparseable.
///
/// Known approximation: a value carrying both a thousands-separator comma and
/// a decimal point gets corrupted by the single substitution ("1,234.56"
/// parses as 1.234). The two supported report dialects never emit that
/// combination.
pub fn extract_number(text: &str) -> Decimal {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(*c, ',' | '.' | '-'))
        .collect();
    let normalized = cleaned.replacen(',', ".", 1);
    match leading_numeric_token(&normalized) {
        Some(token) => Decimal::from_str(&token).unwrap_or(Decimal::ZERO),
        None => Decimal::ZERO,
    }
}

/// Longest leading token of the form `-?digits[.digits]`, the way a
/// permissive float parser reads a prefix. None when no digit is found.
fn leading_numeric_token(s: &str) -> Option<String> {
    let mut token = String::new();
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '-' if i == 0 => token.push(c),
            '0'..='9' => {
                seen_digit = true;
                token.push(c);
            }
            '.' if !seen_dot => {
                seen_dot = true;
                token.push(c);
            }
            _ => break,
        }
    }
    if !seen_digit {
        return None;
    }
    if token.ends_with('.') {
        token.pop();
    }
    if let Some(rest) = token.strip_prefix("-.") {
        token = format!("-0.{rest}");
    } else if let Some(rest) = token.strip_prefix('.') {
        token = format!("0.{rest}");
    }
    Some(token)
}
