// src/showdown/numeric.rs
//! Numeric-role heuristics: money vs. wheel value vs. plain text.
//!
//! The same digits can be any of the three; the decision leans on token shape
//! plus the preceding token (a standalone `$` makes its successor money).

use crate::config::consts::*;

lazy_regex!(MONEY_SHAPE = r"^\$?\d{1,3}(?:,\d{3})*(?:\.\d+)?$");

const EDGE_PUNCT: &[char] = &[
    '$', ',', '+', '=', '>', '.', ';', ':', '!', '?', '(', ')', '[', ']', '"', '\'', '*',
];

fn core(tok: &str) -> &str {
    tok.trim_matches(EDGE_PUNCT)
}

/// Digits (with at most one decimal point) after stripping currency, separators
/// and edge punctuation. Anything else is not a number.
pub fn parse_number(tok: &str) -> Option<f64> {
    let cleaned: String = core(tok).chars().filter(|&c| c != ',' && c != '$').collect();
    if cleaned.is_empty()
        || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.')
        || cleaned.matches('.').count() > 1
        || !cleaned.chars().any(|c| c.is_ascii_digit())
    {
        return None;
    }
    cleaned.parse().ok()
}

/// Literal "1.00" / "1.0" without a currency sign.
pub fn is_quirk(tok: &str) -> bool {
    !tok.contains('$') && QUIRK_LITERALS.contains(&core(tok))
}

/// Numeric value in wheel terms: the quirk maps to 100, everything else parses as-is.
/// Not range-gated.
pub fn spin_value(tok: &str) -> Option<f64> {
    if is_quirk(tok) {
        return Some(QUIRK_VALUE);
    }
    parse_number(tok)
}

/// A plausible spin: value in [5,100] or the quirk literal.
pub fn classify_spin(tok: &str) -> Option<f64> {
    spin_value(tok).filter(|v| (SPIN_MIN..=SPIN_MAX).contains(v))
}

/// On the wheel grid: a multiple of 5 in [5,100].
pub fn is_wheel_value(v: f64) -> bool {
    if !(SPIN_MIN - EPS..=SPIN_MAX + EPS).contains(&v) {
        return false;
    }
    let steps = (v / SPIN_STEP).round();
    (steps * SPIN_STEP - v).abs() < EPS
}

/// Money if it follows a currency sign (standalone or fused), or if it carries
/// a separator / decimal point, or exceeds the floor. Small bare numbers and the
/// quirk literal are left to the spin side.
pub fn classify_money(tok: &str, prev: Option<&str>) -> Option<f64> {
    if tok == CURRENCY_SIGN {
        return None;
    }
    let v = parse_number(tok)?;
    if prev == Some(CURRENCY_SIGN) || tok.starts_with(CURRENCY_SIGN) {
        return Some(v);
    }
    if is_quirk(tok) {
        return None;
    }
    let c = core(tok);
    if c.contains(',') || c.contains('.') || v > MONEY_FLOOR {
        return Some(v);
    }
    None
}

/// `$1,234` / `1,234.50` shape. Stray punctuation such as `$1,00` fails.
pub fn is_well_formed_money(tok: &str) -> bool {
    MONEY_SHAPE.is_match(tok.trim_end_matches(['+', ',', '.', ';', ':']))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenRole {
    CurrencySign,
    Money(f64),
    Number(f64),
    Text,
}

/// Role of `tokens[i]` given its neighbourhood.
pub fn role(tokens: &[String], i: usize) -> TokenRole {
    let tok = tokens[i].as_str();
    if tok == CURRENCY_SIGN {
        return TokenRole::CurrencySign;
    }
    let prev = i.checked_sub(1).map(|p| tokens[p].as_str());
    if let Some(v) = classify_money(tok, prev) {
        return TokenRole::Money(v);
    }
    match spin_value(tok) {
        Some(v) => TokenRole::Number(v),
        None => TokenRole::Text,
    }
}

/// `tokens[i]` carries a currency sign, fused or as the token before it.
pub fn is_currency_marked(tokens: &[String], i: usize) -> bool {
    tokens[i].contains(CURRENCY_SIGN)
        || i.checked_sub(1).is_some_and(|p| tokens[p] == CURRENCY_SIGN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn quirk_literal_is_one_hundred() {
        assert_eq!(classify_spin("1.00"), Some(100.0));
        assert_eq!(classify_spin("1.0"), Some(100.0));
        assert_eq!(spin_value("1.00+"), Some(100.0));
        // with a currency sign it is one dollar, not a spin
        assert_eq!(spin_value("$1.00"), Some(1.0));
        assert_eq!(classify_money("1.00", None), None);
    }

    #[test]
    fn parse_number_strips_decoration() {
        assert_eq!(parse_number("3,413+"), Some(3413.0));
        assert_eq!(parse_number("$1,000"), Some(1000.0));
        assert_eq!(parse_number("=75"), Some(75.0));
        assert_eq!(parse_number("(35)"), Some(35.0));
        assert_eq!(parse_number("+"), None);
        assert_eq!(parse_number("Nan"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("2nd"), None);
        assert_eq!(parse_number("1.2.3"), None);
    }

    #[test]
    fn money_needs_sign_separator_or_size() {
        assert_eq!(classify_money("1,000", None), Some(1000.0));
        assert_eq!(classify_money("1000", None), Some(1000.0));
        assert_eq!(classify_money("150", None), None);
        assert_eq!(classify_money("150", Some("$")), Some(150.0));
        assert_eq!(classify_money("$150", None), Some(150.0));
        assert_eq!(classify_money("35,", None), None);
        assert_eq!(classify_money("$", None), None);
        assert_eq!(classify_money("Pat", None), None);
    }

    #[test]
    fn off_grid_values_still_classify_as_spins() {
        assert_eq!(classify_spin("37"), Some(37.0));
        assert!(!is_wheel_value(37.0));
        assert!(is_wheel_value(35.0));
        assert!(is_wheel_value(100.0));
        assert!(!is_wheel_value(105.0));
        assert!(!is_wheel_value(0.0));
        assert_eq!(classify_spin("120"), None);
    }

    #[test]
    fn money_shape() {
        assert!(is_well_formed_money("$1,000"));
        assert!(is_well_formed_money("3,413+"));
        assert!(is_well_formed_money("1,234.50"));
        assert!(!is_well_formed_money("$1,00"));
        assert!(!is_well_formed_money("1000,0"));
    }

    #[test]
    fn role_uses_previous_token() {
        let t = toks(&["$", "150", "Pat", "35", "1,000", "1.00"]);
        assert_eq!(role(&t, 0), TokenRole::CurrencySign);
        assert_eq!(role(&t, 1), TokenRole::Money(150.0));
        assert_eq!(role(&t, 2), TokenRole::Text);
        assert_eq!(role(&t, 3), TokenRole::Number(35.0));
        assert_eq!(role(&t, 4), TokenRole::Money(1000.0));
        assert_eq!(role(&t, 5), TokenRole::Number(100.0));
    }
}
