//! # Money Module
//!
//! Parsing and display rules for monetary amounts.
//!
//! ## Two Display Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE DISPLAY ASYMMETRY                                                  │
//! │                                                                         │
//! │  Total bill on screen (export text drops the grouping):                 │
//! │    1234.5   → "1,234.5"     natural digits + thousands grouping        │
//! │    300      → "300"         no forced decimals                         │
//! │                                                                         │
//! │  Per-person amounts (what each person pays):                            │
//! │    92       → "92.00"       always exactly two decimals                │
//! │    164000   → "164000.00"   no grouping                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why f64?
//! Shares are an exact floating-point division of the total and conversion
//! is a single multiplication by a provider rate. Rounding happens only when
//! an amount is rendered, so repeated calculations stay byte-identical.
//!
//! ## Usage
//! ```rust
//! use splitpay_core::money::{format_fixed, format_total, parse_amount};
//!
//! assert_eq!(parse_amount(" 1500.5 "), Some(1500.5));
//! assert_eq!(format_total(1500.5), "1,500.5");
//! assert_eq!(format_fixed(92.0), "92.00");
//! ```

/// Parses a user-typed amount.
///
/// Returns `None` for blank, non-numeric and non-finite input (`"inf"`,
/// `"NaN"`). Sign and range are checked by the validation layer.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Renders an amount with exactly two fractional digits.
///
/// Used for every per-person figure. Negative zero renders as `"0.00"`.
/// A conversion that overflowed renders as `"inf"`.
pub fn format_fixed(amount: f64) -> String {
    let formatted = format!("{:.2}", amount);
    if formatted == "-0.00" {
        return "0.00".to_string();
    }
    formatted
}

/// Renders the bill total: shortest round-trip digits with the integer part
/// grouped in thousands.
///
/// ## Example
/// ```rust
/// use splitpay_core::money::format_total;
///
/// assert_eq!(format_total(300.0), "300");
/// assert_eq!(format_total(1234567.25), "1,234,567.25");
/// ```
pub fn format_total(amount: f64) -> String {
    let natural = amount.to_string();
    let (sign, unsigned) = match natural.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", natural.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(natural.len() + whole.len() / 3);
    out.push_str(sign);
    out.push_str(&group_thousands(whole));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Inserts `,` every three digits from the right of a run of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// Prefixes a rendered amount with its currency symbol.
#[inline]
pub fn with_symbol(symbol: &str, rendered: &str) -> String {
    format!("{symbol}{rendered}")
}

// =============================================================================
// Unit Tests
// =============================================================================
