//! # Summary Module
//!
//! Plain-text export of a [`SplitResult`].
//!
//! ## Export Layout
//! ```text
//! Bill Split Results:
//! Total: $300
//! Split 3 ways:
//!
//! Alice: $100.00
//! Bob: €92.00
//! Carol: ₦164000.00
//! ```
//!
//! The same bytes feed both "copy" and "share"; the sinks differ, the text
//! does not. Lines are joined with `\n` and there is no trailing newline.
//! The total keeps the digits as parsed, without thousands grouping.

use crate::types::SplitResult;

/// Title handed to share sheets alongside the summary text.
pub const SHARE_TITLE: &str = "Bill Split Results";

/// Builds the export text for `result`.
///
/// ## Example
/// ```rust
/// use splitpay_core::{summary_text, ResultPerson, SplitResult};
///
/// let result = SplitResult {
///     total_amount: 50.0,
///     base_currency: "GBP".to_string(),
///     base_symbol: "£".to_string(),
///     amount_per_person: 50.0,
///     people: vec![ResultPerson {
///         name: "Ada".to_string(),
///         currency: "GBP".to_string(),
///         amount: 50.0,
///         symbol: "£".to_string(),
///     }],
/// };
///
/// assert_eq!(
///     summary_text(&result),
///     "Bill Split Results:\nTotal: £50\nSplit 1 ways:\n\nAda: £50.00"
/// );
/// ```
pub fn summary_text(result: &SplitResult) -> String {
    let mut lines = Vec::with_capacity(result.people.len() + 4);
    lines.push(format!("{SHARE_TITLE}:"));
    lines.push(format!("Total: {}", result.export_total()));
    lines.push(format!("Split {} ways:", result.participant_count()));
    lines.push(String::new());

    for person in &result.people {
        lines.push(format!("{}: {}", person.name, person.display_amount()));
    }

    lines.join("\n")
}

/// One-line description shown under the total, e.g.
/// `"Split 3 ways = $100.00 each"`.
pub fn headline(result: &SplitResult) -> String {
    format!(
        "Split {} ways = {} each",
        result.participant_count(),
        result.display_share()
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResultPerson;

    fn person(name: &str, currency: &str, amount: f64, symbol: &str) -> ResultPerson {
        ResultPerson {
            name: name.to_string(),
            currency: currency.to_string(),
            amount,
            symbol: symbol.to_string(),
        }
    }

    fn reference_result() -> SplitResult {
        SplitResult {
            total_amount: 300.0,
            base_currency: "USD".to_string(),
            base_symbol: "$".to_string(),
            amount_per_person: 100.0,
            people: vec![
                person("Alice", "USD", 100.0, "$"),
                person("Bob", "EUR", 92.00000000000001, "€"),
                person("Carol", "NGN", 164000.0, "₦"),
            ],
        }
    }

    #[test]
    fn test_summary_text_layout() {
        let expected = "Bill Split Results:\n\
                        Total: $300\n\
                        Split 3 ways:\n\
                        \n\
                        Alice: $100.00\n\
                        Bob: €92.00\n\
                        Carol: ₦164000.00";
        assert_eq!(summary_text(&reference_result()), expected);
    }

    #[test]
    fn test_summary_total_is_ungrouped() {
        let mut result = reference_result();
        result.total_amount = 1234.5;
        let text = summary_text(&result);
        assert!(text.contains("\nTotal: $1234.5\n"));
        assert_eq!(result.display_total(), "$1,234.5");
    }

    #[test]
    fn test_summary_has_no_trailing_newline() {
        assert!(!summary_text(&reference_result()).ends_with('\n'));
    }

    #[test]
    fn test_headline() {
        assert_eq!(headline(&reference_result()), "Split 3 ways = $100.00 each");
    }
}
