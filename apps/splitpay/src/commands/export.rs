//! # Export Commands
//!
//! Copy and share the last result as plain text.

use splitpay_core::{summary_text, SHARE_TITLE};
use tracing::debug;

use crate::error::ApiError;
use crate::export::{share_or_copy, ExportOutcome, ExportSink};
use crate::state::BillState;

fn current_summary(bill: &BillState) -> Result<String, ApiError> {
    bill.result()
        .map(|result| summary_text(&result))
        .ok_or_else(ApiError::no_result)
}

/// Copies the last result's summary to the clipboard.
pub fn copy_results(
    bill: &BillState,
    clipboard: &dyn ExportSink,
) -> Result<ExportOutcome, ApiError> {
    debug!("copy_results command");
    let text = current_summary(bill)?;
    clipboard.deliver(SHARE_TITLE, &text)?;
    Ok(ExportOutcome::Copied)
}

/// Shares the last result's summary, copying it when sharing is
/// unsupported.
pub fn share_results(
    bill: &BillState,
    share: &dyn ExportSink,
    clipboard: &dyn ExportSink,
) -> Result<ExportOutcome, ApiError> {
    debug!("share_results command");
    let text = current_summary(bill)?;
    Ok(share_or_copy(share, clipboard, SHARE_TITLE, &text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::export::{MemoryClipboard, UnsupportedShare};
    use splitpay_core::{ResultPerson, SplitResult};

    fn bill_with_result() -> BillState {
        let bill = BillState::default();
        bill.with_bill_mut(|b| {
            b.result = Some(SplitResult {
                total_amount: 20.0,
                base_currency: "USD".to_string(),
                base_symbol: "$".to_string(),
                amount_per_person: 20.0,
                people: vec![ResultPerson {
                    name: "Ada".to_string(),
                    currency: "USD".to_string(),
                    amount: 20.0,
                    symbol: "$".to_string(),
                }],
            })
        });
        bill
    }

    #[test]
    fn test_export_requires_result() {
        let clipboard = MemoryClipboard::new();
        let err = copy_results(&BillState::default(), &clipboard).unwrap_err();
        assert_eq!(err.code, ErrorCode::NoResult);
    }

    #[test]
    fn test_copy_and_share_send_identical_text() {
        let bill = bill_with_result();
        let clipboard = MemoryClipboard::new();
        let share = MemoryClipboard::new();

        assert_eq!(
            copy_results(&bill, &clipboard).unwrap(),
            ExportOutcome::Copied
        );
        assert_eq!(
            share_results(&bill, &share, &clipboard).unwrap(),
            ExportOutcome::Shared
        );

        let expected = "Bill Split Results:\nTotal: $20\nSplit 1 ways:\n\nAda: $20.00";
        assert_eq!(clipboard.contents().as_deref(), Some(expected));
        assert_eq!(share.contents().as_deref(), Some(expected));
    }

    #[test]
    fn test_share_falls_back_to_copy() {
        let bill = bill_with_result();
        let clipboard = MemoryClipboard::new();

        let outcome = share_results(&bill, &UnsupportedShare, &clipboard).unwrap();

        assert_eq!(outcome, ExportOutcome::Copied);
        let text = clipboard.contents().unwrap();
        assert!(text.starts_with("Bill Split Results:\n"));
    }
}
