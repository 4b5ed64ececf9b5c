//! # Bill State
//!
//! The form fields outside the roster plus the last successful result.
//!
//! ## Result Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bill State Transitions                               │
//! │                                                                         │
//! │   ┌──────────┐  calculate ok   ┌──────────┐  calculate ok              │
//! │   │ no result│───────────────► │  result  │──────────────► (replaced)  │
//! │   └──────────┘                 └──────────┘                            │
//! │        │                            │                                   │
//! │        │ calculate err              │ calculate err                     │
//! │        ▼                            ▼                                   │
//! │   error shown,                 error shown,                             │
//! │   still no result              previous result kept                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use splitpay_core::SplitResult;

/// Bill form fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Raw total as typed
    pub total_amount: String,

    /// Currency the total is denominated in
    pub base_currency: String,

    /// Last successful calculation
    pub result: Option<SplitResult>,

    /// Message from the last failed calculation, cleared on success
    pub error: Option<String>,
}

impl Bill {
    /// Creates an empty form for `base_currency`.
    pub fn new(base_currency: impl Into<String>) -> Self {
        Bill {
            total_amount: String::new(),
            base_currency: base_currency.into(),
            result: None,
            error: None,
        }
    }
}

/// Bill state.
#[derive(Debug, Clone)]
pub struct BillState {
    bill: Arc<Mutex<Bill>>,
}

impl BillState {
    pub fn new(base_currency: impl Into<String>) -> Self {
        BillState {
            bill: Arc::new(Mutex::new(Bill::new(base_currency))),
        }
    }

    /// Executes a function with read access to the bill.
    pub fn with_bill<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Bill) -> R,
    {
        let bill = self.bill.lock().unwrap_or_else(PoisonError::into_inner);
        f(&bill)
    }

    /// Executes a function with write access to the bill.
    pub fn with_bill_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Bill) -> R,
    {
        let mut bill = self.bill.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut bill)
    }

    /// Current base currency.
    pub fn base_currency(&self) -> String {
        self.with_bill(|b| b.base_currency.clone())
    }

    /// Copy of the last successful result.
    pub fn result(&self) -> Option<SplitResult> {
        self.with_bill(|b| b.result.clone())
    }
}

impl Default for BillState {
    fn default() -> Self {
        BillState::new(splitpay_core::DEFAULT_BASE_CURRENCY)
    }
}
