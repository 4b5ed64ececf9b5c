//! # State Module
//!
//! Session state, split into independent pieces.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │  RatesState  │  │ RosterState  │  │  BillState   │  │ AppConfig  │  │
//! │  │              │  │              │  │              │  │            │  │
//! │  │ Arc<RwLock<  │  │ Arc<Mutex<   │  │ Arc<Mutex<   │  │ read-only  │  │
//! │  │  RateCache   │  │  Participant │  │  Bill        │  │            │  │
//! │  │ >>           │  │  Roster>>    │  │ >>           │  │            │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • RatesState: many readers, one short write per successful refresh    │
//! │  • RosterState / BillState: exclusive access per command               │
//! │  • No lock is held across an await                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod bill;
mod rates;
mod roster;

pub use bill::{Bill, BillState};
pub use rates::{RatesState, RatesStatus, RefreshGuard};
pub use roster::RosterState;
