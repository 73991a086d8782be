//! Reference clinic demo scenarios.
//!
//! Each scenario is a self-contained module that wires up real carebook
//! components (billing calculator, booking pipeline, simulated gateways,
//! hash-chained ledger) with mock clinical data and demonstrates a distinct
//! part of the flow.

use std::sync::Arc;

use carebook_contracts::{error::CarebookResult, payment::PaymentRecord};
use carebook_core::traits::PaymentHistory;
use carebook_ledger::InMemoryLedger;

pub mod insurance_compare;
pub mod lab_booking;
pub mod payment_retry;

/// Adapter so a scenario can hand the pipeline a ledger it keeps a handle to
/// for printing and integrity checks afterwards.
pub(crate) struct ArcLedger(pub(crate) Arc<InMemoryLedger>);

impl PaymentHistory for ArcLedger {
    fn append(&self, record: &PaymentRecord) -> CarebookResult<()> {
        self.0.append(record)
    }

    fn recent(&self) -> Vec<PaymentRecord> {
        self.0.recent()
    }
}
