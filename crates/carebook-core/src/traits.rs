//! Core trait definitions for the carebook booking pipeline.
//!
//! These five traits are the seams between the pipeline and everything it
//! talks to:
//!
//! - `TriageGateway`     — recommends tests (external AI collaborator)
//! - `SchedulingGateway` — confirms drafts and assigns booking identifiers
//! - `PaymentGateway`    — attempts charges; a decline is a value, not an error
//! - `ReportGateway`     — uploads lab report descriptors
//! - `PaymentHistory`    — append-only ledger of successful charges
//!
//! The pipeline sequences them in the correct order; implementations decide
//! latency and failure behavior. Simulated implementations live in
//! carebook-gateway, the hash-chained ledger in carebook-ledger.

use async_trait::async_trait;

use carebook_contracts::{
    booking::{BookingConfirmation, BookingId, DraftBooking},
    error::CarebookResult,
    patient::Patient,
    payment::{ChargeRequest, PaymentOutcome, PaymentRecord},
    report::LabReport,
    triage::Recommendation,
};

/// The triage collaborator that supplies recommended tests.
///
/// Out of scope for the pipeline itself: the pipeline only stores the result
/// in the session. The returned test list may be empty.
#[async_trait]
pub trait TriageGateway: Send + Sync {
    /// Produce a recommendation for the given patient.
    async fn recommend(&self, patient: &Patient) -> CarebookResult<Recommendation>;
}

/// The scheduling collaborator that turns a draft into a confirmed booking.
///
/// Implementations assign the booking identifier and the confirmation
/// timestamp; they do not inspect or alter the draft's bill.
#[async_trait]
pub trait SchedulingGateway: Send + Sync {
    /// Register `draft` with the lab and return its assigned identifier.
    async fn confirm(&self, draft: &DraftBooking) -> CarebookResult<BookingConfirmation>;
}

/// The payment collaborator.
///
/// The contract distinguishes two failure shapes:
///
/// - An ordinary decline resolves as `Ok(PaymentOutcome::Declined { .. })`.
///   The caller surfaces the message and lets the patient retry.
/// - `Err` means the gateway could not service the request at all, which the
///   simulated gateway never produces.
///
/// Implementations MUST NOT mutate any booking or session state; the
/// pipeline applies the outcome after checking it.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Attempt to charge the full amount in `request`.
    async fn charge(&self, request: &ChargeRequest) -> CarebookResult<PaymentOutcome>;
}

/// The report collaborator that accepts an uploaded lab report.
#[async_trait]
pub trait ReportGateway: Send + Sync {
    /// Store the named report file for `booking_id` and return its descriptor.
    async fn upload(&self, booking_id: &BookingId, file_name: &str) -> CarebookResult<LabReport>;
}

/// The payment history ledger: the immutable record of successful charges.
///
/// Exactly one record is appended per approved charge. Records are never
/// modified or deleted. A failed append is fatal to the payment stage, so
/// implementations should only fail for genuinely unrecoverable reasons.
pub trait PaymentHistory: Send + Sync {
    /// Append one payment record to the ledger.
    fn append(&self, record: &PaymentRecord) -> CarebookResult<()>;

    /// Return all records, newest first (the display order of the history
    /// view).
    fn recent(&self) -> Vec<PaymentRecord>;
}
