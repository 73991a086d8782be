//! Booking lifecycle types.
//!
//! A booking moves through a fixed lifecycle:
//!
//!   draft -> confirmed (payment pending) -> paid -> completed
//!
//! with a lab report attachable once the booking is paid. The pipeline in
//! carebook-core enforces the transitions; these types only carry the state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    billing::Bill,
    hospital::Hospital,
    patient::Patient,
    payment::PaymentReceipt,
    report::LabReport,
    triage::LabTest,
};

/// Identifier assigned by the scheduling gateway when a draft is confirmed.
///
/// Example: BookingId("BK-45120087")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub String);

/// Whether the booking's bill has been settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting a successful charge. Declined attempts leave this unchanged.
    Pending,
    /// A charge was approved; the receipt is attached to the booking.
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
        };
        f.write_str(name)
    }
}

/// Whether the lab has performed the booked tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestProgress {
    /// Confirmed and on the lab's calendar.
    Scheduled,
    /// The lab marked the tests done.
    Completed,
}

impl fmt::Display for TestProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TestProgress::Scheduled => "scheduled",
            TestProgress::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// The patient's raw selections, assembled by the UI layer.
///
/// Input to `BookingPipeline::save_draft`, which validates the location and
/// attaches the computed bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingSelection {
    pub hospital: Hospital,
    pub tests: Vec<LabTest>,
    /// Must name one of the hospital's collection locations.
    pub location: String,
    /// The chosen appointment slot, an ISO-8601 local datetime string.
    pub slot: String,
    pub insurance_enabled: bool,
}

/// An unconfirmed booking held in the session.
///
/// At most one draft exists per session; saving a new draft supersedes the
/// old one. The bill inside is frozen at draft time and is what the patient
/// ultimately pays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftBooking {
    pub hospital: Hospital,
    pub tests: Vec<LabTest>,
    pub location: String,
    pub slot: String,
    pub insurance_enabled: bool,
    pub bill: Bill,
    pub drafted_at: DateTime<Utc>,
}

/// What the scheduling gateway returns for a confirmed draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub booking_id: BookingId,
    pub created_at: DateTime<Utc>,
}

/// A confirmed booking, the unit the payment and report stages operate on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: BookingId,
    pub patient: Patient,
    pub hospital: Hospital,
    pub tests: Vec<LabTest>,
    pub location: String,
    pub slot: String,
    pub insurance_enabled: bool,
    pub bill: Bill,
    pub created_at: DateTime<Utc>,
    pub payment_status: PaymentStatus,
    pub progress: TestProgress,
    /// Present exactly when `payment_status` is `Paid`.
    pub receipt: Option<PaymentReceipt>,
    /// Present once a lab report has been uploaded for this booking.
    pub report: Option<LabReport>,
}
