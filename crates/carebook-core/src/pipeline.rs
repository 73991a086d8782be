//! The booking pipeline: the sequenced driver of the booking state machine.
//!
//! The pipeline enforces the lifecycle:
//!
//!   NONE --save_draft--> DRAFT --confirm_booking--> CONFIRMED(pending)
//!   CONFIRMED(pending) --process_payment Approved--> PAID
//!   CONFIRMED(pending) --process_payment Declined--> CONFIRMED(pending)
//!   PAID --mark_completed--> COMPLETED
//!   PAID|COMPLETED --upload_report--> report attached
//!
//! Transition guards are structural: a booking that is not `pending` can
//! never reach the payment gateway, and a booking that is not `paid` can
//! never attach a report. Malformed call sequences produce typed errors, not
//! silent no-ops.
//!
//! Every stage is a suspension point (an awaited gateway call). Stages for
//! the same booking never run concurrently because the session is
//! single-writer: one user action triggers one stage. There is no
//! cancellation and no timeout; simulated gateways always resolve.

use tracing::{debug, info, warn};

use carebook_billing::compute_bill;
use carebook_contracts::{
    booking::{Booking, BookingSelection, DraftBooking, PaymentStatus, TestProgress},
    error::{CarebookError, CarebookResult},
    payment::{ChargeRequest, PaymentMethod, PaymentOutcome, PaymentRecord},
    report::{LabReport, MedicalRecord},
    triage::Recommendation,
};
use chrono::Utc;

use crate::{
    session::SessionStore,
    traits::{PaymentGateway, PaymentHistory, ReportGateway, SchedulingGateway, TriageGateway},
};

/// The pipeline that drives one patient session through booking and payment.
///
/// Owns the gateway collaborators and the payment ledger as trait objects;
/// construct one per wiring (typically once per process in the demo, once
/// per test with mocks). Session state is passed in per call, never held.
pub struct BookingPipeline {
    scheduler: Box<dyn SchedulingGateway>,
    payments: Box<dyn PaymentGateway>,
    reports: Box<dyn ReportGateway>,
    history: Box<dyn PaymentHistory>,
}

impl BookingPipeline {
    /// Create a pipeline over the given collaborators.
    pub fn new(
        scheduler: Box<dyn SchedulingGateway>,
        payments: Box<dyn PaymentGateway>,
        reports: Box<dyn ReportGateway>,
        history: Box<dyn PaymentHistory>,
    ) -> Self {
        Self {
            scheduler,
            payments,
            reports,
            history,
        }
    }

    /// Fetch a triage recommendation for the session's patient and store it.
    ///
    /// Triage is a collaborator outside the booking state machine, so the
    /// gateway is passed per call rather than owned by the pipeline.
    pub async fn load_recommendations(
        &self,
        session: &SessionStore,
        triage: &dyn TriageGateway,
    ) -> CarebookResult<Recommendation> {
        let recommendation = triage.recommend(session.patient()).await?;

        info!(
            session_id = %session.session_id().0,
            tests = recommendation.tests.len(),
            "triage recommendation loaded"
        );

        session.set_recommendation(recommendation.clone());
        Ok(recommendation)
    }

    /// Assemble the patient's selections into a draft booking.
    ///
    /// Computes the bill via the billing calculator and stores the draft,
    /// superseding any prior draft (at most one draft per session). This is
    /// the only stage with no gateway round trip; it is synchronous and has
    /// no side effect beyond the session's draft slot.
    ///
    /// # Errors
    ///
    /// Returns `CarebookError::UnknownLocation` when `selection.location` is
    /// not one of the hospital's collection locations.
    pub fn save_draft(
        &self,
        session: &SessionStore,
        selection: BookingSelection,
    ) -> CarebookResult<DraftBooking> {
        if !selection
            .hospital
            .locations
            .iter()
            .any(|location| location == &selection.location)
        {
            warn!(
                session_id = %session.session_id().0,
                hospital = %selection.hospital.name,
                location = %selection.location,
                "draft rejected: unknown collection location"
            );
            return Err(CarebookError::UnknownLocation {
                hospital: selection.hospital.name,
                location: selection.location,
            });
        }

        let bill = compute_bill(
            &selection.tests,
            selection.hospital.service_fee,
            selection.hospital.tax_rate,
            selection.insurance_enabled,
        );

        let draft = DraftBooking {
            hospital: selection.hospital,
            tests: selection.tests,
            location: selection.location,
            slot: selection.slot,
            insurance_enabled: selection.insurance_enabled,
            bill,
            drafted_at: Utc::now(),
        };

        debug!(
            session_id = %session.session_id().0,
            hospital = %draft.hospital.name,
            slot = %draft.slot,
            total = draft.bill.total,
            "draft saved"
        );

        session.replace_draft(draft.clone());
        Ok(draft)
    }

    /// Confirm the session's draft with the scheduling gateway.
    ///
    /// The gateway assigns the booking identifier; the pipeline freezes the
    /// draft into a `Booking` with `payment_status: pending` and stores it as
    /// the session's latest booking. The draft is consumed only after the
    /// gateway round trip succeeds, so a gateway failure leaves it in place.
    ///
    /// # Errors
    ///
    /// Returns `CarebookError::MissingDraft` when no draft exists, and
    /// propagates gateway errors.
    pub async fn confirm_booking(&self, session: &SessionStore) -> CarebookResult<Booking> {
        let draft = session.draft().ok_or(CarebookError::MissingDraft)?;

        debug!(
            session_id = %session.session_id().0,
            hospital = %draft.hospital.name,
            "confirming draft with scheduling gateway"
        );

        let confirmation = self.scheduler.confirm(&draft).await?;

        let booking = Booking {
            booking_id: confirmation.booking_id,
            patient: session.patient().clone(),
            hospital: draft.hospital,
            tests: draft.tests,
            location: draft.location,
            slot: draft.slot,
            insurance_enabled: draft.insurance_enabled,
            bill: draft.bill,
            created_at: confirmation.created_at,
            payment_status: PaymentStatus::Pending,
            progress: TestProgress::Scheduled,
            receipt: None,
            report: None,
        };

        session.take_draft();
        session.store_booking(booking.clone());

        info!(
            session_id = %session.session_id().0,
            booking_id = %booking.booking_id.0,
            total = booking.bill.total,
            "booking confirmed, payment pending"
        );

        Ok(booking)
    }

    /// Attempt to pay for the session's confirmed booking.
    ///
    /// # Pipeline
    ///
    /// 1. Require a confirmed booking (`MissingBooking` otherwise).
    /// 2. Require `payment_status == pending`. A booking that is already
    ///    paid returns `PaymentNotPending`: the charge is never attempted,
    ///    which makes double payment structurally impossible.
    /// 3. Charge the full bill total through the payment gateway.
    /// 4. On `Declined`: mutate nothing, return the outcome. The booking
    ///    stays pending indefinitely; retry is purely user-triggered.
    /// 5. On `Approved`: mark the booking paid, attach the receipt, append
    ///    exactly one record to the payment ledger, push a notification.
    ///
    /// # Errors
    ///
    /// State precondition failures and ledger write failures. A declined
    /// charge is NOT an error; callers match on the returned outcome.
    pub async fn process_payment(
        &self,
        session: &SessionStore,
        method: PaymentMethod,
        details: impl Into<String>,
    ) -> CarebookResult<PaymentOutcome> {
        let booking = session.booking().ok_or(CarebookError::MissingBooking)?;

        if booking.payment_status != PaymentStatus::Pending {
            warn!(
                session_id = %session.session_id().0,
                booking_id = %booking.booking_id.0,
                status = %booking.payment_status,
                "charge refused: booking is not awaiting payment"
            );
            return Err(CarebookError::PaymentNotPending {
                booking_id: booking.booking_id.0,
                status: booking.payment_status.to_string(),
            });
        }

        let request = ChargeRequest {
            booking_id: booking.booking_id.clone(),
            amount: booking.bill.total,
            method,
            details: details.into(),
        };

        debug!(
            session_id = %session.session_id().0,
            booking_id = %request.booking_id.0,
            amount = request.amount,
            method = %request.method,
            "submitting charge to payment gateway"
        );

        let outcome = self.payments.charge(&request).await?;

        match &outcome {
            PaymentOutcome::Declined { error } => {
                // No state mutation on decline: the booking stays pending and
                // the ledger is untouched.
                warn!(
                    session_id = %session.session_id().0,
                    booking_id = %request.booking_id.0,
                    error = %error,
                    "charge declined"
                );
            }
            PaymentOutcome::Approved(receipt) => {
                let receipt = receipt.clone();
                session.update_booking(|booking| {
                    booking.payment_status = PaymentStatus::Paid;
                    booking.receipt = Some(receipt.clone());
                })?;

                self.history.append(&PaymentRecord::from(receipt.clone()))?;
                session.notify("Your lab test is scheduled. Payment confirmed.");

                info!(
                    session_id = %session.session_id().0,
                    booking_id = %receipt.booking_id.0,
                    payment_id = %receipt.payment_id.0,
                    invoice_id = %receipt.invoice_id.0,
                    amount = receipt.amount,
                    "charge approved, booking paid"
                );
            }
        }

        Ok(outcome)
    }

    /// Record that the lab performed the booked tests.
    ///
    /// # Errors
    ///
    /// Returns `CarebookError::MissingBooking` without a booking and
    /// `CarebookError::NotPaid` when the booking has not been paid.
    pub fn mark_completed(&self, session: &SessionStore) -> CarebookResult<Booking> {
        let booking = session.booking().ok_or(CarebookError::MissingBooking)?;

        if booking.payment_status != PaymentStatus::Paid {
            return Err(CarebookError::NotPaid {
                booking_id: booking.booking_id.0,
            });
        }

        let updated = session.update_booking(|booking| {
            booking.progress = TestProgress::Completed;
        })?;
        session.notify("Your hospital marked the test as completed.");

        info!(
            session_id = %session.session_id().0,
            booking_id = %updated.booking_id.0,
            "tests marked completed"
        );

        Ok(updated)
    }

    /// Upload a lab report for the session's paid booking.
    ///
    /// The report gateway returns the descriptor; the pipeline attaches it to
    /// the booking and prepends a medical record to the session's list.
    /// Reachable from both `paid` and `completed` bookings.
    ///
    /// # Errors
    ///
    /// Returns `CarebookError::MissingBooking` without a booking,
    /// `CarebookError::NotPaid` before a successful payment, and propagates
    /// gateway errors.
    pub async fn upload_report(
        &self,
        session: &SessionStore,
        file_name: &str,
    ) -> CarebookResult<LabReport> {
        let booking = session.booking().ok_or(CarebookError::MissingBooking)?;

        if booking.payment_status != PaymentStatus::Paid {
            return Err(CarebookError::NotPaid {
                booking_id: booking.booking_id.0,
            });
        }

        let report = self.reports.upload(&booking.booking_id, file_name).await?;

        session.update_booking(|booking| {
            booking.report = Some(report.clone());
        })?;
        session.push_record(MedicalRecord {
            report: report.clone(),
            hospital_name: booking.hospital.name.clone(),
            test_names: booking.tests.iter().map(|test| test.name.clone()).collect(),
        });
        session.notify("New lab report is now available in Medical Records.");

        info!(
            session_id = %session.session_id().0,
            booking_id = %report.booking_id.0,
            report_id = %report.report_id.0,
            file = %report.file_name,
            "lab report attached"
        );

        Ok(report)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
