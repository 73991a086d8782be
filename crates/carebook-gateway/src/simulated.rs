//! Simulated gateway implementations with artificial latency.
//!
//! Each gateway sleeps for its configured latency, then resolves. Once
//! invoked, a call always completes; there is no cancellation and no
//! timeout. Only the payment gateway can decline, and only through its
//! fault strategy. None of the gateways touch session state: the pipeline
//! applies outcomes after inspecting them.
//!
//! Identifier formats follow the upstream gateway conventions: a short
//! prefix plus the trailing digits of the current epoch-millisecond clock
//! ("BK-45120087"), and a random six-digit invoice number.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use tokio::time::sleep;
use tracing::debug;

use carebook_contracts::{
    booking::{BookingConfirmation, BookingId, DraftBooking},
    error::CarebookResult,
    payment::{ChargeRequest, InvoiceId, PaymentId, PaymentOutcome, PaymentReceipt},
    report::{LabReport, ReportId},
};
use carebook_core::traits::{PaymentGateway, ReportGateway, SchedulingGateway};

use crate::fault::FaultStrategy;

/// The decline message surfaced verbatim by the retry UX.
const DECLINE_MESSAGE: &str = "Payment authorization failed. Please retry with another method.";

/// Per-stage artificial delays.
#[derive(Debug, Clone, Copy)]
pub struct Latency {
    pub triage: Duration,
    pub confirm: Duration,
    pub charge: Duration,
    pub upload: Duration,
}

impl Latency {
    /// The delays the original gateways ran with, for demo authenticity.
    pub fn realistic() -> Self {
        Self {
            triage: Duration::from_millis(800),
            confirm: Duration::from_millis(1100),
            charge: Duration::from_millis(1500),
            upload: Duration::from_millis(1200),
        }
    }

    /// No delays. For tests.
    pub fn zero() -> Self {
        Self {
            triage: Duration::ZERO,
            confirm: Duration::ZERO,
            charge: Duration::ZERO,
            upload: Duration::ZERO,
        }
    }
}

/// Last `digits` decimal digits of the current epoch-millisecond clock,
/// zero-padded.
fn clock_digits(digits: u32) -> String {
    let modulus = 10_i64.pow(digits);
    let millis = Utc::now().timestamp_millis().rem_euclid(modulus);
    format!("{millis:0width$}", width = digits as usize)
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// Confirms drafts after a simulated network round trip.
pub struct SimulatedScheduler {
    latency: Latency,
}

impl SimulatedScheduler {
    pub fn new(latency: Latency) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl SchedulingGateway for SimulatedScheduler {
    async fn confirm(&self, draft: &DraftBooking) -> CarebookResult<BookingConfirmation> {
        sleep(self.latency.confirm).await;

        let confirmation = BookingConfirmation {
            booking_id: BookingId(format!("BK-{}", clock_digits(8))),
            created_at: Utc::now(),
        };

        debug!(
            booking_id = %confirmation.booking_id.0,
            hospital = %draft.hospital.name,
            slot = %draft.slot,
            "simulated scheduler confirmed draft"
        );

        Ok(confirmation)
    }
}

// ── Payment gateway ───────────────────────────────────────────────────────────

/// Attempts charges after a simulated delay, declining per its fault
/// strategy.
///
/// Declines resolve as `Ok(PaymentOutcome::Declined { .. })`; this gateway
/// never returns `Err`.
pub struct SimulatedPaymentGateway {
    latency: Latency,
    faults: Box<dyn FaultStrategy>,
}

impl SimulatedPaymentGateway {
    pub fn new(latency: Latency, faults: Box<dyn FaultStrategy>) -> Self {
        Self { latency, faults }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn charge(&self, request: &ChargeRequest) -> CarebookResult<PaymentOutcome> {
        sleep(self.latency.charge).await;

        if self.faults.next_charge_fails() {
            debug!(
                booking_id = %request.booking_id.0,
                amount = request.amount,
                "simulated gateway declined charge"
            );
            return Ok(PaymentOutcome::Declined {
                error: DECLINE_MESSAGE.to_string(),
            });
        }

        let receipt = PaymentReceipt {
            payment_id: PaymentId(format!("PAY-{}", clock_digits(9))),
            invoice_id: InvoiceId(format!(
                "INV-{}",
                rand::thread_rng().gen_range(100_000..1_000_000)
            )),
            booking_id: request.booking_id.clone(),
            amount: request.amount,
            method: request.method,
            paid_at: Utc::now(),
        };

        debug!(
            booking_id = %request.booking_id.0,
            payment_id = %receipt.payment_id.0,
            invoice_id = %receipt.invoice_id.0,
            amount = receipt.amount,
            "simulated gateway approved charge"
        );

        Ok(PaymentOutcome::Approved(receipt))
    }
}

// ── Report service ────────────────────────────────────────────────────────────

/// Accepts report uploads after a simulated delay.
pub struct SimulatedReportService {
    latency: Latency,
}

impl SimulatedReportService {
    pub fn new(latency: Latency) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl ReportGateway for SimulatedReportService {
    async fn upload(&self, booking_id: &BookingId, file_name: &str) -> CarebookResult<LabReport> {
        sleep(self.latency.upload).await;

        let report = LabReport {
            report_id: ReportId(format!("REP-{}", clock_digits(8))),
            booking_id: booking_id.clone(),
            file_name: file_name.to_string(),
            uploaded_at: Utc::now(),
        };

        debug!(
            booking_id = %booking_id.0,
            report_id = %report.report_id.0,
            file = %file_name,
            "simulated report service stored upload"
        );

        Ok(report)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use carebook_contracts::{
        billing::Bill,
        booking::{BookingId, DraftBooking},
        hospital::{Hospital, HospitalId},
        payment::{ChargeRequest, PaymentMethod, PaymentOutcome},
    };
    use carebook_core::traits::{PaymentGateway, ReportGateway, SchedulingGateway};

    use crate::fault::{AlwaysFail, NoFaults, ScriptedFaults};

    use super::{Latency, SimulatedPaymentGateway, SimulatedReportService, SimulatedScheduler};

    fn make_draft() -> DraftBooking {
        DraftBooking {
            hospital: Hospital {
                id: HospitalId("hosp-1".to_string()),
                name: "CityCare Multi-Speciality Hospital".to_string(),
                address: "12 Heartline Ave, MedCity".to_string(),
                locations: vec!["Downtown Center".to_string()],
                insurance_available: true,
                service_fee: 199,
                tax_rate: 0.12,
            },
            tests: vec![],
            location: "Downtown Center".to_string(),
            slot: "2026-02-20T10:30".to_string(),
            insurance_enabled: true,
            bill: Bill::empty(),
            drafted_at: Utc::now(),
        }
    }

    fn make_request() -> ChargeRequest {
        ChargeRequest {
            booking_id: BookingId("BK-45120087".to_string()),
            amount: 2192,
            method: PaymentMethod::Card,
            details: "4111 **** **** 1111".to_string(),
        }
    }

    /// The scheduler assigns a BK-prefixed eight-digit identifier.
    #[tokio::test]
    async fn scheduler_assigns_clock_derived_id() {
        let scheduler = SimulatedScheduler::new(Latency::zero());
        let confirmation = scheduler.confirm(&make_draft()).await.unwrap();

        let id = &confirmation.booking_id.0;
        assert!(id.starts_with("BK-"), "unexpected id: {id}");
        assert_eq!(id.len(), "BK-".len() + 8);
        assert!(id["BK-".len()..].chars().all(|c| c.is_ascii_digit()));
    }

    /// With no faults, a charge echoes the request and assigns identifiers.
    #[tokio::test]
    async fn charge_approves_and_echoes_request() {
        let gateway = SimulatedPaymentGateway::new(Latency::zero(), Box::new(NoFaults));
        let outcome = gateway.charge(&make_request()).await.unwrap();

        let receipt = match outcome {
            PaymentOutcome::Approved(receipt) => receipt,
            other => panic!("expected Approved, got {:?}", other),
        };

        assert_eq!(receipt.amount, 2192);
        assert_eq!(receipt.method, PaymentMethod::Card);
        assert_eq!(receipt.booking_id.0, "BK-45120087");
        assert!(receipt.payment_id.0.starts_with("PAY-"));
        assert!(receipt.invoice_id.0.starts_with("INV-"));
        assert_eq!(receipt.invoice_id.0.len(), "INV-".len() + 6);
    }

    /// A fault declines with the fixed retry message and never errors.
    #[tokio::test]
    async fn charge_declines_with_retry_message() {
        let gateway = SimulatedPaymentGateway::new(Latency::zero(), Box::new(AlwaysFail));
        let outcome = gateway.charge(&make_request()).await.unwrap();

        match outcome {
            PaymentOutcome::Declined { error } => {
                assert_eq!(
                    error,
                    "Payment authorization failed. Please retry with another method."
                );
            }
            other => panic!("expected Declined, got {:?}", other),
        }
    }

    /// A scripted strategy drives decline-then-approve across calls.
    #[tokio::test]
    async fn scripted_decline_then_approve() {
        let gateway = SimulatedPaymentGateway::new(
            Latency::zero(),
            Box::new(ScriptedFaults::new([true])),
        );

        let first = gateway.charge(&make_request()).await.unwrap();
        assert!(matches!(first, PaymentOutcome::Declined { .. }));

        let second = gateway.charge(&make_request()).await.unwrap();
        assert!(matches!(second, PaymentOutcome::Approved(_)));
    }

    /// The report service echoes the booking and file name in its descriptor.
    #[tokio::test]
    async fn report_descriptor_echoes_upload() {
        let service = SimulatedReportService::new(Latency::zero());
        let booking_id = BookingId("BK-45120087".to_string());

        let report = service.upload(&booking_id, "ecg-results.pdf").await.unwrap();

        assert_eq!(report.booking_id, booking_id);
        assert_eq!(report.file_name, "ecg-results.pdf");
        assert!(report.report_id.0.starts_with("REP-"));
    }
}
