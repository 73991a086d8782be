//! Scenario 1: End-to-End Lab Booking
//!
//! The full happy path, stage by stage:
//!
//!   triage -> bill preview -> draft -> confirm -> pay -> complete -> report
//!
//! The payment leg runs with the default uniform fault strategy, so roughly
//! one attempt in five is declined and retried the way a patient would retry
//! from the payment screen. Every other stage always succeeds.
//!
//! Key enforcement points shown here:
//! - The live bill preview and the frozen draft bill are identical for
//!   identical selections (the calculator is deterministic).
//! - A declined charge leaves the booking pending and the ledger untouched;
//!   only the retry that succeeds appends a record.
//! - The ledger's hash chain verifies after the flow completes.

use std::sync::Arc;

use carebook_contracts::{
    booking::BookingSelection,
    error::{CarebookError, CarebookResult},
    payment::{PaymentMethod, PaymentOutcome},
};
use carebook_core::{traits::PaymentHistory, BookingPipeline, SessionStore};
use carebook_gateway::{
    Latency, SimulatedPaymentGateway, SimulatedReportService, SimulatedScheduler, UniformFaults,
};
use carebook_ledger::InMemoryLedger;

use crate::mock_data::{demo_patient, hospital_directory, MockTriage};

use super::ArcLedger;

/// How many charge attempts the scenario makes before giving up.
const MAX_PAYMENT_ATTEMPTS: u32 = 5;

/// Run Scenario 1: the complete booking flow for the demo patient.
pub async fn run_scenario() -> CarebookResult<()> {
    println!("=== Scenario 1: End-to-End Lab Booking ===");
    println!();

    let directory = hospital_directory()?;
    let hospital = directory
        .get("hosp-1")
        .ok_or_else(|| CarebookError::ConfigError {
            reason: "embedded directory is missing hosp-1".to_string(),
        })?
        .clone();

    let session = SessionStore::new(demo_patient());
    let ledger = Arc::new(InMemoryLedger::new(session.session_id().0.to_string()));

    let latency = Latency::realistic();
    let pipeline = BookingPipeline::new(
        Box::new(SimulatedScheduler::new(latency)),
        Box::new(SimulatedPaymentGateway::new(
            latency,
            Box::new(UniformFaults::default_rate()),
        )),
        Box::new(SimulatedReportService::new(latency)),
        Box::new(ArcLedger(Arc::clone(&ledger))),
    );

    // ── Stage 1: Triage ───────────────────────────────────────────────────────

    let triage = MockTriage::new(latency);
    let recommendation = pipeline.load_recommendations(&session, &triage).await?;

    println!("  Patient:   {} ({})", session.patient().name, session.patient().id.0);
    println!("  Summary:   {}", recommendation.summary);
    for test in &recommendation.tests {
        println!(
            "    - {:<18} cost {:>5}  [{:?}] {}",
            test.name, test.cost, test.priority, test.reason
        );
    }
    println!();

    // ── Stage 2: Bill preview and draft ───────────────────────────────────────

    let selection = BookingSelection {
        hospital: hospital.clone(),
        tests: recommendation.tests.clone(),
        location: hospital.locations[0].clone(),
        slot: "2026-02-20T10:30".to_string(),
        insurance_enabled: true,
    };

    let preview = pipeline.save_draft(&session, selection.clone())?;
    let frozen = pipeline.save_draft(&session, selection)?;
    println!("  Hospital:  {} ({})", hospital.name, frozen.location);
    println!("  Bill preview vs frozen draft: {}", if preview.bill == frozen.bill {
        "IDENTICAL"
    } else {
        "MISMATCH"
    });
    for row in &frozen.bill.rows {
        println!(
            "    {:<18} base {:>5} | insured {:>5} | fee {:>4} | tax {:>4} | total {:>5}",
            row.name, row.base_price, row.discounted_price, row.service_fee, row.tax, row.total
        );
    }
    println!(
        "    subtotal {} + fees {} + taxes {} = TOTAL {}",
        frozen.bill.subtotal, frozen.bill.fees, frozen.bill.taxes, frozen.bill.total
    );
    println!();

    // ── Stage 3: Confirm ──────────────────────────────────────────────────────

    let booking = pipeline.confirm_booking(&session).await?;
    println!("  Booking:   {} (payment {})", booking.booking_id.0, booking.payment_status);
    println!();

    // ── Stage 4: Pay, retrying declines as the patient would ─────────────────

    let mut paid = false;
    for attempt in 1..=MAX_PAYMENT_ATTEMPTS {
        let outcome = pipeline
            .process_payment(&session, PaymentMethod::Card, "4111 **** **** 1111")
            .await?;

        match outcome {
            PaymentOutcome::Declined { error } => {
                println!("  Attempt {attempt}: DECLINED ({error})");
            }
            PaymentOutcome::Approved(receipt) => {
                println!(
                    "  Attempt {attempt}: APPROVED payment {} invoice {} amount {}",
                    receipt.payment_id.0, receipt.invoice_id.0, receipt.amount
                );
                paid = true;
                break;
            }
        }
    }

    if !paid {
        println!("  Payment did not go through after {MAX_PAYMENT_ATTEMPTS} attempts; booking stays pending.");
        println!();
        return Ok(());
    }
    println!();

    // ── Stage 5: Completion and report ────────────────────────────────────────

    let completed = pipeline.mark_completed(&session)?;
    println!("  Progress:  {}", completed.progress);

    let report = pipeline.upload_report(&session, "full-panel-results.pdf").await?;
    println!("  Report:    {} ({})", report.report_id.0, report.file_name);
    println!();

    // ── Wrap-up: ledger and notifications ─────────────────────────────────────

    println!(
        "  Ledger:    {} ({} record(s))",
        if ledger.verify_integrity() { "VERIFIED" } else { "FAILED" },
        ledger.len()
    );
    for record in ledger.recent() {
        println!(
            "    {} | {} | {} via {}",
            record.payment_id.0, record.booking_id.0, record.amount, record.method
        );
    }
    println!("  Notifications (newest first):");
    for notification in session.notifications() {
        println!("    - {}", notification.message);
    }
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use carebook_contracts::{
        booking::{BookingSelection, PaymentStatus, TestProgress},
        payment::{PaymentMethod, PaymentOutcome},
    };
    use carebook_core::{BookingPipeline, SessionStore};
    use carebook_gateway::{
        Latency, NoFaults, SimulatedPaymentGateway, SimulatedReportService, SimulatedScheduler,
    };
    use carebook_ledger::InMemoryLedger;

    use crate::mock_data::{demo_patient, hospital_directory, MockTriage};
    use crate::scenarios::ArcLedger;

    fn happy_pipeline(ledger: Arc<InMemoryLedger>) -> BookingPipeline {
        let latency = Latency::zero();
        BookingPipeline::new(
            Box::new(SimulatedScheduler::new(latency)),
            Box::new(SimulatedPaymentGateway::new(latency, Box::new(NoFaults))),
            Box::new(SimulatedReportService::new(latency)),
            Box::new(ArcLedger(ledger)),
        )
    }

    /// The whole flow, end to end, with real simulated components.
    #[tokio::test]
    async fn full_flow_reaches_report_with_verified_ledger() {
        let session = SessionStore::new(demo_patient());
        let ledger = Arc::new(InMemoryLedger::new(session.session_id().0.to_string()));
        let pipeline = happy_pipeline(Arc::clone(&ledger));

        let recommendation = pipeline
            .load_recommendations(&session, &MockTriage::instant())
            .await
            .unwrap();

        let hospital = hospital_directory().unwrap().get("hosp-1").unwrap().clone();
        let selection = BookingSelection {
            location: hospital.locations[0].clone(),
            hospital,
            tests: recommendation.tests,
            slot: "2026-02-20T10:30".to_string(),
            insurance_enabled: true,
        };

        pipeline.save_draft(&session, selection).unwrap();
        pipeline.confirm_booking(&session).await.unwrap();

        let outcome = pipeline
            .process_payment(&session, PaymentMethod::Card, "4111 **** **** 1111")
            .await
            .unwrap();
        assert!(matches!(outcome, PaymentOutcome::Approved(_)));

        pipeline.mark_completed(&session).unwrap();
        pipeline
            .upload_report(&session, "full-panel-results.pdf")
            .await
            .unwrap();

        let booking = session.booking().unwrap();
        assert_eq!(booking.payment_status, PaymentStatus::Paid);
        assert_eq!(booking.progress, TestProgress::Completed);
        assert!(booking.report.is_some());

        // All three tests, insured, at CityCare rates:
        // 960+199+144 + 600+199+90 + 1120+199+168 = 3679
        assert_eq!(booking.bill.total, 3679);

        assert_eq!(ledger.len(), 1);
        assert!(ledger.verify_integrity());
        assert_eq!(session.records().len(), 1);
        assert_eq!(session.records()[0].test_names.len(), 3);
    }
}
