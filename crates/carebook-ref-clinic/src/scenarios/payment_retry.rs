//! Scenario 2: Payment Decline and Manual Retry
//!
//! Demonstrates the retry loop of the payment stage with a scripted fault
//! strategy, so the decline is deterministic rather than a lucky draw:
//!
//!   Attempt 1 (card)        -> DECLINED   booking stays pending, ledger empty
//!   Attempt 2 (net banking) -> APPROVED   booking paid, one ledger record
//!
//! Key enforcement points shown here:
//! - A declined charge mutates nothing: payment status, receipt slot, and
//!   ledger are exactly as they were before the attempt.
//! - Retry is purely user-triggered; the pipeline performs no automatic
//!   retry and no backoff.
//! - After the retry succeeds, a further charge is refused by the
//!   idempotence guard before it can reach the gateway.

use std::sync::Arc;

use carebook_contracts::{
    booking::BookingSelection,
    error::{CarebookError, CarebookResult},
    payment::{PaymentMethod, PaymentOutcome},
};
use carebook_core::{BookingPipeline, SessionStore};
use carebook_gateway::{
    Latency, ScriptedFaults, SimulatedPaymentGateway, SimulatedReportService, SimulatedScheduler,
};
use carebook_ledger::InMemoryLedger;

use crate::mock_data::{demo_patient, hospital_directory, MockTriage};

use super::ArcLedger;

/// Build the scenario pipeline: every gateway real, the payment leg scripted
/// to decline exactly the first charge.
fn scripted_pipeline(latency: Latency, ledger: Arc<InMemoryLedger>) -> BookingPipeline {
    BookingPipeline::new(
        Box::new(SimulatedScheduler::new(latency)),
        Box::new(SimulatedPaymentGateway::new(
            latency,
            Box::new(ScriptedFaults::new([true])),
        )),
        Box::new(SimulatedReportService::new(latency)),
        Box::new(ArcLedger(ledger)),
    )
}

/// Run Scenario 2: decline on the first attempt, approve on the retry.
pub async fn run_scenario() -> CarebookResult<()> {
    println!("=== Scenario 2: Payment Decline and Manual Retry ===");
    println!();

    let directory = hospital_directory()?;
    let hospital = directory
        .get("hosp-2")
        .ok_or_else(|| CarebookError::ConfigError {
            reason: "embedded directory is missing hosp-2".to_string(),
        })?
        .clone();

    let session = SessionStore::new(demo_patient());
    let ledger = Arc::new(InMemoryLedger::new(session.session_id().0.to_string()));
    let pipeline = scripted_pipeline(Latency::realistic(), Arc::clone(&ledger));

    let recommendation = pipeline
        .load_recommendations(&session, &MockTriage::new(Latency::realistic()))
        .await?;

    let selection = BookingSelection {
        location: hospital.locations[0].clone(),
        hospital: hospital.clone(),
        tests: recommendation.tests,
        slot: "2026-02-21T09:00".to_string(),
        insurance_enabled: true,
    };
    pipeline.save_draft(&session, selection)?;
    let booking = pipeline.confirm_booking(&session).await?;

    println!("  Hospital:  {}", hospital.name);
    println!("  Booking:   {} | amount due {}", booking.booking_id.0, booking.bill.total);
    println!();

    // ── Attempt 1: scripted decline ───────────────────────────────────────────

    println!("  Attempt 1 - card");
    match pipeline
        .process_payment(&session, PaymentMethod::Card, "4111 **** **** 1111")
        .await?
    {
        PaymentOutcome::Declined { error } => {
            let after = session
                .booking()
                .ok_or(CarebookError::MissingBooking)?;
            println!("  Outcome:   DECLINED");
            println!("  Message:   {error}");
            println!("  Booking:   payment {} (unchanged)", after.payment_status);
            println!("  Ledger:    {} record(s) (unchanged)", ledger.len());
        }
        PaymentOutcome::Approved(_) => {
            println!("  UNEXPECTED: scripted gateway approved the first attempt");
            return Ok(());
        }
    }
    println!();

    // ── Attempt 2: the patient retries with a different method ───────────────

    println!("  Attempt 2 - net banking (user-triggered retry)");
    match pipeline
        .process_payment(&session, PaymentMethod::NetBanking, "MedCity Bank")
        .await?
    {
        PaymentOutcome::Approved(receipt) => {
            println!("  Outcome:   APPROVED");
            println!(
                "  Receipt:   {} | invoice {} | amount {}",
                receipt.payment_id.0, receipt.invoice_id.0, receipt.amount
            );
            println!(
                "  Ledger:    {} ({} record(s))",
                if ledger.verify_integrity() { "VERIFIED" } else { "FAILED" },
                ledger.len()
            );
        }
        PaymentOutcome::Declined { error } => {
            println!("  UNEXPECTED decline after script exhausted: {error}");
            return Ok(());
        }
    }
    println!();

    // ── A third charge is structurally impossible ─────────────────────────────

    match pipeline
        .process_payment(&session, PaymentMethod::Card, "4111 **** **** 1111")
        .await
    {
        Err(CarebookError::PaymentNotPending { status, .. }) => {
            println!("  Third charge refused before reaching the gateway (status: {status}).");
        }
        other => {
            println!("  UNEXPECTED: {:?}", other.map(|_| "charged again"));
        }
    }
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use carebook_contracts::{
        booking::{BookingSelection, PaymentStatus},
        error::CarebookError,
        payment::{PaymentMethod, PaymentOutcome},
    };
    use carebook_core::SessionStore;
    use carebook_gateway::Latency;
    use carebook_ledger::InMemoryLedger;

    use crate::mock_data::{demo_patient, hospital_directory, MockTriage};

    use super::scripted_pipeline;

    /// Drive the scripted scenario at zero latency and check every
    /// intermediate state the printed narrative claims.
    #[tokio::test]
    async fn decline_then_retry_converges() {
        let session = SessionStore::new(demo_patient());
        let ledger = Arc::new(InMemoryLedger::new(session.session_id().0.to_string()));
        let pipeline = scripted_pipeline(Latency::zero(), Arc::clone(&ledger));

        let recommendation = pipeline
            .load_recommendations(&session, &MockTriage::instant())
            .await
            .unwrap();
        let hospital = hospital_directory().unwrap().get("hosp-2").unwrap().clone();

        pipeline
            .save_draft(
                &session,
                BookingSelection {
                    location: hospital.locations[0].clone(),
                    hospital,
                    tests: recommendation.tests,
                    slot: "2026-02-21T09:00".to_string(),
                    insurance_enabled: true,
                },
            )
            .unwrap();
        pipeline.confirm_booking(&session).await.unwrap();

        // First attempt: scripted decline, nothing mutated.
        let first = pipeline
            .process_payment(&session, PaymentMethod::Card, "4111 **** **** 1111")
            .await
            .unwrap();
        assert!(matches!(first, PaymentOutcome::Declined { .. }));
        assert_eq!(session.booking().unwrap().payment_status, PaymentStatus::Pending);
        assert!(ledger.is_empty());

        // Retry: approved, exactly one ledger record.
        let second = pipeline
            .process_payment(&session, PaymentMethod::NetBanking, "MedCity Bank")
            .await
            .unwrap();
        assert!(matches!(second, PaymentOutcome::Approved(_)));
        assert_eq!(session.booking().unwrap().payment_status, PaymentStatus::Paid);
        assert_eq!(ledger.len(), 1);
        assert!(ledger.verify_integrity());

        // Third charge: refused by the idempotence guard.
        let third = pipeline
            .process_payment(&session, PaymentMethod::Card, "4111 **** **** 1111")
            .await;
        assert!(matches!(third, Err(CarebookError::PaymentNotPending { .. })));
        assert_eq!(ledger.len(), 1);
    }
}
