//! carebook Reference Clinic — Demo CLI
//!
//! Runs one or all of the three booking-flow scenarios.  Each scenario uses
//! real carebook components (billing calculator, booking pipeline, simulated
//! gateways, hash-chained payment ledger) wired together with mock clinical
//! data.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- lab-booking
//!   cargo run -p demo -- payment-retry
//!   cargo run -p demo -- insurance-compare

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use carebook_ref_clinic::scenarios::{insurance_compare, lab_booking, payment_retry};

// ── CLI definition ────────────────────────────────────────────────────────────

/// carebook — patient lab booking and billing demo.
///
/// Each subcommand runs one or all of the three scenarios, demonstrating
/// deterministic billing, the booking state machine, and payment retry.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "carebook reference clinic demo",
    long_about = "Runs carebook booking-flow scenarios showing deterministic billing,\n\
                  the draft/confirm/pay/report state machine, payment fault injection,\n\
                  and payment ledger chain integrity."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three scenarios in sequence.
    RunAll,
    /// Scenario 1: End-to-end lab booking (triage through report upload).
    LabBooking,
    /// Scenario 2: Payment decline and manual retry (scripted fault).
    PaymentRetry,
    /// Scenario 3: Insurance discount comparison (reference bill figures).
    InsuranceCompare,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all().await,
        Command::LabBooking => lab_booking::run_scenario().await,
        Command::PaymentRetry => payment_retry::run_scenario().await,
        Command::InsuranceCompare => insurance_compare::run_scenario().await,
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

async fn run_all() -> carebook_contracts::error::CarebookResult<()> {
    lab_booking::run_scenario().await?;
    payment_retry::run_scenario().await?;
    insurance_compare::run_scenario().await?;
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("carebook — Lab Booking & Billing Runtime");
    println!("Reference Clinic Demo");
    println!("========================================");
    println!();
    println!("Booking lifecycle per session:");
    println!("  [1] Triage recommends tests (mock collaborator)");
    println!("  [2] Billing calculator prices the selection (pure, deterministic)");
    println!("  [3] Draft frozen and confirmed — booking id assigned, payment pending");
    println!("  [4] Payment charged via simulated gateway — declines retried by the user");
    println!("  [5] Success appends one record to the SHA-256 chained payment ledger");
    println!("  [6] Lab completes tests; report attaches to booking and medical records");
    println!();
}
