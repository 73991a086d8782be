//! # carebook-ref-clinic
//!
//! Reference clinic for the carebook billing and booking runtime.
//!
//! Demonstrates the flow in three scenarios using mock clinical data:
//!
//! 1. **End-to-End Lab Booking** — triage through confirmed booking,
//!    payment (with the default uniform fault draw), completion, and report
//!    upload, finishing with a ledger integrity check.
//! 2. **Payment Decline and Manual Retry** — a scripted decline, the
//!    user-triggered retry, and the idempotence guard that refuses a third
//!    charge.
//! 3. **Insurance Discount Comparison** — the same selection priced with and
//!    without the 20% discount, reproducing the published reference figures.
//!
//! All data is hardcoded and fictional. No external API calls are made.

pub mod mock_data;
pub mod scenarios;
