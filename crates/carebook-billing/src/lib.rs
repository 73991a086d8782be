//! # carebook-billing
//!
//! Pure, deterministic bill computation for the carebook runtime.
//!
//! This crate owns exactly one operation, [`compute_bill`]: given the
//! recommended tests, a hospital's service fee and tax rate, and the
//! insurance flag, it produces an itemized [`Bill`](carebook_contracts::billing::Bill).
//! No side effects, no error paths, no I/O.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use carebook_billing::compute_bill;
//!
//! let bill = compute_bill(&recommendation.tests, hospital.service_fee, hospital.tax_rate, true);
//! assert_eq!(bill.total, bill.subtotal + bill.fees + bill.taxes);
//! ```

pub mod calculator;

pub use calculator::{compute_bill, INSURANCE_DISCOUNT};
