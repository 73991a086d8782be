//! # carebook-core
//!
//! The booking pipeline state machine and session store for the carebook
//! runtime.
//!
//! This crate provides:
//! - The five collaborator traits (`TriageGateway`, `SchedulingGateway`,
//!   `PaymentGateway`, `ReportGateway`, `PaymentHistory`)
//! - The `BookingPipeline` that sequences them and enforces the booking
//!   lifecycle
//! - The `SessionStore`, the explicit per-patient state handle
//!
//! ## Usage
//!
//! ```rust,ignore
//! use carebook_core::{BookingPipeline, SessionStore};
//!
//! let pipeline = BookingPipeline::new(scheduler, payments, reports, ledger);
//! let session = SessionStore::new(patient);
//! pipeline.save_draft(&session, selection)?;
//! let booking = pipeline.confirm_booking(&session).await?;
//! ```

pub mod pipeline;
pub mod session;
pub mod traits;

pub use pipeline::BookingPipeline;
pub use session::{Notification, SessionStore, MAX_NOTIFICATIONS};
