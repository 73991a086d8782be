//! Runtime error types for the carebook booking pipeline.
//!
//! All fallible operations in the pipeline return `CarebookResult<T>`.
//! A declined payment is NOT an error: the gateway resolves with
//! `PaymentOutcome::Declined` and the caller retries. Errors here are
//! malformed call sequences, bad configuration, and infrastructure failures.

use thiserror::Error;

/// The unified error type for the carebook runtime.
#[derive(Debug, Error)]
pub enum CarebookError {
    /// A booking was confirmed without a draft in the session.
    #[error("no draft booking exists in this session")]
    MissingDraft,

    /// A payment or report operation ran without a confirmed booking.
    #[error("no confirmed booking exists in this session")]
    MissingBooking,

    /// A charge was attempted against a booking that is not awaiting payment.
    ///
    /// This is the idempotence guard: a booking that is already `paid` can
    /// never be charged a second time.
    #[error("booking '{booking_id}' is not awaiting payment (status: {status})")]
    PaymentNotPending { booking_id: String, status: String },

    /// A completion or report operation ran before the booking was paid.
    #[error("booking '{booking_id}' has no successful payment attached")]
    NotPaid { booking_id: String },

    /// The selected collection location is not offered by the hospital.
    #[error("hospital '{hospital}' has no location named '{location}'")]
    UnknownLocation { hospital: String, location: String },

    /// The payment ledger could not persist a record.
    ///
    /// This is treated as fatal: a payment that cannot be recorded cannot
    /// complete.
    #[error("ledger write failed: {reason}")]
    LedgerWriteFailed { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A gateway could not service the request at all.
    ///
    /// The simulated gateways never produce this; real integrations would.
    #[error("gateway unavailable: {reason}")]
    GatewayUnavailable { reason: String },
}

/// Convenience alias used throughout the carebook crates.
pub type CarebookResult<T> = Result<T, CarebookError>;
