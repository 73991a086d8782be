//! Payment request, outcome, and ledger record types.
//!
//! The payment gateway resolves with a `PaymentOutcome` in both directions:
//! a decline is a value, not an error. Callers check the outcome variant, not
//! a Result, which mirrors how the retry UX consumes it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::BookingId;

/// Identifier assigned by the payment gateway to a successful charge.
///
/// Example: PaymentId("PAY-004512876")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentId(pub String);

/// Invoice number attached to a successful charge.
///
/// Example: InvoiceId("INV-482913")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceId(pub String);

/// How the patient chose to pay.
///
/// Serialized kebab-case ("card" | "upi" | "net-banking").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Card,
    Upi,
    NetBanking,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Upi => "upi",
            PaymentMethod::NetBanking => "net-banking",
        };
        f.write_str(name)
    }
}

/// Everything the payment gateway needs to attempt a charge.
///
/// `amount` is always the bill total of the booking being paid; the pipeline
/// never charges a partial amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeRequest {
    pub booking_id: BookingId,
    pub amount: i64,
    pub method: PaymentMethod,
    /// Method-specific detail string (masked card number, UPI handle, bank
    /// name). Opaque to the runtime.
    pub details: String,
}

/// The gateway's answer to a charge attempt.
///
/// `Declined` is recoverable: the booking stays pending and the patient may
/// retry with the same or a different method. There is no automatic retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentOutcome {
    /// The charge succeeded; the receipt carries the assigned identifiers.
    Approved(PaymentReceipt),
    /// The charge failed. No state was mutated anywhere.
    Declined {
        /// User-visible explanation, surfaced verbatim by the retry UX.
        error: String,
    },
}

/// Proof of a successful charge, attached to the booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub payment_id: PaymentId,
    pub invoice_id: InvoiceId,
    pub booking_id: BookingId,
    pub amount: i64,
    pub method: PaymentMethod,
    /// Wall-clock time (UTC) the gateway approved the charge.
    pub paid_at: DateTime<Utc>,
}

/// One entry in the append-only payment history ledger.
///
/// Written exactly once per successful charge; never modified or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub payment_id: PaymentId,
    pub invoice_id: InvoiceId,
    pub amount: i64,
    pub method: PaymentMethod,
    pub date: DateTime<Utc>,
    pub booking_id: BookingId,
}

impl From<PaymentReceipt> for PaymentRecord {
    fn from(receipt: PaymentReceipt) -> Self {
        Self {
            payment_id: receipt.payment_id,
            invoice_id: receipt.invoice_id,
            amount: receipt.amount,
            method: receipt.method,
            date: receipt.paid_at,
            booking_id: receipt.booking_id,
        }
    }
}
