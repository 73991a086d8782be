//! Itemized bill types produced by the billing calculator.
//!
//! All amounts are integer currency values that have already been rounded;
//! aggregates are sums of rounded row values, never re-rounded. That keeps
//! the grand total equal to what the displayed rows add up to, which is the
//! property auditors check first.

use serde::{Deserialize, Serialize};

/// One billed line, derived from a single recommended test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRow {
    /// The test name, copied verbatim for display.
    pub name: String,
    /// The test's cost before any discount.
    pub base_price: i64,
    /// `base_price` with the 20% insurance discount applied when enabled,
    /// otherwise equal to `base_price`.
    pub discounted_price: i64,
    /// The hospital's flat per-test service fee.
    pub service_fee: i64,
    /// Tax computed on the BASE price, not the discounted price.
    pub tax: i64,
    /// `discounted_price + service_fee + tax`.
    pub total: i64,
}

/// The aggregate bill over all recommended tests.
///
/// Invariant: `total == subtotal + fees + taxes` and `total` equals the sum
/// of `rows[i].total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub rows: Vec<BillRow>,
    /// Sum of discounted prices across rows.
    pub subtotal: i64,
    /// Sum of service fees across rows.
    pub fees: i64,
    /// Sum of taxes across rows.
    pub taxes: i64,
    /// Sum of row totals.
    pub total: i64,
}

impl Bill {
    /// The zero bill produced for an empty recommendation.
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            subtotal: 0,
            fees: 0,
            taxes: 0,
            total: 0,
        }
    }
}
