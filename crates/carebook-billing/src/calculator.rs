//! The bill calculator: a pure function from selections to an itemized bill.
//!
//! Pricing rules, applied per row:
//!
//!   discounted_price = insurance ? round(base * 0.8) : base
//!   tax              = round(base * tax_rate)        (tax on the BASE price)
//!   total            = discounted_price + service_fee + tax
//!
//! Aggregates are sums of already-rounded row values. The grand total is the
//! sum of row totals, never a re-round of the raw sum, so it always equals
//! what the displayed rows add up to regardless of aggregation order.

use tracing::debug;

use carebook_contracts::{
    billing::{Bill, BillRow},
    triage::LabTest,
};

/// The fixed insurance discount: 20% off each test's base price.
pub const INSURANCE_DISCOUNT: f64 = 0.20;

/// Round a non-negative currency product half-up to the nearest integer.
///
/// `f64::round` rounds halves away from zero, which coincides with half-up
/// for the non-negative amounts billing produces.
fn round_half_up(amount: f64) -> i64 {
    amount.round() as i64
}

/// Compute the itemized bill for a set of recommended tests.
///
/// Pure and deterministic: identical inputs produce an identical `Bill`, a
/// property the booking flow relies on because it prices twice, once as a
/// live preview and once when freezing the draft.
///
/// `tests` may be empty, yielding `Bill::empty()`. Callers are responsible
/// for `tax_rate` being in [0, 1] and `service_fee >= 0`; the hospital
/// directory enforces both at configuration load time.
pub fn compute_bill(
    tests: &[LabTest],
    service_fee: i64,
    tax_rate: f64,
    insurance_enabled: bool,
) -> Bill {
    let rows: Vec<BillRow> = tests
        .iter()
        .map(|test| {
            let base_price = test.cost;
            let discounted_price = if insurance_enabled {
                round_half_up(base_price as f64 * (1.0 - INSURANCE_DISCOUNT))
            } else {
                base_price
            };
            let tax = round_half_up(base_price as f64 * tax_rate);

            BillRow {
                name: test.name.clone(),
                base_price,
                discounted_price,
                service_fee,
                tax,
                total: discounted_price + service_fee + tax,
            }
        })
        .collect();

    let subtotal: i64 = rows.iter().map(|row| row.discounted_price).sum();
    let fees: i64 = rows.iter().map(|row| row.service_fee).sum();
    let taxes: i64 = rows.iter().map(|row| row.tax).sum();

    let bill = Bill {
        rows,
        subtotal,
        fees,
        taxes,
        total: subtotal + fees + taxes,
    };

    debug!(
        rows = bill.rows.len(),
        subtotal = bill.subtotal,
        fees = bill.fees,
        taxes = bill.taxes,
        total = bill.total,
        insurance = insurance_enabled,
        "bill computed"
    );

    bill
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use carebook_contracts::triage::{LabTest, TestId, TestPriority};

    use super::compute_bill;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn test(id: &str, name: &str, cost: i64) -> LabTest {
        LabTest {
            id: TestId(id.to_string()),
            name: name.to_string(),
            reason: "recommended by triage".to_string(),
            priority: TestPriority::High,
            cost,
        }
    }

    fn sample_tests() -> Vec<LabTest> {
        vec![test("test-ecg", "ECG", 1200), test("test-cbc", "Blood Test (CBC)", 750)]
    }

    // ── Worked examples ───────────────────────────────────────────────────────

    /// ECG 1200 + CBC 750, fee 199, tax 12%, insurance on.
    #[test]
    fn worked_example_with_insurance() {
        let bill = compute_bill(&sample_tests(), 199, 0.12, true);

        assert_eq!(bill.rows.len(), 2);

        assert_eq!(bill.rows[0].discounted_price, 960);
        assert_eq!(bill.rows[0].tax, 144);
        assert_eq!(bill.rows[0].total, 1303);

        assert_eq!(bill.rows[1].discounted_price, 600);
        assert_eq!(bill.rows[1].tax, 90);
        assert_eq!(bill.rows[1].total, 889);

        assert_eq!(bill.total, 2192);
    }

    /// Same tests with insurance off: discounted price equals base price.
    #[test]
    fn worked_example_without_insurance() {
        let bill = compute_bill(&sample_tests(), 199, 0.12, false);

        assert_eq!(bill.rows[0].discounted_price, 1200);
        assert_eq!(bill.rows[0].total, 1543);

        assert_eq!(bill.rows[1].discounted_price, 750);
        assert_eq!(bill.rows[1].total, 1039);

        assert_eq!(bill.total, 2582);
    }

    // ── P1: total consistency ─────────────────────────────────────────────────

    /// The grand total must equal both the sum of row totals and the sum of
    /// the three aggregate columns, across a spread of inputs.
    #[test]
    fn total_equals_row_sum_and_column_sum() {
        let cases = [
            (vec![test("a", "A", 1200), test("b", "B", 750), test("c", "C", 1400)], 199, 0.12, true),
            (vec![test("a", "A", 1), test("b", "B", 3)], 0, 0.18, true),
            (vec![test("a", "A", 999)], 149, 0.05, false),
            (vec![test("a", "A", 101), test("b", "B", 77), test("c", "C", 13)], 25, 1.0, true),
            (vec![test("a", "A", 500)], 0, 0.0, false),
        ];

        for (tests, fee, rate, insurance) in cases {
            let bill = compute_bill(&tests, fee, rate, insurance);

            let row_sum: i64 = bill.rows.iter().map(|row| row.total).sum();
            assert_eq!(bill.total, row_sum, "total must equal sum of row totals");
            assert_eq!(
                bill.total,
                bill.subtotal + bill.fees + bill.taxes,
                "total must equal subtotal + fees + taxes"
            );
        }
    }

    // ── P2: determinism ───────────────────────────────────────────────────────

    /// Two calls with identical inputs must produce an identical bill. The
    /// flow prices twice (live preview, then frozen draft) and shows the
    /// patient both.
    #[test]
    fn identical_inputs_produce_identical_bills() {
        let tests = sample_tests();
        let first = compute_bill(&tests, 199, 0.12, true);
        let second = compute_bill(&tests, 199, 0.12, true);
        assert_eq!(first, second);
    }

    // ── P3: insurance discount bound ──────────────────────────────────────────

    /// With insurance, every discounted price is at most the base price; without,
    /// it is exactly the base price.
    #[test]
    fn discount_never_exceeds_base_price() {
        let tests = vec![test("a", "A", 1200), test("b", "B", 1), test("c", "C", 0)];

        let with = compute_bill(&tests, 199, 0.12, true);
        for row in &with.rows {
            assert!(row.discounted_price <= row.base_price);
        }

        let without = compute_bill(&tests, 199, 0.12, false);
        for row in &without.rows {
            assert_eq!(row.discounted_price, row.base_price);
        }
    }

    // ── P4: empty input ───────────────────────────────────────────────────────

    /// No tests yields the zero bill with no rows.
    #[test]
    fn empty_tests_yield_zero_bill() {
        let bill = compute_bill(&[], 199, 0.12, true);

        assert!(bill.rows.is_empty());
        assert_eq!(bill.subtotal, 0);
        assert_eq!(bill.fees, 0);
        assert_eq!(bill.taxes, 0);
        assert_eq!(bill.total, 0);
    }

    // ── Rounding and rule details ─────────────────────────────────────────────

    /// Tax is computed on the base price even when the discount is applied.
    #[test]
    fn tax_is_computed_on_base_price() {
        let tests = vec![test("a", "A", 1000)];

        let with = compute_bill(&tests, 0, 0.1, true);
        let without = compute_bill(&tests, 0, 0.1, false);

        // 100 either way: the discount must not shrink the tax base.
        assert_eq!(with.rows[0].tax, 100);
        assert_eq!(without.rows[0].tax, 100);
        assert_eq!(with.rows[0].discounted_price, 800);
    }

    /// Rounding happens independently per row, half-up.
    #[test]
    fn per_row_half_up_rounding() {
        // 333 * 0.12 = 39.96 -> 40; 333 * 0.8 = 266.4 -> 266
        let bill = compute_bill(&[test("a", "A", 333)], 0, 0.12, true);
        assert_eq!(bill.rows[0].tax, 40);
        assert_eq!(bill.rows[0].discounted_price, 266);

        // 125 * 0.5 = 62.5 rounds up to 63.
        let half = compute_bill(&[test("b", "B", 125)], 0, 0.5, false);
        assert_eq!(half.rows[0].tax, 63);
    }

    /// The service fee is charged per test, regardless of insurance.
    #[test]
    fn service_fee_applies_per_row() {
        let bill = compute_bill(&sample_tests(), 199, 0.0, true);
        assert_eq!(bill.fees, 398);
        for row in &bill.rows {
            assert_eq!(row.service_fee, 199);
        }
    }
}
