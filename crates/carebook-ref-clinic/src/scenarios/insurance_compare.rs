//! Scenario 3: Insurance Discount Comparison
//!
//! Prices the same two tests (ECG 1200, CBC 750) at CityCare rates
//! (fee 199, tax 12%) with and without the insurance discount, printing the
//! published reference figures:
//!
//!   insured:   960+199+144=1303, 600+199+90=889  -> total 2192
//!   uninsured: 1200+199+144=1543, 750+199+90=1039 -> total 2582
//!
//! Also shows the degenerate case: an empty recommendation bills zero.

use carebook_billing::compute_bill;
use carebook_contracts::{
    billing::Bill,
    error::{CarebookError, CarebookResult},
    hospital::Hospital,
    triage::LabTest,
};

use crate::mock_data::{hospital_directory, recommended_tests};

/// The two tests the published comparison uses (ECG and CBC, lipid dropped).
fn comparison_tests() -> Vec<LabTest> {
    recommended_tests()
        .tests
        .into_iter()
        .filter(|test| test.id.0 != "test-lipid")
        .collect()
}

fn print_bill(label: &str, bill: &Bill) {
    println!("  {label}");
    for row in &bill.rows {
        println!(
            "    {:<18} base {:>5} | billed {:>5} | fee {:>4} | tax {:>4} | total {:>5}",
            row.name, row.base_price, row.discounted_price, row.service_fee, row.tax, row.total
        );
    }
    println!(
        "    subtotal {} + fees {} + taxes {} = TOTAL {}",
        bill.subtotal, bill.fees, bill.taxes, bill.total
    );
    println!();
}

/// Run Scenario 3: the same selection priced with and without insurance.
pub async fn run_scenario() -> CarebookResult<()> {
    println!("=== Scenario 3: Insurance Discount Comparison ===");
    println!();

    let directory = hospital_directory()?;
    let hospital: &Hospital = directory
        .get("hosp-1")
        .ok_or_else(|| CarebookError::ConfigError {
            reason: "embedded directory is missing hosp-1".to_string(),
        })?;

    let tests = comparison_tests();
    println!(
        "  Hospital:  {} (fee {}, tax {:.0}%)",
        hospital.name,
        hospital.service_fee,
        hospital.tax_rate * 100.0
    );
    println!();

    let insured = compute_bill(&tests, hospital.service_fee, hospital.tax_rate, true);
    let uninsured = compute_bill(&tests, hospital.service_fee, hospital.tax_rate, false);

    print_bill("With insurance (20% off base price, tax still on base):", &insured);
    print_bill("Without insurance:", &uninsured);

    println!(
        "  Insurance saves {} on this selection.",
        uninsured.total - insured.total
    );

    let empty = compute_bill(&[], hospital.service_fee, hospital.tax_rate, true);
    println!("  An empty recommendation bills {} (no rows).", empty.total);
    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use carebook_billing::compute_bill;

    use super::comparison_tests;
    use crate::mock_data::hospital_directory;

    /// The comparison selection is exactly ECG + CBC.
    #[test]
    fn comparison_uses_ecg_and_cbc() {
        let tests = comparison_tests();
        let names: Vec<&str> = tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["ECG", "Blood Test (CBC)"]);
    }

    /// The scenario's printed figures match the published reference bills.
    #[test]
    fn published_totals_hold_at_citycare_rates() {
        let hospital = hospital_directory().unwrap().get("hosp-1").unwrap().clone();
        let tests = comparison_tests();

        let insured = compute_bill(&tests, hospital.service_fee, hospital.tax_rate, true);
        assert_eq!(insured.rows[0].total, 1303);
        assert_eq!(insured.rows[1].total, 889);
        assert_eq!(insured.total, 2192);

        let uninsured = compute_bill(&tests, hospital.service_fee, hospital.tax_rate, false);
        assert_eq!(uninsured.rows[0].total, 1543);
        assert_eq!(uninsured.rows[1].total, 1039);
        assert_eq!(uninsured.total, 2582);
    }
}
