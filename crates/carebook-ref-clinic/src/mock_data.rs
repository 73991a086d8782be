//! Simulated clinical data for the carebook reference clinic.
//!
//! All data in this module is hardcoded and fictional. No external systems
//! are contacted. This module stands in for the real triage service and the
//! hospital master data a production deployment would query.

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::debug;

use carebook_contracts::{
    error::CarebookResult,
    patient::{Patient, PatientId},
    triage::{LabTest, Recommendation, TestId, TestPriority},
};
use carebook_core::traits::TriageGateway;
use carebook_directory::TomlHospitalDirectory;
use carebook_gateway::Latency;

/// The embedded hospital directory the scenarios run against.
pub const HOSPITAL_DIRECTORY_TOML: &str = include_str!("../directory/hospitals.toml");

/// Load the embedded hospital directory.
///
/// # Errors
///
/// Returns `ConfigError` only if the embedded TOML is edited into an invalid
/// state.
pub fn hospital_directory() -> CarebookResult<TomlHospitalDirectory> {
    TomlHospitalDirectory::from_toml_str(HOSPITAL_DIRECTORY_TOML)
}

/// The patient every scenario runs as.
pub fn demo_patient() -> Patient {
    Patient {
        id: PatientId("PAT-1001".to_string()),
        name: "Aarav Patel".to_string(),
        age: 46,
        blood_pressure: "150/95".to_string(),
    }
}

/// The canned triage result for the demo patient's reported symptoms.
///
/// Tests carry the costs the billing scenarios and worked examples assume:
/// ECG 1200, CBC 750, Lipid Profile 1400.
pub fn recommended_tests() -> Recommendation {
    Recommendation {
        summary: "Based on your symptoms (chest pain, high BP), additional diagnostic \
                  tests are recommended to rule out cardiovascular risk."
            .to_string(),
        tests: vec![
            LabTest {
                id: TestId("test-ecg".to_string()),
                name: "ECG".to_string(),
                reason: "Assess electrical heart activity and identify ischemic changes."
                    .to_string(),
                priority: TestPriority::High,
                cost: 1200,
            },
            LabTest {
                id: TestId("test-cbc".to_string()),
                name: "Blood Test (CBC)".to_string(),
                reason: "Detect inflammation, infection, or blood health abnormalities."
                    .to_string(),
                priority: TestPriority::Medium,
                cost: 750,
            },
            LabTest {
                id: TestId("test-lipid".to_string()),
                name: "Lipid Profile".to_string(),
                reason: "Evaluate cholesterol risk factors linked to cardiac disease."
                    .to_string(),
                priority: TestPriority::High,
                cost: 1400,
            },
        ],
    }
}

/// A `TriageGateway` that returns the canned recommendation after the
/// configured triage latency.
pub struct MockTriage {
    latency: Latency,
}

impl MockTriage {
    pub fn new(latency: Latency) -> Self {
        Self { latency }
    }

    /// No-delay variant for tests.
    pub fn instant() -> Self {
        Self::new(Latency::zero())
    }
}

#[async_trait]
impl TriageGateway for MockTriage {
    async fn recommend(&self, patient: &Patient) -> CarebookResult<Recommendation> {
        sleep(self.latency.triage).await;

        let recommendation = recommended_tests();
        debug!(
            patient = %patient.id.0,
            tests = recommendation.tests.len(),
            "mock triage produced recommendation"
        );

        Ok(recommendation)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::{demo_patient, hospital_directory, recommended_tests, MockTriage};
    use carebook_core::traits::TriageGateway;

    #[test]
    fn embedded_directory_is_valid() {
        let directory = hospital_directory().unwrap();
        assert_eq!(directory.len(), 3);
        assert!(directory.get("hosp-1").unwrap().insurance_available);
        assert!(!directory.get("hosp-3").unwrap().insurance_available);
    }

    #[test]
    fn recommendation_costs_match_worked_examples() {
        let recommendation = recommended_tests();
        let costs: Vec<i64> = recommendation.tests.iter().map(|t| t.cost).collect();
        assert_eq!(costs, vec![1200, 750, 1400]);
    }

    #[tokio::test]
    async fn mock_triage_returns_canned_tests() {
        let triage = MockTriage::instant();
        let recommendation = triage.recommend(&demo_patient()).await.unwrap();
        assert_eq!(recommendation.tests.len(), 3);
        assert!(recommendation.summary.contains("cardiovascular"));
    }
}
