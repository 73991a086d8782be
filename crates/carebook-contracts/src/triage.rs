//! Lab test recommendation types produced by the triage step.
//!
//! Triage itself (symptom intake, AI summarization) is an external
//! collaborator behind the `TriageGateway` seam in carebook-core. These types
//! define only its output contract: a summary plus zero or more recommended
//! tests.

use serde::{Deserialize, Serialize};

/// Stable identifier for a recommended lab test.
///
/// Example: TestId("test-ecg")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestId(pub String);

/// Clinical urgency attached to a recommended test.
///
/// Serialized lowercase ("low" | "medium" | "high") to match the triage
/// service's wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestPriority {
    Low,
    Medium,
    High,
}

/// A single lab test recommended by triage.
///
/// Immutable once recommended: the booking flow copies tests into drafts and
/// bookings but never edits them. `cost` is an integer currency amount with
/// no minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabTest {
    pub id: TestId,
    pub name: String,
    /// Why triage recommended this test, surfaced to the patient verbatim.
    pub reason: String,
    pub priority: TestPriority,
    pub cost: i64,
}

/// The full triage result consumed by the booking flow.
///
/// `tests` may be empty; billing an empty recommendation yields a zero bill
/// with no rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub summary: String,
    pub tests: Vec<LabTest>,
}
