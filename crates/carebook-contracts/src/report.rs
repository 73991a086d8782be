//! Lab report types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::BookingId;

/// Identifier assigned by the report service on upload.
///
/// Example: ReportId("REP-45120099")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub String);

/// A lab report descriptor returned by the report service.
///
/// The runtime never inspects report contents; `file_name` is the only
/// payload reference it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabReport {
    pub report_id: ReportId,
    pub booking_id: BookingId,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
}

/// One entry in the patient's medical-records list, newest first.
///
/// Wraps the raw report with the display context the records view needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub report: LabReport,
    pub hospital_name: String,
    pub test_names: Vec<String>,
}
