//! Patient identity and session types.
//!
//! A session belongs to exactly one patient. There is no cross-patient
//! sharing and no concurrent mutation; the session store in carebook-core is
//! the single writer.

use serde::{Deserialize, Serialize};

/// Stable, human-readable identifier for a patient.
///
/// Example: PatientId("PAT-1001")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(pub String);

/// Unique identifier for a single patient session.
///
/// Every session store carries one of these; it appears in ledger ids and
/// structured log fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    /// Create a new, unique session ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// The patient who owns a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub age: u32,
    /// Most recent blood pressure reading, recorded as "systolic/diastolic".
    pub blood_pressure: String,
}
