//! Hospital directory configuration schema.
//!
//! A `DirectoryConfig` is deserialized from TOML and holds an ordered list of
//! `HospitalEntry` tables. Entries are validated when the directory is built;
//! a single bad entry rejects the whole file so misconfiguration is caught at
//! startup rather than at billing time.

use serde::{Deserialize, Serialize};

/// A single hospital as declared in TOML.
///
/// Example:
/// ```toml
/// [[hospitals]]
/// id = "hosp-1"
/// name = "CityCare Multi-Speciality Hospital"
/// address = "12 Heartline Ave, MedCity"
/// locations = ["Downtown Center", "North Campus"]
/// insurance_available = true
/// service_fee = 199
/// tax_rate = 0.12
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalEntry {
    /// Stable identifier used in bookings and log fields.
    pub id: String,

    /// Display name shown throughout the booking flow.
    pub name: String,

    /// Street address shown on confirmations and records.
    pub address: String,

    /// Collection locations a booking may choose from. Must not be empty.
    pub locations: Vec<String>,

    /// Whether the insurance discount may be enabled at this hospital.
    #[serde(default)]
    pub insurance_available: bool,

    /// Flat per-test service fee. Must not be negative.
    pub service_fee: i64,

    /// Tax fraction applied to base test prices. Must lie in [0, 1].
    pub tax_rate: f64,
}

/// The top-level structure deserialized from a TOML directory file.
///
/// Hospitals keep their declaration order; the first entry is the default
/// selection in the booking UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Ordered list of hospitals.
    pub hospitals: Vec<HospitalEntry>,
}
