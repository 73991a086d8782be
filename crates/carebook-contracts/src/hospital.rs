//! Hospital configuration types.
//!
//! Hospitals are static configuration loaded by carebook-directory. The
//! booking flow reads `service_fee`, `tax_rate`, and `locations` but never
//! mutates a hospital.

use serde::{Deserialize, Serialize};

/// Stable identifier for a hospital.
///
/// Example: HospitalId("hosp-1")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HospitalId(pub String);

/// One hospital as declared in the directory configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: HospitalId,
    pub name: String,
    pub address: String,
    /// Collection locations a booking may choose from. Never empty; the
    /// directory rejects hospitals without at least one location at load time.
    pub locations: Vec<String>,
    /// Whether the 20% insurance discount may be enabled for this hospital.
    pub insurance_available: bool,
    /// Flat per-test charge added regardless of insurance.
    pub service_fee: i64,
    /// Tax fraction in [0, 1], applied to each test's base price.
    pub tax_rate: f64,
}
