//! TOML-driven hospital directory.
//!
//! `TomlHospitalDirectory` loads a `DirectoryConfig` from a TOML string or
//! file and exposes validated `Hospital` values.
//!
//! Validation rules, applied per entry at load time:
//!
//! 1. `tax_rate` must lie in [0, 1] (the billing calculator assumes it).
//! 2. `service_fee` must not be negative.
//! 3. `locations` must contain at least one entry (drafts validate their
//!    chosen location against this list).
//!
//! Any violation rejects the whole file with a `ConfigError` naming the
//! offending hospital.

use std::path::Path;

use tracing::{debug, warn};

use carebook_contracts::{
    error::{CarebookError, CarebookResult},
    hospital::{Hospital, HospitalId},
};

use crate::config::{DirectoryConfig, HospitalEntry};

/// A validated, ordered collection of hospitals loaded from TOML.
///
/// Construct via `from_toml_str` or `from_file`, then look hospitals up by
/// id or iterate in declaration order.
#[derive(Debug)]
pub struct TomlHospitalDirectory {
    hospitals: Vec<Hospital>,
}

impl TomlHospitalDirectory {
    /// Parse `s` as TOML and build a validated directory.
    ///
    /// # Errors
    ///
    /// Returns `CarebookError::ConfigError` if the TOML is malformed or any
    /// entry violates a validation rule.
    pub fn from_toml_str(s: &str) -> CarebookResult<Self> {
        let config: DirectoryConfig = toml::from_str(s).map_err(|e| CarebookError::ConfigError {
            reason: format!("failed to parse hospital directory TOML: {}", e),
        })?;

        let hospitals = config
            .hospitals
            .into_iter()
            .map(validate_entry)
            .collect::<CarebookResult<Vec<_>>>()?;

        debug!(hospitals = hospitals.len(), "hospital directory loaded");

        Ok(Self { hospitals })
    }

    /// Read the file at `path` and parse it as a TOML hospital directory.
    ///
    /// # Errors
    ///
    /// Returns `CarebookError::ConfigError` if the file cannot be read or its
    /// contents fail `from_toml_str`.
    pub fn from_file(path: &Path) -> CarebookResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CarebookError::ConfigError {
            reason: format!("failed to read directory file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Look a hospital up by its id.
    pub fn get(&self, id: &str) -> Option<&Hospital> {
        self.hospitals.iter().find(|hospital| hospital.id.0 == id)
    }

    /// All hospitals in declaration order.
    pub fn all(&self) -> &[Hospital] {
        &self.hospitals
    }

    /// The number of hospitals in the directory.
    pub fn len(&self) -> usize {
        self.hospitals.len()
    }

    /// True when the directory holds no hospitals.
    pub fn is_empty(&self) -> bool {
        self.hospitals.is_empty()
    }
}

/// Check one entry against the validation rules and convert it.
fn validate_entry(entry: HospitalEntry) -> CarebookResult<Hospital> {
    if !(0.0..=1.0).contains(&entry.tax_rate) {
        warn!(hospital = %entry.id, tax_rate = entry.tax_rate, "rejected directory entry");
        return Err(CarebookError::ConfigError {
            reason: format!(
                "hospital '{}' has tax_rate {} outside [0, 1]",
                entry.id, entry.tax_rate
            ),
        });
    }

    if entry.service_fee < 0 {
        warn!(hospital = %entry.id, service_fee = entry.service_fee, "rejected directory entry");
        return Err(CarebookError::ConfigError {
            reason: format!(
                "hospital '{}' has negative service_fee {}",
                entry.id, entry.service_fee
            ),
        });
    }

    if entry.locations.is_empty() {
        warn!(hospital = %entry.id, "rejected directory entry");
        return Err(CarebookError::ConfigError {
            reason: format!("hospital '{}' declares no collection locations", entry.id),
        });
    }

    Ok(Hospital {
        id: HospitalId(entry.id),
        name: entry.name,
        address: entry.address,
        locations: entry.locations,
        insurance_available: entry.insurance_available,
        service_fee: entry.service_fee,
        tax_rate: entry.tax_rate,
    })
}
