//! # carebook-directory
//!
//! A TOML-driven hospital directory for the carebook runtime.
//!
//! ## Overview
//!
//! This crate provides [`TomlHospitalDirectory`], which parses `[[hospitals]]`
//! tables from TOML into validated
//! [`Hospital`](carebook_contracts::hospital::Hospital) values. Validation
//! happens once at load time so the billing calculator and booking pipeline
//! can assume well-formed fees, tax rates, and location lists.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use carebook_directory::TomlHospitalDirectory;
//!
//! let directory = TomlHospitalDirectory::from_file(Path::new("directory/hospitals.toml"))?;
//! let citycare = directory.get("hosp-1");
//! ```

pub mod config;
pub mod directory;

pub use config::{DirectoryConfig, HospitalEntry};
pub use directory::TomlHospitalDirectory;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use carebook_contracts::error::CarebookError;

    use crate::TomlHospitalDirectory;

    const VALID_DIRECTORY: &str = r#"
        [[hospitals]]
        id = "hosp-1"
        name = "CityCare Multi-Speciality Hospital"
        address = "12 Heartline Ave, MedCity"
        locations = ["Downtown Center", "North Campus", "East Wing Diagnostics"]
        insurance_available = true
        service_fee = 199
        tax_rate = 0.12

        [[hospitals]]
        id = "hosp-2"
        name = "Fortis Hospital"
        address = "48 Lakeview Road, MedCity"
        locations = ["Lakeview Main Block"]
        service_fee = 249
        tax_rate = 0.18
    "#;

    // ── 1. parsing and lookup ─────────────────────────────────────────────────

    #[test]
    fn test_parse_and_lookup() {
        let directory = TomlHospitalDirectory::from_toml_str(VALID_DIRECTORY).unwrap();

        assert_eq!(directory.len(), 2);

        let citycare = directory.get("hosp-1").unwrap();
        assert_eq!(citycare.name, "CityCare Multi-Speciality Hospital");
        assert_eq!(citycare.service_fee, 199);
        assert_eq!(citycare.locations.len(), 3);
        assert!(citycare.insurance_available);

        assert!(directory.get("hosp-99").is_none());
    }

    /// `insurance_available` defaults to false when omitted.
    #[test]
    fn test_insurance_defaults_to_false() {
        let directory = TomlHospitalDirectory::from_toml_str(VALID_DIRECTORY).unwrap();
        assert!(!directory.get("hosp-2").unwrap().insurance_available);
    }

    /// Hospitals keep their declaration order.
    #[test]
    fn test_declaration_order_preserved() {
        let directory = TomlHospitalDirectory::from_toml_str(VALID_DIRECTORY).unwrap();
        let ids: Vec<&str> = directory.all().iter().map(|h| h.id.0.as_str()).collect();
        assert_eq!(ids, vec!["hosp-1", "hosp-2"]);
    }

    // ── 2. validation failures ────────────────────────────────────────────────

    /// A tax rate above 1 rejects the file and names the hospital.
    #[test]
    fn test_tax_rate_out_of_range() {
        let toml = r#"
            [[hospitals]]
            id = "hosp-bad"
            name = "Bad Hospital"
            address = "1 Nowhere"
            locations = ["Main"]
            service_fee = 100
            tax_rate = 1.5
        "#;

        match TomlHospitalDirectory::from_toml_str(toml) {
            Err(CarebookError::ConfigError { reason }) => {
                assert!(reason.contains("hosp-bad"), "reason should name the hospital: {reason}");
                assert!(reason.contains("tax_rate"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_service_fee() {
        let toml = r#"
            [[hospitals]]
            id = "hosp-bad"
            name = "Bad Hospital"
            address = "1 Nowhere"
            locations = ["Main"]
            service_fee = -5
            tax_rate = 0.1
        "#;

        match TomlHospitalDirectory::from_toml_str(toml) {
            Err(CarebookError::ConfigError { reason }) => {
                assert!(reason.contains("negative service_fee"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_locations() {
        let toml = r#"
            [[hospitals]]
            id = "hosp-bad"
            name = "Bad Hospital"
            address = "1 Nowhere"
            locations = []
            service_fee = 100
            tax_rate = 0.1
        "#;

        match TomlHospitalDirectory::from_toml_str(toml) {
            Err(CarebookError::ConfigError { reason }) => {
                assert!(reason.contains("no collection locations"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    /// One bad entry rejects the whole file, including the valid entries.
    #[test]
    fn test_single_bad_entry_rejects_file() {
        let toml = format!(
            "{VALID_DIRECTORY}\n\
             [[hospitals]]\n\
             id = \"hosp-bad\"\n\
             name = \"Bad Hospital\"\n\
             address = \"1 Nowhere\"\n\
             locations = []\n\
             service_fee = 100\n\
             tax_rate = 0.1\n"
        );

        assert!(TomlHospitalDirectory::from_toml_str(&toml).is_err());
    }

    // ── 3. TOML parse error ───────────────────────────────────────────────────

    /// Malformed TOML must produce a `CarebookError::ConfigError`.
    #[test]
    fn test_toml_parse_error() {
        let bad_toml = r#"
            this is not valid toml ][[[
        "#;

        match TomlHospitalDirectory::from_toml_str(bad_toml) {
            Err(CarebookError::ConfigError { reason }) => {
                assert!(
                    reason.contains("failed to parse hospital directory TOML"),
                    "expected parse error message, got: {reason}"
                );
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }
}
