//! # carebook-ledger
//!
//! Immutable, append-only, SHA-256 hash-chained payment history for the
//! carebook runtime.
//!
//! ## Overview
//!
//! Every successful charge the pipeline records is wrapped in a
//! `LedgerEntry` that links to the previous entry via its SHA-256 hash.
//! Tampering with any entry, even a single byte, breaks the chain and is
//! detected by `verify_chain`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use carebook_ledger::InMemoryLedger;
//! use carebook_core::traits::PaymentHistory;
//!
//! let ledger = InMemoryLedger::new("session-001");
//! ledger.append(&payment_record)?;
//!
//! assert!(ledger.verify_integrity());
//! let newest_first = ledger.recent();
//! let snapshot = ledger.export();
//! ```

pub mod chain;
pub mod entry;
pub mod memory;

pub use chain::{hash_entry, verify_chain};
pub use entry::{LedgerEntry, LedgerExport};
pub use memory::InMemoryLedger;

// ── Tests ─────────────────────────────────────────────────────────────────────
