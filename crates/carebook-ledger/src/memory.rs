//! In-memory implementation of `PaymentHistory`.
//!
//! `InMemoryLedger` is the reference implementation of the
//! `PaymentHistory` trait.  It keeps all entries in a `Vec` protected by a
//! `Mutex`, making it safe to share while the pipeline appends across await
//! points.
//!
//! Use `recent()` for the newest-first view the payment history screen
//! renders, `export()` for a sealed snapshot, and `verify_integrity()` at
//! any time to confirm the chain has not been tampered with in memory.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::info;

use carebook_contracts::{
    error::{CarebookError, CarebookResult},
    payment::PaymentRecord,
};
use carebook_core::traits::PaymentHistory;

use crate::{
    chain::{hash_entry, verify_chain},
    entry::{LedgerEntry, LedgerExport},
};

// ── Internal mutable state ────────────────────────────────────────────────────

/// The mutable interior of an `InMemoryLedger`.
///
/// Kept behind `Arc<Mutex<_>>` so that both `InMemoryLedger` and any clones
/// of the `Arc` can safely observe or export the accumulated entries.
pub(crate) struct LedgerState {
    /// All entries written so far, in append order (oldest first).
    pub(crate) entries: Vec<LedgerEntry>,

    /// The next sequence number to assign (starts at 0).
    pub(crate) sequence: u64,

    /// The `this_hash` of the last written entry, or `GENESIS_HASH` before
    /// any entry has been written.
    pub(crate) last_hash: String,
}

// ── Public ledger ─────────────────────────────────────────────────────────────

/// An in-memory, append-only payment ledger backed by a SHA-256 hash chain.
///
/// # Thread safety
///
/// `append()` acquires a `Mutex` internally.  Multiple threads may hold
/// clones of the `Arc<Mutex<LedgerState>>` without additional
/// synchronization.
pub struct InMemoryLedger {
    ledger_id: String,
    pub(crate) state: Arc<Mutex<LedgerState>>,
}

impl InMemoryLedger {
    /// Create a new ledger with the given identifier.
    ///
    /// The internal `last_hash` is initialized to `LedgerEntry::GENESIS_HASH`
    /// so the first entry's `prev_hash` is automatically correct.
    pub fn new(ledger_id: impl Into<String>) -> Self {
        let ledger_id = ledger_id.into();
        let state = LedgerState {
            entries: Vec::new(),
            sequence: 0,
            last_hash: LedgerEntry::GENESIS_HASH.to_string(),
        };
        Self {
            ledger_id,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Export a sealed `LedgerExport` containing all entries written so far.
    ///
    /// The `terminal_hash` is the `this_hash` of the last entry, or an empty
    /// string when no entries have been written.
    pub fn export(&self) -> LedgerExport {
        let state = self.state.lock().expect("ledger state lock poisoned");
        let terminal_hash = state
            .entries
            .last()
            .map(|entry| entry.this_hash.clone())
            .unwrap_or_default();

        LedgerExport {
            ledger_id: self.ledger_id.clone(),
            entries: state.entries.clone(),
            exported_at: Utc::now(),
            terminal_hash,
        }
    }

    /// Verify that the in-memory chain has not been tampered with.
    ///
    /// Delegates to `verify_chain`, which checks both prev-hash linkage and
    /// hash correctness for every entry.
    pub fn verify_integrity(&self) -> bool {
        let state = self.state.lock().expect("ledger state lock poisoned");
        verify_chain(&state.entries)
    }

    /// The number of entries written so far.
    pub fn len(&self) -> usize {
        self.state.lock().expect("ledger state lock poisoned").entries.len()
    }

    /// True when no entries have been written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── PaymentHistory impl ───────────────────────────────────────────────────────

impl PaymentHistory for InMemoryLedger {
    /// Append one payment record to the hash chain.
    ///
    /// Computes `this_hash` from (ledger_id, sequence, prev_hash, record),
    /// wraps the record in a `LedgerEntry`, appends it, then advances the
    /// sequence counter and `last_hash`.
    ///
    /// Returns `Err(LedgerWriteFailed)` only if the internal mutex is
    /// poisoned, which cannot happen under normal operation.
    fn append(&self, record: &PaymentRecord) -> CarebookResult<()> {
        let mut state = self.state.lock().map_err(|e| CarebookError::LedgerWriteFailed {
            reason: format!("ledger state lock poisoned: {}", e),
        })?;

        let prev_hash = state.last_hash.clone();
        let sequence = state.sequence;

        let this_hash = hash_entry(&self.ledger_id, sequence, record, &prev_hash);

        let entry = LedgerEntry {
            sequence,
            ledger_id: self.ledger_id.clone(),
            record: record.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        };

        state.entries.push(entry);
        state.sequence += 1;
        state.last_hash = this_hash;

        info!(
            ledger_id = %self.ledger_id,
            sequence,
            payment_id = %record.payment_id.0,
            amount = record.amount,
            "payment record appended"
        );

        Ok(())
    }

    /// Return all records newest first, the order the history view displays.
    ///
    /// The chain itself stays in append order; only this read-side view is
    /// reversed.
    fn recent(&self) -> Vec<PaymentRecord> {
        let state = self.state.lock().expect("ledger state lock poisoned");
        state
            .entries
            .iter()
            .rev()
            .map(|entry| entry.record.clone())
            .collect()
    }
}
