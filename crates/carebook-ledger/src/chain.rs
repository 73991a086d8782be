//! Hash-chain primitives: entry hashing and chain integrity verification.
//!
//! Every field that contributes to an entry's hash is listed explicitly so
//! nothing is accidentally omitted.
//!
//! Hash input layout (bytes, in order):
//!   1. ledger_id as UTF-8 bytes
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. canonical JSON of record (serde_json with no pretty-printing)

use sha2::{Digest, Sha256};

use carebook_contracts::payment::PaymentRecord;

use crate::entry::LedgerEntry;

/// Compute the SHA-256 hash for a single ledger entry.
///
/// The hash commits to every field that uniquely identifies an entry:
/// its position in the chain (`sequence`), the ledger it belongs to
/// (`ledger_id`), its link to the previous entry (`prev_hash`), and the
/// full payment record (`record`).
///
/// Returns a lowercase 64-character hex string.
///
/// # Panics
///
/// Panics if `record` cannot be serialized to JSON, which cannot happen
/// for the well-formed `PaymentRecord` type.
pub fn hash_entry(
    ledger_id: &str,
    sequence: u64,
    record: &PaymentRecord,
    prev_hash: &str,
) -> String {
    // serde_json::to_vec produces canonical, deterministic JSON without
    // trailing whitespace or key reordering across calls on the same value.
    let record_json =
        serde_json::to_vec(record).expect("PaymentRecord must always be serializable to JSON");

    let mut hasher = Sha256::new();
    hasher.update(ledger_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&record_json);

    hex::encode(hasher.finalize())
}

/// Verify the integrity of a hash chain.
///
/// Returns `true` when the chain is valid according to both rules:
///
/// 1. **Prev-hash linkage**: each entry's `prev_hash` equals the
///    `this_hash` of the preceding entry (or `GENESIS_HASH` for entry 0).
/// 2. **Hash correctness**: each entry's `this_hash` matches the value
///    recomputed from its own fields.
///
/// Returns `false` the moment any mismatch is detected.  An empty chain
/// is defined as valid.
pub fn verify_chain(entries: &[LedgerEntry]) -> bool {
    let mut expected_prev = LedgerEntry::GENESIS_HASH.to_string();

    for entry in entries {
        // Rule 1: the stored prev_hash must match what we expect.
        if entry.prev_hash != expected_prev {
            return false;
        }

        // Rule 2: recompute this_hash and compare to the stored value.
        let recomputed = hash_entry(
            &entry.ledger_id,
            entry.sequence,
            &entry.record,
            &entry.prev_hash,
        );
        if entry.this_hash != recomputed {
            return false;
        }

        // Advance the expected prev_hash to this entry's hash.
        expected_prev = entry.this_hash.clone();
    }

    true
}
