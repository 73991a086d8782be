//! The per-patient session store.
//!
//! `SessionStore` replaces ambient global state with an explicit handle:
//! every pipeline operation takes `&SessionStore` and reads or writes through
//! it. The store is single-writer by construction (one active session per
//! patient) and guards its interior with a `Mutex` so it can be shared with
//! gateway callbacks across await points.
//!
//! The store owns:
//! - the patient (immutable for the session's lifetime)
//! - the current triage recommendation
//! - at most one unconfirmed draft (a new draft supersedes the old)
//! - the latest confirmed booking
//! - the medical-records list, newest first
//! - a bounded notification feed, newest first

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use carebook_contracts::{
    booking::{Booking, DraftBooking},
    error::{CarebookError, CarebookResult},
    patient::{Patient, SessionId},
    report::MedicalRecord,
    triage::Recommendation,
};

/// How many notifications the feed retains. Older entries are dropped.
pub const MAX_NOTIFICATIONS: usize = 5;

/// One entry in the session's notification feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub at: DateTime<Utc>,
}

/// The mutable interior of a `SessionStore`.
struct SessionState {
    recommendation: Option<Recommendation>,
    draft: Option<DraftBooking>,
    booking: Option<Booking>,
    records: Vec<MedicalRecord>,
    notifications: Vec<Notification>,
}

/// The explicit, per-session state handle the pipeline operates on.
pub struct SessionStore {
    session_id: SessionId,
    patient: Patient,
    state: Mutex<SessionState>,
}

impl SessionStore {
    /// Open a fresh session for `patient` with no recommendation, draft,
    /// booking, records, or notifications.
    pub fn new(patient: Patient) -> Self {
        Self {
            session_id: SessionId::new(),
            patient,
            state: Mutex::new(SessionState {
                recommendation: None,
                draft: None,
                booking: None,
                records: Vec::new(),
                notifications: Vec::new(),
            }),
        }
    }

    /// The unique identifier of this session.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// The patient who owns this session.
    pub fn patient(&self) -> &Patient {
        &self.patient
    }

    // ── Triage recommendation ────────────────────────────────────────────────

    pub fn set_recommendation(&self, recommendation: Recommendation) {
        let mut state = self.lock();
        state.recommendation = Some(recommendation);
    }

    pub fn recommendation(&self) -> Option<Recommendation> {
        self.lock().recommendation.clone()
    }

    // ── Draft booking ────────────────────────────────────────────────────────

    /// Store `draft`, superseding any existing draft. At most one draft
    /// exists per session.
    pub fn replace_draft(&self, draft: DraftBooking) {
        let mut state = self.lock();
        state.draft = Some(draft);
    }

    /// The current draft, if any.
    pub fn draft(&self) -> Option<DraftBooking> {
        self.lock().draft.clone()
    }

    /// Remove and return the current draft. Called when a draft is frozen
    /// into a confirmed booking.
    pub fn take_draft(&self) -> Option<DraftBooking> {
        self.lock().draft.take()
    }

    // ── Confirmed booking ────────────────────────────────────────────────────

    /// Store `booking` as the session's latest confirmed booking.
    pub fn store_booking(&self, booking: Booking) {
        let mut state = self.lock();
        state.booking = Some(booking);
    }

    /// The latest confirmed booking, if any.
    pub fn booking(&self) -> Option<Booking> {
        self.lock().booking.clone()
    }

    /// Apply `mutate` to the latest booking and return the updated copy.
    ///
    /// # Errors
    ///
    /// Returns `CarebookError::MissingBooking` when no booking exists.
    pub fn update_booking<F>(&self, mutate: F) -> CarebookResult<Booking>
    where
        F: FnOnce(&mut Booking),
    {
        let mut state = self.lock();
        let booking = state.booking.as_mut().ok_or(CarebookError::MissingBooking)?;
        mutate(booking);
        Ok(booking.clone())
    }

    // ── Medical records ──────────────────────────────────────────────────────

    /// Prepend a medical record; the list is kept newest first.
    pub fn push_record(&self, record: MedicalRecord) {
        let mut state = self.lock();
        state.records.insert(0, record);
    }

    /// All medical records, newest first.
    pub fn records(&self) -> Vec<MedicalRecord> {
        self.lock().records.clone()
    }

    // ── Notifications ────────────────────────────────────────────────────────

    /// Prepend a notification, dropping entries beyond `MAX_NOTIFICATIONS`.
    pub fn notify(&self, message: impl Into<String>) {
        let mut state = self.lock();
        state.notifications.insert(
            0,
            Notification {
                message: message.into(),
                at: Utc::now(),
            },
        );
        state.notifications.truncate(MAX_NOTIFICATIONS);
    }

    /// The notification feed, newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().notifications.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().expect("session state lock poisoned")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
