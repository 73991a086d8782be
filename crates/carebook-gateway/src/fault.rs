//! Pluggable fault injection for the simulated payment gateway.
//!
//! The payment leg fails roughly 20% of the time to exercise the retry UX.
//! Rather than baking that probability into the gateway, the draw lives
//! behind `FaultStrategy`, so production-like demos use the uniform draw and
//! tests force either branch deterministically.

use std::collections::VecDeque;
use std::sync::Mutex;

use rand::Rng;

/// The failure rate the demo runs with when nothing else is configured.
pub const DEFAULT_FAILURE_RATE: f64 = 0.2;

/// Decides, per charge attempt, whether the simulated gateway declines.
///
/// Implementations must be cheap and side-effect free apart from their own
/// internal bookkeeping; the gateway consults them exactly once per charge.
pub trait FaultStrategy: Send + Sync {
    /// Return true when the next charge attempt should be declined.
    fn next_charge_fails(&self) -> bool;
}

/// Every charge succeeds. The happy-path default for tests and demos.
pub struct NoFaults;

impl FaultStrategy for NoFaults {
    fn next_charge_fails(&self) -> bool {
        false
    }
}

/// Every charge is declined. Exercises the failure branch deterministically.
pub struct AlwaysFail;

impl FaultStrategy for AlwaysFail {
    fn next_charge_fails(&self) -> bool {
        true
    }
}

/// Declines each charge independently with probability `rate`.
pub struct UniformFaults {
    rate: f64,
}

impl UniformFaults {
    /// A uniform draw with the given failure probability in [0, 1].
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// The demo default: decline roughly one charge in five.
    pub fn default_rate() -> Self {
        Self::new(DEFAULT_FAILURE_RATE)
    }
}

impl FaultStrategy for UniformFaults {
    fn next_charge_fails(&self) -> bool {
        rand::thread_rng().gen::<f64>() < self.rate
    }
}

/// Replays a pre-programmed sequence of outcomes, then succeeds forever.
///
/// `true` entries decline, `false` entries approve. The deterministic way to
/// script decline-then-retry flows in tests and the retry demo scenario.
pub struct ScriptedFaults {
    script: Mutex<VecDeque<bool>>,
}

impl ScriptedFaults {
    pub fn new(script: impl IntoIterator<Item = bool>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }
}

impl FaultStrategy for ScriptedFaults {
    fn next_charge_fails(&self) -> bool {
        self.script
            .lock()
            .expect("fault script lock poisoned")
            .pop_front()
            .unwrap_or(false)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::{AlwaysFail, FaultStrategy, NoFaults, ScriptedFaults, UniformFaults};

    #[test]
    fn no_faults_never_fails() {
        let strategy = NoFaults;
        assert!((0..100).all(|_| !strategy.next_charge_fails()));
    }

    #[test]
    fn always_fail_always_fails() {
        let strategy = AlwaysFail;
        assert!((0..100).all(|_| strategy.next_charge_fails()));
    }

    /// The degenerate rates 0.0 and 1.0 are deterministic.
    #[test]
    fn uniform_extremes_are_deterministic() {
        let never = UniformFaults::new(0.0);
        assert!((0..100).all(|_| !never.next_charge_fails()));

        let always = UniformFaults::new(1.0);
        assert!((0..100).all(|_| always.next_charge_fails()));
    }

    /// A script replays in order, then falls back to success.
    #[test]
    fn scripted_faults_replay_then_succeed() {
        let strategy = ScriptedFaults::new([true, false, true]);

        assert!(strategy.next_charge_fails());
        assert!(!strategy.next_charge_fails());
        assert!(strategy.next_charge_fails());

        // Script exhausted: every further charge succeeds.
        assert!(!strategy.next_charge_fails());
        assert!(!strategy.next_charge_fails());
    }
}
