//! End-to-end scenario tests for the stake ledger.
//!
//! The harness mirrors how a hosting environment drives the ledger: it owns
//! the clock, attributes every call to a caller, and checks the global
//! invariants after each step.

#![forbid(unsafe_code)]
#![deny(warnings)]

use stake_ledger::{AccountId, Ledger, LedgerError, LedgerParams, ManualClock};

pub struct Harness {
    pub clock: ManualClock,
    pub ledger: Ledger<ManualClock>,
}

impl Harness {
    /// Start at an arbitrary non-zero wall-clock instant.
    #[must_use]
    pub fn new(start: u64) -> Self {
        let clock = ManualClock::new(start);
        let ledger = Ledger::new(clock.clone());
        Self { clock, ledger }
    }

    pub fn genesis(start: u64, owner: AccountId, params: LedgerParams) -> Result<Self, LedgerError> {
        let mut h = Self::new(start);
        h.ledger.initialize(owner, params)?;
        Ok(h)
    }

    pub fn wait(&self, secs: u64) {
        self.clock.advance(secs);
    }

    /// Panics with the offending state if any global invariant is broken.
    pub fn assert_invariants(&self) {
        assert!(
            self.ledger.invariants_hold(),
            "invariants broken: supply={} accounts={:?}",
            self.ledger.total_supply(),
            self.ledger.accounts().collect::<Vec<_>>()
        );
    }
}

/// Deterministic test account derived from a small index.
#[must_use]
pub const fn account(i: u8) -> AccountId {
    AccountId([i; 32])
}
