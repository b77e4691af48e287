//! Thread-safe handle for hosts that dispatch operations from several threads.
//!
//! One mutex guards the whole ledger, so each operation's account updates
//! happen inside a single critical section.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::clock::Clock;
use crate::config::LedgerParams;
use crate::errors::LedgerError;
use crate::ledger::Ledger;
use crate::types::{AccountId, Amount};

pub struct SharedLedger<C: Clock> {
    inner: Arc<Mutex<Ledger<C>>>,
}

impl<C: Clock> Clone for SharedLedger<C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<C: Clock> SharedLedger<C> {
    #[must_use]
    pub fn new(ledger: Ledger<C>) -> Self {
        Self { inner: Arc::new(Mutex::new(ledger)) }
    }

    /// Run `f` with exclusive access for its whole duration.
    pub fn with<R>(&self, f: impl FnOnce(&mut Ledger<C>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    pub fn initialize(&self, owner: AccountId, params: LedgerParams) -> Result<(), LedgerError> {
        self.with(|l| l.initialize(owner, params))
    }

    pub fn transfer(&self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        self.with(|l| l.transfer(from, to, amount))
    }

    pub fn approve(&self, owner: &AccountId, spender: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        self.with(|l| l.approve(owner, spender, amount))
    }

    pub fn transfer_from(
        &self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.with(|l| l.transfer_from(spender, from, to, amount))
    }

    pub fn stake_all(&self, account: &AccountId) -> Result<(), LedgerError> {
        self.with(|l| l.stake_all(account))
    }

    pub fn unstake_all(&self, account: &AccountId) -> Result<(), LedgerError> {
        self.with(|l| l.unstake_all(account))
    }

    pub fn reward(&self, account: &AccountId) -> Result<Amount, LedgerError> {
        self.with(|l| l.reward(account))
    }

    pub fn pending_reward(&self, account: &AccountId) -> Result<Amount, LedgerError> {
        self.inner.lock().pending_reward(account)
    }

    #[must_use]
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.inner.lock().allowance(owner, spender)
    }

    #[must_use]
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.inner.lock().balance_of(account)
    }

    #[must_use]
    pub fn stake_of(&self, account: &AccountId) -> Amount {
        self.inner.lock().stake_of(account)
    }

    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.inner.lock().total_supply()
    }
}
