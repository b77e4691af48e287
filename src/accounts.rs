//! Account ledger: identity -> holdings, plus spending allowances.
//!
//! Lookups default explicitly on a miss; a record that becomes empty is
//! dropped so the map only ever holds live accounts.

use std::collections::BTreeMap;

use crate::errors::{LedgerError, TransferFault};
use crate::types::{Account, AccountId, Amount, Timestamp};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountBook {
    accounts: BTreeMap<AccountId, Account>,
    allowances: BTreeMap<(AccountId, AccountId), Amount>,
}

impl AccountBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of `id`, zero-valued when absent.
    #[must_use]
    pub fn get(&self, id: &AccountId) -> Account {
        self.accounts.get(id).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn balance_of(&self, id: &AccountId) -> Amount {
        self.get(id).balance
    }

    #[must_use]
    pub fn stake_of(&self, id: &AccountId) -> Amount {
        self.get(id).stake
    }

    #[must_use]
    pub fn stake_timestamp_of(&self, id: &AccountId) -> Timestamp {
        self.get(id).stake_timestamp
    }

    /// Overwrite the record for `id`. Empty records are removed.
    pub fn put(&mut self, id: AccountId, account: Account) {
        debug_assert_eq!(account.stake == 0, account.stake_timestamp == 0);
        if account.is_empty() {
            self.accounts.remove(&id);
        } else {
            self.accounts.insert(id, account);
        }
    }

    /// Add freshly created units to a balance.
    pub fn credit(&mut self, id: AccountId, amount: Amount) -> Result<(), LedgerError> {
        let mut acct = self.get(&id);
        acct.balance = acct
            .balance
            .checked_add(amount)
            .ok_or(stake_primitives::ArithmeticError::Overflow)?;
        self.put(id, acct);
        Ok(())
    }

    /// Check every transfer precondition without mutating anything. Each
    /// violation is an `InsufficientBalance` tagged with the failing check.
    pub fn check_transfer(&self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        let available = self.balance_of(from);
        let fault = if from == to {
            Some(TransferFault::SelfTransfer)
        } else if amount == 0 {
            Some(TransferFault::ZeroAmount)
        } else if available < amount {
            Some(TransferFault::Shortfall)
        } else {
            None
        };
        if let Some(fault) = fault {
            return Err(LedgerError::InsufficientBalance { fault, available, required: amount });
        }
        if self.balance_of(to).checked_add(amount).is_none() {
            return Err(stake_primitives::ArithmeticError::Overflow.into());
        }
        Ok(())
    }

    /// Move `amount` of spendable balance. Stakes are untouched.
    pub fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        self.check_transfer(from, to, amount)?;
        let mut src = self.get(from);
        let mut dst = self.get(to);
        src.balance -= amount;
        dst.balance += amount;
        self.put(*from, src);
        self.put(*to, dst);
        Ok(())
    }

    #[must_use]
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    /// Set (not add to) what `spender` may move out of `owner`'s balance.
    pub fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        if owner == spender {
            return Err(LedgerError::SelfApproval);
        }
        if amount == 0 {
            self.allowances.remove(&(*owner, *spender));
        } else {
            self.allowances.insert((*owner, *spender), amount);
        }
        Ok(())
    }

    /// Transfer on behalf of `from`, consuming `spender`'s allowance.
    pub fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let available = self.allowance(from, spender);
        if available < amount {
            return Err(LedgerError::InsufficientAllowance { available, required: amount });
        }
        self.transfer(from, to, amount)?;
        let remaining = available - amount;
        if remaining == 0 {
            self.allowances.remove(&(*from, *spender));
        } else {
            self.allowances.insert((*from, *spender), remaining);
        }
        Ok(())
    }

    /// Live accounts in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, &Account)> {
        self.accounts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Σ (balance + stake) over all accounts; `None` on overflow.
    #[must_use]
    pub fn total_holdings(&self) -> Option<Amount> {
        self.accounts
            .values()
            .try_fold(0u128, |acc, a| acc.checked_add(a.balance)?.checked_add(a.stake))
    }
}
