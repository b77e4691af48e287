//! Stake record transitions. Each function returns the new record and
//! leaves committing it to the caller, so a failure never mutates anything.

use stake_primitives::ArithmeticError;

use crate::errors::LedgerError;
use crate::types::{Account, Seconds, Timestamp};

/// Lock the whole spendable balance. A top-up of an existing stake restarts
/// its age at `now`.
pub fn stake_all(acct: &Account, now: Timestamp) -> Result<Account, LedgerError> {
    if acct.balance == 0 {
        return Err(LedgerError::NothingToStake);
    }
    let stake = acct
        .stake
        .checked_add(acct.balance)
        .ok_or(ArithmeticError::Overflow)?;
    Ok(Account { balance: 0, stake, stake_timestamp: now })
}

/// Release the whole stake back to the balance. Unclaimed reward is forfeited.
pub fn unstake_all(acct: &Account) -> Result<Account, LedgerError> {
    if acct.stake == 0 {
        return Err(LedgerError::NothingStaked);
    }
    let balance = acct
        .balance
        .checked_add(acct.stake)
        .ok_or(ArithmeticError::Overflow)?;
    Ok(Account { balance, stake: 0, stake_timestamp: 0 })
}

/// Seconds since the stake's age baseline; 0 without a stake or when the
/// clock reads earlier than the baseline.
#[must_use]
pub const fn coin_age(acct: &Account, now: Timestamp) -> Seconds {
    if acct.stake == 0 {
        return 0;
    }
    now.saturating_sub(acct.stake_timestamp)
}

/// Begin a new earning period without touching the principal.
#[must_use]
pub const fn restart_age(acct: &Account, now: Timestamp) -> Account {
    Account { balance: acct.balance, stake: acct.stake, stake_timestamp: now }
}
