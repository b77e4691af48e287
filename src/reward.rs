//! Time-weighted reward calculation.
//!
//! `reward = stake * min(age, max_age) * precision / (max_age * SCALING_BASE)`,
//! floored, with a 256-bit intermediate. A stake held exactly `max_age` earns
//! `precision` percent of its principal; holding longer earns nothing extra.

use stake_primitives::constants::SCALING_BASE;
use stake_primitives::{mul3_div_floor_saturating, ArithmeticError};

use crate::config::LedgerParams;
use crate::errors::LedgerError;
use crate::stake;
use crate::types::{Account, Amount, Seconds, Timestamp};

/// The subset of genesis parameters the calculator reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardSchedule {
    pub min_age: Seconds,
    pub max_age: Seconds,
    pub precision: u64,
}

impl From<&LedgerParams> for RewardSchedule {
    fn from(p: &LedgerParams) -> Self {
        Self {
            min_age: p.stake_min_age,
            max_age: p.stake_max_age,
            precision: p.stake_precision,
        }
    }
}

/// Pure reward function. Returns 0 for an age below `min_age`; a quotient
/// wider than 128 bits saturates at `u128::MAX`.
pub fn compute_reward(
    stake_amount: Amount,
    stake_timestamp: Timestamp,
    now: Timestamp,
    min_age: Seconds,
    max_age: Seconds,
    precision: u64,
) -> Result<Amount, ArithmeticError> {
    let age = now.saturating_sub(stake_timestamp);
    if age < min_age || stake_amount == 0 {
        return Ok(0);
    }
    let effective_age = age.min(max_age);
    let den = u128::from(max_age) * SCALING_BASE;
    mul3_div_floor_saturating(
        stake_amount,
        u128::from(effective_age),
        u128::from(precision),
        den,
    )
}

/// Unclamped reward owed to `acct` at `now`, or why none may be claimed.
pub fn accrued(acct: &Account, now: Timestamp, schedule: &RewardSchedule) -> Result<Amount, LedgerError> {
    if !acct.has_stake() {
        return Err(LedgerError::NothingStaked);
    }
    let age = stake::coin_age(acct, now);
    if age < schedule.min_age {
        return Err(LedgerError::StakeTooYoung { age, min_age: schedule.min_age });
    }
    Ok(compute_reward(
        acct.stake,
        acct.stake_timestamp,
        now,
        schedule.min_age,
        schedule.max_age,
        schedule.precision,
    )?)
}
