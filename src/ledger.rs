//! The ledger state machine.
//!
//! Every operation samples the clock at most once, validates all
//! preconditions, and only then commits. A returned error means nothing
//! changed.

use log::{debug, info, warn};
use stake_primitives::{ct_eq_hash, ArithmeticError, Hash256};

use crate::accounts::AccountBook;
use crate::clock::{Clock, SystemClock};
use crate::commitment;
use crate::config::LedgerParams;
use crate::errors::LedgerError;
use crate::reward::{self, RewardSchedule};
use crate::stake;
use crate::supply::SupplyGovernor;
use crate::types::{Account, AccountId, Amount, Seconds, Timestamp};

#[derive(Clone, Debug)]
struct LedgerState {
    params: LedgerParams,
    owner: AccountId,
    schedule: RewardSchedule,
    supply: SupplyGovernor,
    book: AccountBook,
}

/// Token ledger with stake tracking and capped reward minting.
///
/// Created uninitialized; [`Ledger::initialize`] succeeds exactly once.
/// Reads on an uninitialized ledger return zero values; writes fail with
/// [`LedgerError::NotInitialized`].
#[derive(Clone, Debug)]
pub struct Ledger<C: Clock = SystemClock> {
    clock: C,
    state: Option<LedgerState>,
}

impl Default for Ledger<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> Ledger<C> {
    #[must_use]
    pub const fn new(clock: C) -> Self {
        Self { clock, state: None }
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    #[must_use]
    pub fn params(&self) -> Option<&LedgerParams> {
        self.state.as_ref().map(|s| &s.params)
    }

    #[must_use]
    pub fn owner(&self) -> Option<AccountId> {
        self.state.as_ref().map(|s| s.owner)
    }

    fn active(&self) -> Result<&LedgerState, LedgerError> {
        self.state.as_ref().ok_or(LedgerError::NotInitialized)
    }

    fn active_mut(&mut self) -> Result<&mut LedgerState, LedgerError> {
        self.state.as_mut().ok_or(LedgerError::NotInitialized)
    }

    /// A zero reading would make a fresh stake indistinguishable from no stake.
    fn sample_now(&self) -> Result<Timestamp, LedgerError> {
        match self.clock.now() {
            0 => Err(LedgerError::InvalidTimestamp(0)),
            now => Ok(now),
        }
    }

    /// One-time setup: fixes the parameters and credits the whole minimum
    /// supply to `owner`.
    pub fn initialize(&mut self, owner: AccountId, params: LedgerParams) -> Result<(), LedgerError> {
        if self.state.is_some() {
            return Err(LedgerError::AlreadyInitialized);
        }
        params.validate()?;
        let mut book = AccountBook::new();
        book.credit(owner, params.min_total_supply)?;
        self.state = Some(LedgerState {
            schedule: RewardSchedule::from(&params),
            supply: SupplyGovernor::genesis(&params),
            params,
            owner,
            book,
        });
        info!(
            "ledger initialized: owner={owner:?} supply={}..={} stake_age={}..={}s precision={} policy={:?}",
            params.min_total_supply,
            params.max_total_supply,
            params.stake_min_age,
            params.stake_max_age,
            params.stake_precision,
            params.cap_policy
        );
        Ok(())
    }

    pub fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        self.active_mut()?.book.transfer(from, to, amount)?;
        debug!("transfer {from:?} -> {to:?}: {amount}");
        Ok(())
    }

    pub fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        self.active_mut()?.book.approve(owner, spender, amount)?;
        debug!("approve {owner:?} -> {spender:?}: {amount}");
        Ok(())
    }

    pub fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.active_mut()?.book.transfer_from(spender, from, to, amount)?;
        debug!("transfer_from by {spender:?}: {from:?} -> {to:?}: {amount}");
        Ok(())
    }

    /// Lock the caller's entire balance; adding to an existing stake restarts its age.
    pub fn stake_all(&mut self, account: &AccountId) -> Result<(), LedgerError> {
        self.active()?;
        let now = self.sample_now()?;
        let st = self.active_mut()?;
        let next = stake::stake_all(&st.book.get(account), now)?;
        st.book.put(*account, next);
        debug!("stake_all {account:?}: stake={} at {now}", next.stake);
        Ok(())
    }

    /// Return the caller's entire stake to its balance. Unclaimed reward is lost.
    pub fn unstake_all(&mut self, account: &AccountId) -> Result<(), LedgerError> {
        let st = self.active_mut()?;
        let next = stake::unstake_all(&st.book.get(account))?;
        st.book.put(*account, next);
        debug!("unstake_all {account:?}: balance={}", next.balance);
        Ok(())
    }

    /// Mint the reward accrued on the caller's stake into its balance and
    /// start a new earning period. Returns the amount actually minted, which
    /// is 0 once the supply cap is reached under the clamp policy.
    pub fn reward(&mut self, account: &AccountId) -> Result<Amount, LedgerError> {
        self.active()?;
        let now = self.sample_now()?;
        let st = self.active_mut()?;
        let acct = st.book.get(account);
        let owed = reward::accrued(&acct, now, &st.schedule)?;
        let minted = st.supply.plan_mint(owed)?;
        let mut next = stake::restart_age(&acct, now);
        next.balance = next
            .balance
            .checked_add(minted)
            .ok_or(ArithmeticError::Overflow)?;

        st.supply.commit_mint(minted)?;
        st.book.put(*account, next);

        if minted < owed {
            warn!("reward for {account:?} clamped by supply cap: owed {owed}, minted {minted}");
        }
        debug!(
            "reward {account:?}: minted {minted}, total_supply={}",
            st.supply.total_supply()
        );
        Ok(minted)
    }

    /// What [`Ledger::reward`] would mint right now, without minting it.
    pub fn pending_reward(&self, account: &AccountId) -> Result<Amount, LedgerError> {
        let st = self.active()?;
        let now = self.sample_now()?;
        let owed = reward::accrued(&st.book.get(account), now, &st.schedule)?;
        st.supply.plan_mint(owed)
    }

    #[must_use]
    pub fn account(&self, account: &AccountId) -> Account {
        self.state
            .as_ref()
            .map(|s| s.book.get(account))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.account(account).balance
    }

    #[must_use]
    pub fn stake_of(&self, account: &AccountId) -> Amount {
        self.account(account).stake
    }

    #[must_use]
    pub fn stake_timestamp_of(&self, account: &AccountId) -> Timestamp {
        self.account(account).stake_timestamp
    }

    /// Seconds the caller's current stake has been accruing.
    #[must_use]
    pub fn coin_age_of(&self, account: &AccountId) -> Seconds {
        stake::coin_age(&self.account(account), self.clock.now())
    }

    #[must_use]
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.state
            .as_ref()
            .map_or(0, |s| s.book.allowance(owner, spender))
    }

    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.state.as_ref().map_or(0, |s| s.supply.total_supply())
    }

    #[must_use]
    pub fn max_total_supply(&self) -> Amount {
        self.state.as_ref().map_or(0, |s| s.supply.max_total_supply())
    }

    /// Units that may still be minted before the cap.
    #[must_use]
    pub fn headroom(&self) -> Amount {
        self.state.as_ref().map_or(0, |s| s.supply.headroom())
    }

    /// Live accounts in key order.
    pub fn accounts(&self) -> impl Iterator<Item = (&AccountId, &Account)> {
        self.state.iter().flat_map(|s| s.book.iter())
    }

    /// Conservation, cap, and stake/timestamp pairing over the whole ledger.
    #[must_use]
    pub fn invariants_hold(&self) -> bool {
        let Some(st) = self.state.as_ref() else {
            return true;
        };
        let total = st.supply.total_supply();
        let paired = st
            .book
            .iter()
            .all(|(_, a)| (a.stake == 0) == (a.stake_timestamp == 0));
        st.book.total_holdings() == Some(total)
            && st.supply.min_total_supply() <= total
            && total <= st.supply.max_total_supply()
            && paired
    }

    pub fn state_root(&self) -> Result<Hash256, LedgerError> {
        let st = self.active()?;
        Ok(commitment::state_root(&st.book, &st.supply))
    }

    #[must_use]
    pub fn verify_state_root(&self, expected: &Hash256) -> bool {
        self.state_root().is_ok_and(|root| ct_eq_hash(&root, expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::CapPolicy;
    use crate::errors::TransferFault;
    use stake_primitives::constants::UNITS_PER_TOKEN;

    const OWNER: AccountId = AccountId([0xA0; 32]);
    const BOB: AccountId = AccountId([0xB0; 32]);
    const CAROL: AccountId = AccountId([0xC0; 32]);

    fn params() -> LedgerParams {
        LedgerParams::new(10 * UNITS_PER_TOKEN, 100 * UNITS_PER_TOKEN, 1, 60, 10)
    }

    fn ledger() -> (Ledger<ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_700_000_000);
        let mut l = Ledger::new(clock.clone());
        l.initialize(OWNER, params()).unwrap();
        (l, clock)
    }

    #[test]
    fn initialize_credits_owner_once() {
        let (mut l, _) = ledger();
        assert_eq!(l.total_supply(), 10 * UNITS_PER_TOKEN);
        assert_eq!(l.balance_of(&OWNER), 10 * UNITS_PER_TOKEN);
        assert_eq!(l.owner(), Some(OWNER));
        assert_eq!(l.initialize(BOB, params()), Err(LedgerError::AlreadyInitialized));
        assert_eq!(l.balance_of(&BOB), 0);
    }

    #[test]
    fn initialize_validates_parameters() {
        let mut l = Ledger::new(ManualClock::new(1));
        let bad = LedgerParams::new(10, 5, 1, 60, 10);
        assert!(matches!(l.initialize(OWNER, bad), Err(LedgerError::InvalidParameters(_))));
        assert!(!l.is_initialized());
        l.initialize(OWNER, LedgerParams::new(5, 10, 1, 60, 10)).unwrap();
    }

    #[test]
    fn writes_before_initialize_fail_and_reads_are_zero() {
        let mut l = Ledger::new(ManualClock::new(1));
        assert_eq!(l.transfer(&OWNER, &BOB, 1), Err(LedgerError::NotInitialized));
        assert_eq!(l.stake_all(&OWNER), Err(LedgerError::NotInitialized));
        assert_eq!(l.reward(&OWNER), Err(LedgerError::NotInitialized));
        assert_eq!(l.total_supply(), 0);
        assert_eq!(l.balance_of(&OWNER), 0);
        assert!(l.state_root().is_err());
        assert!(l.invariants_hold());
    }

    #[test]
    fn reward_mints_and_restarts_age() {
        let (mut l, clock) = ledger();
        l.transfer(&OWNER, &BOB, UNITS_PER_TOKEN).unwrap();
        l.stake_all(&BOB).unwrap();
        clock.advance(5);
        assert_eq!(l.coin_age_of(&BOB), 5);
        let preview = l.pending_reward(&BOB).unwrap();
        let minted = l.reward(&BOB).unwrap();
        assert_eq!(minted, preview);
        assert_eq!(minted, 8_333_333_333_333_333);
        assert_eq!(l.balance_of(&BOB), minted);
        assert_eq!(l.stake_of(&BOB), UNITS_PER_TOKEN);
        assert_eq!(l.coin_age_of(&BOB), 0);
        assert_eq!(l.total_supply(), 10 * UNITS_PER_TOKEN + minted);
        assert!(l.invariants_hold());
    }

    #[test]
    fn premature_reward_changes_nothing() {
        let clock = ManualClock::new(1_700_000_000);
        let mut l = Ledger::new(clock.clone());
        l.initialize(OWNER, LedgerParams::new(10, 100, 10, 60, 10)).unwrap();
        assert_eq!(l.reward(&BOB), Err(LedgerError::NothingStaked));
        l.stake_all(&OWNER).unwrap();
        clock.advance(3);
        let root = l.state_root().unwrap();
        assert_eq!(l.pending_reward(&OWNER), Err(LedgerError::StakeTooYoung { age: 3, min_age: 10 }));
        assert_eq!(l.reward(&OWNER), Err(LedgerError::StakeTooYoung { age: 3, min_age: 10 }));
        assert!(l.verify_state_root(&root));
    }

    #[test]
    fn reward_is_clamped_at_the_cap() {
        let clock = ManualClock::new(1_000);
        let mut l = Ledger::new(clock.clone());
        // 100% per max age on 10 units, but only 3 units of headroom.
        l.initialize(OWNER, LedgerParams::new(10, 13, 1, 10, 100)).unwrap();
        l.stake_all(&OWNER).unwrap();
        clock.advance(10);
        assert_eq!(l.reward(&OWNER), Ok(3));
        assert_eq!(l.total_supply(), 13);
        clock.advance(10);
        assert_eq!(l.reward(&OWNER), Ok(0));
        assert_eq!(l.stake_timestamp_of(&OWNER), 1_020);
        assert!(l.invariants_hold());
    }

    #[test]
    fn reject_policy_surfaces_cap() {
        let clock = ManualClock::new(1_000);
        let mut l = Ledger::new(clock.clone());
        let p = LedgerParams::new(10, 13, 1, 10, 100).with_cap_policy(CapPolicy::Reject);
        l.initialize(OWNER, p).unwrap();
        l.stake_all(&OWNER).unwrap();
        clock.advance(10);
        assert_eq!(
            l.reward(&OWNER),
            Err(LedgerError::SupplyCapReached { requested: 10, headroom: 3 })
        );
        assert_eq!(l.total_supply(), 10);
        assert_eq!(l.stake_timestamp_of(&OWNER), 1_000);
    }

    #[test]
    fn zero_clock_is_refused_for_timestamped_operations() {
        let clock = ManualClock::new(0);
        let mut l = Ledger::new(clock);
        l.initialize(OWNER, params()).unwrap();
        assert_eq!(l.stake_all(&OWNER), Err(LedgerError::InvalidTimestamp(0)));
        assert_eq!(l.stake_of(&OWNER), 0);
    }

    #[test]
    fn zero_clock_is_refused_for_reward_and_preview() {
        let (mut l, clock) = ledger();
        l.stake_all(&OWNER).unwrap();
        clock.set(0);
        let root = l.state_root().unwrap();
        assert_eq!(l.pending_reward(&OWNER), Err(LedgerError::InvalidTimestamp(0)));
        assert_eq!(l.reward(&OWNER), Err(LedgerError::InvalidTimestamp(0)));
        assert_eq!(l.total_supply(), 10 * UNITS_PER_TOKEN);
        assert!(l.verify_state_root(&root));
    }

    #[test]
    fn transfer_from_moves_through_allowance() {
        let (mut l, _) = ledger();
        l.approve(&OWNER, &CAROL, 5).unwrap();
        l.transfer_from(&CAROL, &OWNER, &BOB, 5).unwrap();
        assert_eq!(l.balance_of(&BOB), 5);
        assert_eq!(l.allowance(&OWNER, &CAROL), 0);
        assert!(l.invariants_hold());
    }

    #[test]
    fn every_transfer_violation_is_insufficient_balance() {
        let (mut l, _) = ledger();
        l.transfer(&OWNER, &BOB, 10).unwrap();
        let root = l.state_root().unwrap();
        for (to, amount) in [(BOB, 5), (CAROL, 0), (CAROL, 11)] {
            assert!(
                matches!(l.transfer(&BOB, &to, amount), Err(LedgerError::InsufficientBalance { available: 10, .. })),
                "{to:?} {amount}"
            );
        }
        assert!(l.verify_state_root(&root));
    }

    #[test]
    fn staked_funds_cannot_be_transferred() {
        let (mut l, _) = ledger();
        l.stake_all(&OWNER).unwrap();
        assert_eq!(
            l.transfer(&OWNER, &BOB, 1),
            Err(LedgerError::InsufficientBalance { fault: TransferFault::Shortfall, available: 0, required: 1 })
        );
        assert_eq!(l.accounts().count(), 1);
    }
}
