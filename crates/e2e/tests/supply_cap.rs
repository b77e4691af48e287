//! Many stakers racing toward the mint cap.

use e2e::{account, Harness};
use stake_ledger::{CapPolicy, LedgerError, LedgerParams};

#[test]
fn stakers_drain_headroom_then_mint_nothing() {
    let owner = account(0);
    // 50% per full age on a supply of 1_000 with only 300 of headroom.
    let mut h = Harness::genesis(10_000, owner, LedgerParams::new(1_000, 1_300, 1, 100, 50)).unwrap();
    for i in 1..=4u8 {
        h.ledger.transfer(&owner, &account(i), 250).unwrap();
        h.ledger.stake_all(&account(i)).unwrap();
    }
    h.wait(100);

    let mut minted = Vec::new();
    for i in 1..=4u8 {
        minted.push(h.ledger.reward(&account(i)).unwrap());
        h.assert_invariants();
    }
    // 125 each until the remaining 50 is clamped, then nothing.
    assert_eq!(minted, vec![125, 125, 50, 0]);
    assert_eq!(h.ledger.total_supply(), 1_300);
    assert_eq!(h.ledger.headroom(), 0);

    h.wait(100);
    assert_eq!(h.ledger.reward(&account(1)), Ok(0));
    assert_eq!(h.ledger.stake_of(&account(1)), 250);
}

#[test]
fn reject_policy_keeps_stake_age_on_overshoot() {
    let owner = account(0);
    let params = LedgerParams::new(1_000, 1_100, 1, 100, 50).with_cap_policy(CapPolicy::Reject);
    let mut h = Harness::genesis(10_000, owner, params).unwrap();
    h.ledger.stake_all(&owner).unwrap();
    h.wait(100);
    assert_eq!(
        h.ledger.reward(&owner),
        Err(LedgerError::SupplyCapReached { requested: 500, headroom: 100 })
    );
    assert_eq!(h.ledger.coin_age_of(&owner), 100);
    h.assert_invariants();
}

#[test]
fn top_up_restarts_accrual() {
    let owner = account(0);
    let bob = account(1);
    let mut h = Harness::genesis(10_000, owner, LedgerParams::new(1_000, 10_000, 1, 100, 50)).unwrap();
    h.ledger.transfer(&owner, &bob, 200).unwrap();
    h.ledger.stake_all(&bob).unwrap();
    h.wait(80);
    h.ledger.transfer(&owner, &bob, 200).unwrap();
    h.ledger.stake_all(&bob).unwrap();
    assert_eq!(h.ledger.coin_age_of(&bob), 0);
    h.wait(10);
    // 400 * 10 * 50 / (100 * 100)
    assert_eq!(h.ledger.reward(&bob), Ok(20));
}
