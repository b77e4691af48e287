#![no_main]

use libfuzzer_sys::fuzz_target;
use stake_ledger::{AccountId, Ledger, LedgerParams, ManualClock};

const ACCOUNTS: u8 = 4;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 { return; }

    // Header bytes pick the genesis shape.
    let min_age = u64::from(data[0] % 16) + 1;
    let max_age = min_age + u64::from(data[1]);
    let precision = u64::from(data[2]) + 1;
    let headroom = u128::from(data[3]) * 1_000;
    let params = LedgerParams::new(1_000_000, 1_000_000 + headroom, min_age, max_age, precision);

    let clock = ManualClock::new(1_000);
    let mut ledger = Ledger::new(clock.clone());
    if ledger.initialize(AccountId([0; 32]), params).is_err() { return; }

    // Each op is 3 bytes: opcode, account selector, amount byte.
    for chunk in data[4..].chunks_exact(3) {
        let who = AccountId([chunk[1] % ACCOUNTS; 32]);
        let other = AccountId([(chunk[1] >> 4) % ACCOUNTS; 32]);
        let amount = u128::from(chunk[2]) * 997;
        let before = ledger.state_root().ok();
        let third = AccountId([chunk[2] % ACCOUNTS; 32]);
        let result = match chunk[0] % 7 {
            0 => ledger.transfer(&who, &other, amount),
            1 => ledger.stake_all(&who),
            2 => ledger.unstake_all(&who),
            3 => ledger.reward(&who).map(|_| ()),
            4 => ledger.approve(&who, &other, amount),
            5 => {
                // `who` spends `other`'s allowance.
                let allowance = ledger.allowance(&other, &who);
                let r = ledger.transfer_from(&who, &other, &third, amount);
                if r.is_err() {
                    assert_eq!(ledger.allowance(&other, &who), allowance);
                }
                r
            }
            _ => {
                clock.advance(u64::from(chunk[2]));
                Ok(())
            }
        };
        assert!(ledger.invariants_hold());
        if result.is_err() {
            if let Some(root) = before {
                assert!(ledger.verify_state_root(&root));
            }
        }
    }
});
