//! Deterministic commitment over ledger state, for replicas to compare.

use stake_primitives::{constants, h_tag, le_bytes, merkle_root, Hash256};

use crate::accounts::AccountBook;
use crate::supply::SupplyGovernor;
use crate::types::{Account, AccountId};

/// `H("stake.account.leaf", [id, LE16(balance), LE16(stake), LE8(stake_timestamp)])`
#[must_use]
pub fn account_leaf(id: &AccountId, acct: &Account) -> Hash256 {
    h_tag(
        constants::TAG_ACCOUNT_LEAF,
        &[
            id.as_bytes(),
            &le_bytes::<16>(acct.balance),
            &le_bytes::<16>(acct.stake),
            &le_bytes::<8>(u128::from(acct.stake_timestamp)),
        ],
    )
}

/// `H("stake.supply.leaf", [LE16(total), LE16(min), LE16(max)])`
#[must_use]
pub fn supply_leaf(supply: &SupplyGovernor) -> Hash256 {
    h_tag(
        constants::TAG_SUPPLY_LEAF,
        &[
            &le_bytes::<16>(supply.total_supply()),
            &le_bytes::<16>(supply.min_total_supply()),
            &le_bytes::<16>(supply.max_total_supply()),
        ],
    )
}

/// Merkle root over live accounts in key order, then the supply leaf.
#[must_use]
pub fn state_root(book: &AccountBook, supply: &SupplyGovernor) -> Hash256 {
    let mut leaves: Vec<Vec<u8>> = book
        .iter()
        .map(|(id, acct)| account_leaf(id, acct).to_vec())
        .collect();
    leaves.push(supply_leaf(supply).to_vec());
    merkle_root(&leaves)
}
