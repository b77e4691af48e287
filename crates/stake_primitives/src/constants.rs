#![forbid(unsafe_code)]

/// Decimal places of one whole token.
pub const DECIMALS: u32 = 18;
/// Smallest units per whole token (`10^DECIMALS`).
pub const UNITS_PER_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Reward normalization: `stake_precision` is a percentage of the principal
/// paid for a stake held exactly `stake_max_age`.
pub const SCALING_BASE: u128 = 100;

/// Largest exponent for which `10^exp` fits in a `u128`.
pub const MAX_POW10_EXP: u32 = 38;

pub const TAG_MERKLE_LEAF: &str = "stake.merkle.leaf";
pub const TAG_MERKLE_NODE: &str = "stake.merkle.node";
pub const TAG_MERKLE_EMPTY: &str = "stake.merkle.empty";

pub const TAG_ACCOUNT_LEAF: &str = "stake.account.leaf";
pub const TAG_SUPPLY_LEAF: &str = "stake.supply.leaf";
