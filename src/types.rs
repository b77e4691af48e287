use core::fmt;
use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};

/// Token amount in smallest units.
pub type Amount = u128;
/// Seconds since the UNIX epoch.
pub type Timestamp = u64;
/// Duration in seconds.
pub type Seconds = u64;

pub const ACCOUNT_ID_LEN: usize = 32;

/// Opaque account identity supplied by the hosting environment.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct AccountId(pub [u8; ACCOUNT_ID_LEN]);

impl AccountId {
    #[must_use]
    pub const fn new(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.0
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId(")?;
        for b in &self.0[..4] {
            write!(f, "{b:02x}")?;
        }
        write!(f, "..)")
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; ACCOUNT_ID_LEN]> for AccountId {
    fn from(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for AccountId {
    type Error = LedgerError;
    fn try_from(b: &[u8]) -> Result<Self, Self::Error> {
        if b.len() != ACCOUNT_ID_LEN {
            return Err(LedgerError::InvalidLength { expected: ACCOUNT_ID_LEN, got: b.len() });
        }
        let mut arr = [0u8; ACCOUNT_ID_LEN];
        arr.copy_from_slice(b);
        Ok(Self(arr))
    }
}

/// Per-account holdings. `stake_timestamp` is 0 exactly when `stake` is 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub balance: Amount,
    pub stake: Amount,
    pub stake_timestamp: Timestamp,
}

impl Account {
    /// A zero-balance, zero-stake account is logically absent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.balance == 0 && self.stake == 0
    }

    #[must_use]
    pub const fn has_stake(&self) -> bool {
        self.stake > 0
    }
}
