//! Genesis parameters for a ledger and their TOML loading.
//!
//! Example:
//! ```toml
//! min_total_supply = "10000000000000000000"
//! max_total_supply = "100000000000000000000"
//! stake_min_age = 1
//! stake_max_age = 60
//! stake_precision = 10
//! cap_policy = "clamp"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::LedgerError;
use crate::types::{Amount, Seconds};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid ledger parameters: {0}")]
    Invalid(#[from] LedgerError),
}

/// What the supply governor does with a mint that exceeds the remaining headroom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapPolicy {
    /// Mint only up to the cap; reaching it is a boundary, not an error.
    #[default]
    Clamp,
    /// Refuse the whole mint with `SupplyCapReached`.
    Reject,
}

/// Parameters fixed at initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerParams {
    #[serde(with = "amount_repr")]
    pub min_total_supply: Amount,
    #[serde(with = "amount_repr")]
    pub max_total_supply: Amount,
    pub stake_min_age: Seconds,
    pub stake_max_age: Seconds,
    /// Percent of the principal paid for a stake held `stake_max_age`.
    pub stake_precision: u64,
    #[serde(default)]
    pub cap_policy: CapPolicy,
}

impl LedgerParams {
    #[must_use]
    pub const fn new(
        min_total_supply: Amount,
        max_total_supply: Amount,
        stake_min_age: Seconds,
        stake_max_age: Seconds,
        stake_precision: u64,
    ) -> Self {
        Self {
            min_total_supply,
            max_total_supply,
            stake_min_age,
            stake_max_age,
            stake_precision,
            cap_policy: CapPolicy::Clamp,
        }
    }

    #[must_use]
    pub const fn with_cap_policy(mut self, cap_policy: CapPolicy) -> Self {
        self.cap_policy = cap_policy;
        self
    }

    pub const fn validate(&self) -> Result<(), LedgerError> {
        if self.min_total_supply == 0 || self.max_total_supply == 0 {
            return Err(LedgerError::InvalidParameters("supplies must be non-zero"));
        }
        if self.min_total_supply > self.max_total_supply {
            return Err(LedgerError::InvalidParameters("min_total_supply exceeds max_total_supply"));
        }
        if self.stake_min_age == 0 || self.stake_max_age == 0 {
            return Err(LedgerError::InvalidParameters("stake ages must be non-zero"));
        }
        if self.stake_min_age > self.stake_max_age {
            return Err(LedgerError::InvalidParameters("stake_min_age exceeds stake_max_age"));
        }
        if self.stake_precision == 0 {
            return Err(LedgerError::InvalidParameters("stake_precision must be non-zero"));
        }
        Ok(())
    }

    /// Parse and validate parameters from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let params: Self = toml::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    /// Load and validate parameters from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

/// TOML integers stop at `i64::MAX`, far below typical 18-decimal supplies,
/// so amounts are accepted as integers or decimal strings and written as strings.
mod amount_repr {
    use core::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    use crate::types::Amount;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(v: &Amount, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(v)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Amount, D::Error> {
        d.deserialize_any(AmountVisitor)
    }

    struct AmountVisitor;

    impl Visitor<'_> for AmountVisitor {
        type Value = Amount;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer or a decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
            Ok(Amount::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
            u64::try_from(v)
                .map(Amount::from)
                .map_err(|_| E::custom("amount must be non-negative"))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<Amount, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
            v.replace('_', "")
                .parse::<Amount>()
                .map_err(|_| E::custom(format!("invalid amount: {v}")))
        }
    }
}
