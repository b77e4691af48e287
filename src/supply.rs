//! Supply governor: the only writer of `total_supply`.

use stake_primitives::ArithmeticError;

use crate::config::{CapPolicy, LedgerParams};
use crate::errors::LedgerError;
use crate::types::Amount;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SupplyGovernor {
    total_supply: Amount,
    min_total_supply: Amount,
    max_total_supply: Amount,
    cap_policy: CapPolicy,
}

impl SupplyGovernor {
    /// Genesis: the whole minimum supply exists from the start.
    #[must_use]
    pub const fn genesis(params: &LedgerParams) -> Self {
        Self {
            total_supply: params.min_total_supply,
            min_total_supply: params.min_total_supply,
            max_total_supply: params.max_total_supply,
            cap_policy: params.cap_policy,
        }
    }

    #[must_use]
    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }

    #[must_use]
    pub const fn min_total_supply(&self) -> Amount {
        self.min_total_supply
    }

    #[must_use]
    pub const fn max_total_supply(&self) -> Amount {
        self.max_total_supply
    }

    #[must_use]
    pub const fn headroom(&self) -> Amount {
        self.max_total_supply.saturating_sub(self.total_supply)
    }

    /// How much of `requested` may be minted now. Does not mutate.
    pub const fn plan_mint(&self, requested: Amount) -> Result<Amount, LedgerError> {
        let headroom = self.headroom();
        if requested <= headroom {
            return Ok(requested);
        }
        match self.cap_policy {
            CapPolicy::Clamp => Ok(headroom),
            CapPolicy::Reject => Err(LedgerError::SupplyCapReached { requested, headroom }),
        }
    }

    /// Record an amount previously returned by [`Self::plan_mint`].
    pub fn commit_mint(&mut self, actual: Amount) -> Result<(), LedgerError> {
        if actual > self.headroom() {
            return Err(LedgerError::SupplyCapReached { requested: actual, headroom: self.headroom() });
        }
        self.total_supply = self
            .total_supply
            .checked_add(actual)
            .ok_or(ArithmeticError::Overflow)?;
        Ok(())
    }

    /// Clamp (or reject) and mint in one step; returns the amount minted.
    pub fn authorize_mint(&mut self, requested: Amount) -> Result<Amount, LedgerError> {
        let actual = self.plan_mint(requested)?;
        self.commit_mint(actual)?;
        Ok(actual)
    }
}
