use core::fmt;

use stake_primitives::ArithmeticError;
use thiserror::Error;

use crate::types::{Amount, Seconds, Timestamp};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("ledger already initialized")]
    AlreadyInitialized,

    #[error("ledger not initialized")]
    NotInitialized,

    #[error("invalid parameters: {0}")]
    InvalidParameters(&'static str),

    #[error("insufficient balance ({fault}): available {available}, required {required}")]
    InsufficientBalance { fault: TransferFault, available: Amount, required: Amount },

    #[error("insufficient allowance: available {available}, required {required}")]
    InsufficientAllowance { available: Amount, required: Amount },

    #[error("cannot approve self as spender")]
    SelfApproval,

    #[error("nothing to stake")]
    NothingToStake,

    #[error("nothing staked")]
    NothingStaked,

    #[error("stake too young: age {age}s, minimum {min_age}s")]
    StakeTooYoung { age: Seconds, min_age: Seconds },

    #[error("supply cap reached: requested {requested}, headroom {headroom}")]
    SupplyCapReached { requested: Amount, headroom: Amount },

    #[error("clock returned an invalid timestamp: {0}")]
    InvalidTimestamp(Timestamp),

    #[error("invalid length: expected {expected} got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("arithmetic: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

/// Which transfer precondition left the sender without a spendable balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferFault {
    /// `balance[from] < amount`
    Shortfall,
    /// `from == to`
    SelfTransfer,
    /// `amount == 0`
    ZeroAmount,
}

impl fmt::Display for TransferFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Shortfall => "shortfall",
            Self::SelfTransfer => "self transfer",
            Self::ZeroAmount => "zero amount",
        })
    }
}
