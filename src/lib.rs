#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

//! Stake Ledger
//!
//! A token ledger with an embedded proof-of-stake reward engine. Balances can
//! be transferred, locked into a stake, and later redeemed together with a
//! time-weighted reward minted under a global supply cap.
//!
//! The ledger is a single sequential state machine. Time comes from a
//! [`Clock`] collaborator and is sampled once per operation; caller identity
//! is passed explicitly as an [`AccountId`].

// Core modules
pub mod types;
pub mod errors;
pub mod config;
pub mod clock;
pub mod accounts;
pub mod stake;
pub mod reward;
pub mod supply;
pub mod commitment;
pub mod ledger;
pub mod shared;

// Re-export commonly used types and functions
pub use types::*;
pub use errors::{LedgerError, TransferFault};
pub use config::{CapPolicy, ConfigError, LedgerParams};
pub use clock::{Clock, ManualClock, SystemClock};
pub use reward::{compute_reward, RewardSchedule};
pub use supply::SupplyGovernor;
pub use ledger::Ledger;
pub use shared::SharedLedger;
pub use stake_primitives::{constants, Hash256};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
