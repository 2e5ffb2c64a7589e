//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Deposit accounts and their per-type defaults
//! - `credit`: Credit lines
//! - `client`: Client type and profile, as read from the directory
//! - `transaction`: Transaction requests and committed records
//! - `error`: Error types for the engine

pub mod account;
pub mod client;
pub mod credit;
pub mod error;
pub mod transaction;

pub use account::{AccountDefaults, DepositAccount, DepositAccountType, ProductId};
pub use client::{Client, ClientId, ClientProfile, ClientType};
pub use credit::{CreditLine, CreditStatus, CreditType};
pub use error::{BankError, StoreError};
pub use transaction::{
    ProductKind, Transaction, TransactionId, TransactionRequest, TransactionType,
};
