//! Bank Products Engine Library
//! # Overview
//!
//! Core of a bank products service: opening deposit accounts and credit
//! lines under per-client eligibility rules, and applying deposits,
//! withdrawals and purchases to them with per-account serialization.
//!
//! # Architecture
//!
//! - [`types`] - Domain records (DepositAccount, CreditLine, Transaction, Client) and errors
//! - [`core`] - Business logic:
//!   - [`core::provisioning`] - Opening products, duplicate and eligibility checks
//!   - [`core::router`] - Resolving a transaction target to a deposit account or credit line
//!   - [`core::processor`] - Validating and applying transactions, transaction history
//!   - [`core::catalog`] - Administrative lookups, deletions and the product report
//!   - [`core::traits`] - Collaborator contracts with in-memory implementations in [`core::memory`]
//! - [`io`] - CSV readers for seed and transaction files, product output
//! - [`strategy`] - Sync and async replay pipelines
//! - [`cli`] - CLI arguments parsing and log setup
//!
//! # Transaction Types
//!
//! - **Deposit**: Credit funds to a deposit account
//! - **Withdrawal**: Debit funds from a deposit account (never below zero)
//! - **Purchase**: Debit funds from a deposit account (never below zero)
//!
//! Any transaction against a credit line draws `amount * (100 + rate) / 100`
//! from its available balance.
//!
//! # Deposit Account Defaults
//!
//! | type       | commission free | movements free | movements limit | commission |
//! |------------|-----------------|----------------|-----------------|------------|
//! | SAVINGS    | yes             | no             | 10              | -          |
//! | CURRENT    | no              | yes            | -               | 20.0       |
//! | FIXED_TERM | yes             | no             | 1               | -          |

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{
    AccountProvisioning, ProductCatalog, ProductReport, SubmitOutcome, TransactionProcessor,
    TransactionRouter,
};
pub use crate::io::write_products_csv;
pub use crate::types::{
    BankError, Client, ClientId, CreditLine, CreditStatus, CreditType, DepositAccount,
    DepositAccountType, ProductId, ProductKind, Transaction, TransactionRequest, TransactionType,
};
