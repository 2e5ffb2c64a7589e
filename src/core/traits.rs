//! Collaborator contracts consumed by the engine
//!
//! Persistence and client lookup live outside the engine. These traits are
//! the narrow interfaces it calls through; `core::memory` provides
//! DashMap-backed implementations used by the CLI and by tests.
//!
//! Every method is blocking from the engine's point of view and reports
//! collaborator failures as `StoreError`.

use crate::types::{
    Client, CreditLine, CreditType, DepositAccount, DepositAccountType, StoreError, Transaction,
};

/// Persistence for deposit accounts and credit lines
pub trait ProductStore: Send + Sync {
    /// Load a deposit account by identifier
    fn find_deposit(&self, id: &str) -> Result<Option<DepositAccount>, StoreError>;

    /// Load a credit line by identifier
    fn find_credit(&self, id: &str) -> Result<Option<CreditLine>, StoreError>;

    /// Insert or replace a deposit account
    fn save_deposit(&self, account: DepositAccount) -> Result<DepositAccount, StoreError>;

    /// Insert or replace a credit line
    fn save_credit(&self, credit: CreditLine) -> Result<CreditLine, StoreError>;

    /// Insert a deposit account only if its identifier is unused
    ///
    /// Returns `None`, leaving the stored record untouched, when a deposit
    /// account with that identifier already exists.
    fn insert_deposit(
        &self,
        account: DepositAccount,
    ) -> Result<Option<DepositAccount>, StoreError>;

    /// Insert a credit line only if its identifier is unused
    fn insert_credit(&self, credit: CreditLine) -> Result<Option<CreditLine>, StoreError>;

    /// Whether the client already holds a deposit account of this type
    fn exists_deposit_of_type(
        &self,
        client_id: &str,
        account_type: DepositAccountType,
    ) -> Result<bool, StoreError>;

    /// Whether the client already holds a credit line of this type
    fn exists_credit_of_type(
        &self,
        client_id: &str,
        credit_type: CreditType,
    ) -> Result<bool, StoreError>;

    /// Remove a deposit account, returning whether it existed
    fn delete_deposit(&self, id: &str) -> Result<bool, StoreError>;

    /// Remove a credit line, returning whether it existed
    fn delete_credit(&self, id: &str) -> Result<bool, StoreError>;

    /// All deposit accounts owned by the client
    fn list_deposits_by_client(&self, client_id: &str) -> Result<Vec<DepositAccount>, StoreError>;

    /// All credit lines owned by the client
    fn list_credits_by_client(&self, client_id: &str) -> Result<Vec<CreditLine>, StoreError>;

    /// Every deposit account in the store
    fn list_deposits(&self) -> Result<Vec<DepositAccount>, StoreError>;

    /// Every credit line in the store
    fn list_credits(&self) -> Result<Vec<CreditLine>, StoreError>;
}

/// Append-only transaction log
pub trait TransactionStore: Send + Sync {
    /// Append a committed transaction
    fn save(&self, transaction: Transaction) -> Result<(), StoreError>;

    /// All transactions recorded against a product, in insertion order
    fn find_by_account_id(&self, account_id: &str) -> Result<Vec<Transaction>, StoreError>;
}

/// Read-only client lookup
pub trait ClientDirectory: Send + Sync {
    /// Type and profile of a client, if known
    fn find_client(&self, client_id: &str) -> Result<Option<Client>, StoreError>;
}
