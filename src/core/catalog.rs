//! Administrative product lookups and deletions
//!
//! Thin layer over the `ProductStore` that turns missing products into
//! `ProductNotFound` and logs every deletion. Balances are never changed
//! here; mutation belongs to the transaction processor. Deletions take the
//! processor's per-account lock, so a product cannot be removed between a
//! submission's read and its write.

use crate::core::locks::KeyedLocks;
use crate::core::report::{self, ProductReport};
use crate::core::traits::ProductStore;
use crate::types::{BankError, CreditLine, DepositAccount, ProductKind};
use std::sync::Arc;
use tracing::info;

/// Read and delete access to deposit accounts and credit lines
#[derive(Clone)]
pub struct ProductCatalog {
    products: Arc<dyn ProductStore>,
    account_locks: Arc<KeyedLocks>,
}

impl ProductCatalog {
    /// `account_locks` must be the set the transaction processor submits under
    /// (see `TransactionProcessor::account_locks`).
    pub fn new(products: Arc<dyn ProductStore>, account_locks: Arc<KeyedLocks>) -> Self {
        Self {
            products,
            account_locks,
        }
    }

    pub fn get_deposit_account(&self, id: &str) -> Result<DepositAccount, BankError> {
        self.products
            .find_deposit(id)?
            .ok_or_else(|| BankError::product_not_found(ProductKind::Deposit, id))
    }

    pub fn list_deposit_accounts(&self) -> Result<Vec<DepositAccount>, BankError> {
        Ok(self.products.list_deposits()?)
    }

    pub fn deposit_accounts_by_client(
        &self,
        client_id: &str,
    ) -> Result<Vec<DepositAccount>, BankError> {
        Ok(self.products.list_deposits_by_client(client_id)?)
    }

    /// Delete a deposit account
    ///
    /// # Errors
    ///
    /// `ProductNotFound` if no account has this identifier.
    pub fn delete_deposit_account(&self, id: &str) -> Result<(), BankError> {
        let existed = self
            .account_locks
            .with_lock(id, || self.products.delete_deposit(id))?;
        if !existed {
            return Err(BankError::product_not_found(ProductKind::Deposit, id));
        }
        info!(account_id = id, "deposit account deleted");
        Ok(())
    }

    pub fn get_credit_line(&self, id: &str) -> Result<CreditLine, BankError> {
        self.products
            .find_credit(id)?
            .ok_or_else(|| BankError::product_not_found(ProductKind::Credit, id))
    }

    pub fn list_credit_lines(&self) -> Result<Vec<CreditLine>, BankError> {
        Ok(self.products.list_credits()?)
    }

    /// Credit lines owned by a client
    ///
    /// # Errors
    ///
    /// `ProductNotFound` (keyed by the client id) when the client holds none.
    pub fn credit_lines_by_client(&self, client_id: &str) -> Result<Vec<CreditLine>, BankError> {
        let credits = self.products.list_credits_by_client(client_id)?;
        if credits.is_empty() {
            return Err(BankError::product_not_found(ProductKind::Credit, client_id));
        }
        Ok(credits)
    }

    /// Delete a credit line
    ///
    /// # Errors
    ///
    /// `ProductNotFound` if no credit line has this identifier.
    pub fn delete_credit_line(&self, id: &str) -> Result<(), BankError> {
        let existed = self
            .account_locks
            .with_lock(id, || self.products.delete_credit(id))?;
        if !existed {
            return Err(BankError::product_not_found(ProductKind::Credit, id));
        }
        info!(credit_id = id, "credit line deleted");
        Ok(())
    }

    /// Funded deposit accounts and active credit lines held by a client
    pub fn product_report(&self, client_id: &str) -> Result<ProductReport, BankError> {
        report::build(self.products.as_ref(), client_id)
    }
}
