//! Transaction routing
//!
//! Resolves a transaction's target identifier to the product it refers to.
//! Lookup is deposit-first: an identifier present in both stores routes to
//! the deposit account. No cross-store uniqueness is enforced.

use crate::core::traits::ProductStore;
use crate::types::{BankError, CreditLine, DepositAccount, ProductKind};
use std::sync::Arc;
use tracing::{debug, warn};

/// Product a transaction resolved to
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Deposit(DepositAccount),
    Credit(CreditLine),
    /// Identifier unknown to both stores
    NotFound,
}

impl Route {
    /// Kind of the resolved product, `None` for an unknown target
    pub fn kind(&self) -> Option<ProductKind> {
        match self {
            Route::Deposit(_) => Some(ProductKind::Deposit),
            Route::Credit(_) => Some(ProductKind::Credit),
            Route::NotFound => None,
        }
    }
}

/// Resolves product identifiers against the product store
#[derive(Clone)]
pub struct TransactionRouter {
    products: Arc<dyn ProductStore>,
}

impl TransactionRouter {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    /// Route an identifier to exactly one of deposit, credit, or not found
    ///
    /// # Errors
    ///
    /// Returns `BankError::Storage` if either lookup fails. A miss in both
    /// stores is `Ok(Route::NotFound)`.
    pub fn route(&self, account_id: &str) -> Result<Route, BankError> {
        if let Some(account) = self.products.find_deposit(account_id)? {
            debug!(account_id, "routed to deposit account");
            return Ok(Route::Deposit(account));
        }

        if let Some(credit) = self.products.find_credit(account_id)? {
            debug!(account_id, "routed to credit line");
            return Ok(Route::Credit(credit));
        }

        warn!(account_id, "no deposit account or credit line found");
        Ok(Route::NotFound)
    }
}
