//! Thread-safe in-memory transaction log
//!
//! Transactions are appended to a per-account `Vec`, so reads for one account
//! come back in insertion order and appends to different accounts do not
//! contend.

use crate::core::traits::TransactionStore;
use crate::types::{StoreError, Transaction};
use dashmap::DashMap;

/// DashMap-backed append-only `TransactionStore`
#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    by_account: DashMap<String, Vec<Transaction>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self {
            by_account: DashMap::new(),
        }
    }

    /// Total number of transactions across all accounts
    pub fn len(&self) -> usize {
        self.by_account.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TransactionStore for InMemoryTransactionStore {
    fn save(&self, transaction: Transaction) -> Result<(), StoreError> {
        self.by_account
            .entry(transaction.account_id.clone())
            .or_default()
            .push(transaction);
        Ok(())
    }

    fn find_by_account_id(&self, account_id: &str) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .by_account
            .get(account_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}
