//! Thread-safe in-memory product store
//!
//! Deposit accounts and credit lines live in two independent `DashMap`s keyed
//! by product identifier, so the two identifier spaces can collide exactly as
//! they can in an external store.

use crate::core::traits::ProductStore;
use crate::types::{CreditLine, CreditType, DepositAccount, DepositAccountType, StoreError};
use dashmap::{DashMap, Entry};

/// DashMap-backed `ProductStore`
///
/// Listing methods return products sorted by identifier for deterministic
/// output.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    deposits: DashMap<String, DepositAccount>,
    credits: DashMap<String, CreditLine>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            deposits: DashMap::new(),
            credits: DashMap::new(),
        }
    }
}

impl ProductStore for InMemoryProductStore {
    fn find_deposit(&self, id: &str) -> Result<Option<DepositAccount>, StoreError> {
        Ok(self.deposits.get(id).map(|entry| entry.value().clone()))
    }

    fn find_credit(&self, id: &str) -> Result<Option<CreditLine>, StoreError> {
        Ok(self.credits.get(id).map(|entry| entry.value().clone()))
    }

    fn save_deposit(&self, account: DepositAccount) -> Result<DepositAccount, StoreError> {
        if account.id.is_empty() {
            return Err(StoreError::new("deposit account has no identifier"));
        }
        self.deposits.insert(account.id.clone(), account.clone());
        Ok(account)
    }

    fn save_credit(&self, credit: CreditLine) -> Result<CreditLine, StoreError> {
        if credit.id.is_empty() {
            return Err(StoreError::new("credit line has no identifier"));
        }
        self.credits.insert(credit.id.clone(), credit.clone());
        Ok(credit)
    }

    fn insert_deposit(
        &self,
        account: DepositAccount,
    ) -> Result<Option<DepositAccount>, StoreError> {
        if account.id.is_empty() {
            return Err(StoreError::new("deposit account has no identifier"));
        }
        match self.deposits.entry(account.id.clone()) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(slot) => {
                slot.insert(account.clone());
                Ok(Some(account))
            }
        }
    }

    fn insert_credit(&self, credit: CreditLine) -> Result<Option<CreditLine>, StoreError> {
        if credit.id.is_empty() {
            return Err(StoreError::new("credit line has no identifier"));
        }
        match self.credits.entry(credit.id.clone()) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(slot) => {
                slot.insert(credit.clone());
                Ok(Some(credit))
            }
        }
    }

    fn exists_deposit_of_type(
        &self,
        client_id: &str,
        account_type: DepositAccountType,
    ) -> Result<bool, StoreError> {
        Ok(self.deposits.iter().any(|entry| {
            entry.client_id == client_id && entry.account_type == account_type
        }))
    }

    fn exists_credit_of_type(
        &self,
        client_id: &str,
        credit_type: CreditType,
    ) -> Result<bool, StoreError> {
        Ok(self
            .credits
            .iter()
            .any(|entry| entry.client_id == client_id && entry.credit_type == credit_type))
    }

    fn delete_deposit(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.deposits.remove(id).is_some())
    }

    fn delete_credit(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.credits.remove(id).is_some())
    }

    fn list_deposits_by_client(&self, client_id: &str) -> Result<Vec<DepositAccount>, StoreError> {
        let mut accounts: Vec<DepositAccount> = self
            .deposits
            .iter()
            .filter(|entry| entry.client_id == client_id)
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(accounts)
    }

    fn list_credits_by_client(&self, client_id: &str) -> Result<Vec<CreditLine>, StoreError> {
        let mut credits: Vec<CreditLine> = self
            .credits
            .iter()
            .filter(|entry| entry.client_id == client_id)
            .map(|entry| entry.value().clone())
            .collect();
        credits.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(credits)
    }

    fn list_deposits(&self) -> Result<Vec<DepositAccount>, StoreError> {
        let mut accounts: Vec<DepositAccount> =
            self.deposits.iter().map(|entry| entry.value().clone()).collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(accounts)
    }

    fn list_credits(&self) -> Result<Vec<CreditLine>, StoreError> {
        let mut credits: Vec<CreditLine> =
            self.credits.iter().map(|entry| entry.value().clone()).collect();
        credits.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(credits)
    }
}
