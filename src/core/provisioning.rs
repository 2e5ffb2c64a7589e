//! Account provisioning
//!
//! Opening a product is a check-then-create sequence: duplicate checks and
//! eligibility rules are evaluated against the stores, then the new record is
//! persisted. The whole sequence runs under the client's lock so that two
//! concurrent openings for one client cannot both pass the duplicate check.

use crate::core::locks::KeyedLocks;
use crate::core::traits::{ClientDirectory, ProductStore};
use crate::types::{
    BankError, ClientType, CreditLine, CreditStatus, CreditType, DepositAccount,
    DepositAccountType,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Creates deposit accounts and credit lines after applying eligibility rules
pub struct AccountProvisioning {
    products: Arc<dyn ProductStore>,
    clients: Arc<dyn ClientDirectory>,
    locks: KeyedLocks,
}

impl AccountProvisioning {
    pub fn new(products: Arc<dyn ProductStore>, clients: Arc<dyn ClientDirectory>) -> Self {
        Self {
            products,
            clients,
            locks: KeyedLocks::new(),
        }
    }

    /// Open a deposit account for a client
    ///
    /// Only `client_id`, `account_type` and a non-empty `id` are taken from
    /// the input. Commission and movement fields come from the type's
    /// defaults table and the balance always starts at zero.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - `Validation` if `client_id` is blank
    /// - `Conflict` if the client already holds an account of that type
    /// - `ClientNotFound` if the directory has no such client
    /// - `Conflict` if a BUSINESS client asks for anything but CURRENT
    /// - `Validation` if a VIP or PYME client holds no credit line
    /// - `Conflict` if another deposit account already uses the supplied id
    /// - `Storage` if a collaborator call fails
    pub fn open_deposit_account(
        &self,
        mut account: DepositAccount,
    ) -> Result<DepositAccount, BankError> {
        if account.client_id.trim().is_empty() {
            return Err(BankError::validation("Invalid client"));
        }

        let client_id = account.client_id.clone();
        self.locks.with_lock(&client_id, || {
            let account_type = account.account_type;

            if self
                .products
                .exists_deposit_of_type(&client_id, account_type)?
            {
                warn!(%client_id, %account_type, "client already holds this account type");
                return Err(BankError::conflict(format!(
                    "The client already has an account of type {}",
                    account_type
                )));
            }

            let client = self
                .clients
                .find_client(&client_id)?
                .ok_or_else(|| BankError::client_not_found(&client_id))?;

            if client.client_type == ClientType::Business
                && account_type != DepositAccountType::Current
            {
                warn!(%client_id, %account_type, "business client requested a non-current account");
                return Err(BankError::conflict(
                    "Business client can't have this type of account, just current account",
                ));
            }

            if client.profile.requires_credit_line() && !self.holds_any_credit_line(&client_id)? {
                warn!(%client_id, profile = %client.profile, "credit line required");
                return Err(BankError::validation(
                    "Client must have a credit card to open this type of account",
                ));
            }

            account.apply_defaults();
            if !account.balance.is_zero() {
                debug!(%client_id, supplied = %account.balance, "discarding supplied opening balance");
            }
            account.balance = Decimal::ZERO;
            if account.id.is_empty() {
                account.id = Uuid::new_v4().to_string();
            }

            let id = account.id.clone();
            let saved = self.products.insert_deposit(account)?.ok_or_else(|| {
                warn!(account_id = %id, %client_id, "deposit account id already in use");
                BankError::conflict(format!("A deposit account with id {} already exists", id))
            })?;
            info!(account_id = %saved.id, %client_id, %account_type, "deposit account created");
            Ok(saved)
        })
    }

    /// Open a credit line for a client
    ///
    /// The balance and interest rate are taken as given; the status is forced
    /// to ACTIVE.
    ///
    /// # Errors
    ///
    /// - `Validation` for a blank client, a negative balance, or a negative
    ///   interest rate
    /// - `Conflict` if the client already has a credit line of that type, or
    ///   another credit line already uses the supplied id
    /// - `Storage` if a collaborator call fails
    pub fn open_credit_line(&self, mut credit: CreditLine) -> Result<CreditLine, BankError> {
        if credit.client_id.trim().is_empty() {
            return Err(BankError::validation("Invalid client"));
        }
        if credit.balance.is_sign_negative() {
            return Err(BankError::validation("Invalid credit balance"));
        }
        if credit.interest_rate.is_sign_negative() {
            return Err(BankError::validation("Invalid interest rate"));
        }

        let client_id = credit.client_id.clone();
        self.locks.with_lock(&client_id, || {
            let credit_type = credit.credit_type;

            if self.products.exists_credit_of_type(&client_id, credit_type)? {
                warn!(%client_id, %credit_type, "client already holds this credit type");
                return Err(BankError::conflict(format!(
                    "The customer already has a credit of type {}",
                    credit_type
                )));
            }

            credit.status = CreditStatus::Active;
            if credit.id.is_empty() {
                credit.id = Uuid::new_v4().to_string();
            }

            let id = credit.id.clone();
            let saved = self.products.insert_credit(credit)?.ok_or_else(|| {
                warn!(credit_id = %id, %client_id, "credit line id already in use");
                BankError::conflict(format!("A credit line with id {} already exists", id))
            })?;
            info!(credit_id = %saved.id, %client_id, %credit_type, "credit line created");
            Ok(saved)
        })
    }

    fn holds_any_credit_line(&self, client_id: &str) -> Result<bool, BankError> {
        let personal = self
            .products
            .exists_credit_of_type(client_id, CreditType::Personal)?;
        let business = self
            .products
            .exists_credit_of_type(client_id, CreditType::Business)?;
        Ok(personal || business)
    }
}
