//! Transaction processing
//!
//! This module provides the TransactionProcessor that validates a submitted
//! transaction, routes it to the product it targets, applies the balance
//! change, and records both the transaction and the updated product.
//!
//! The processor enforces business rules such as:
//! - Field validation before any store access
//! - No deposit account balance below zero
//! - Credit draws charged the amount plus interest
//! - One read-compute-write sequence at a time per account

use crate::core::clock::Clock;
use crate::core::locks::KeyedLocks;
use crate::core::router::{Route, TransactionRouter};
use crate::core::traits::{ProductStore, TransactionStore};
use crate::types::{
    BankError, CreditLine, DepositAccount, ProductKind, Transaction, TransactionRequest,
    TransactionType,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Result of a submission that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The transaction was applied and recorded
    Processed(ProductKind),

    /// The target identifier matches no product; nothing was written
    NoContent,
}

impl SubmitOutcome {
    /// Human-readable description of the outcome
    pub fn message(&self) -> &'static str {
        match self {
            SubmitOutcome::Processed(ProductKind::Deposit) => {
                "Transaction processed successfully for BankAccount"
            }
            SubmitOutcome::Processed(ProductKind::Credit) => {
                "Transaction processed successfully for Credit"
            }
            SubmitOutcome::NoContent => "Error getting account",
        }
    }
}

/// Validate request fields in a fixed order, stopping at the first failure
///
/// # Errors
///
/// Returns `BankError::Validation` for a blank account id, a non-positive
/// amount, a missing type, or a blank description, checked in that order.
pub fn validate(request: &TransactionRequest) -> Result<TransactionType, BankError> {
    if request.account_id.trim().is_empty() {
        return Err(BankError::validation("Invalid account"));
    }

    if request.amount <= Decimal::ZERO {
        return Err(BankError::validation("Invalid amount"));
    }

    let tx_type = request
        .tx_type
        .ok_or_else(|| BankError::validation("Invalid type operation"))?;

    if request.description.trim().is_empty() {
        return Err(BankError::validation("Description is required"));
    }

    Ok(tx_type)
}

/// Apply a transaction to a deposit account in place
///
/// On error the account is left unchanged.
pub fn apply_to_deposit(
    account: &mut DepositAccount,
    tx_type: TransactionType,
    amount: Decimal,
) -> Result<(), BankError> {
    let new_balance = match tx_type {
        TransactionType::Deposit => account
            .balance
            .checked_add(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("deposit", &account.id))?,
        TransactionType::Withdrawal | TransactionType::Purchase => {
            if account.balance < amount {
                let reason = match tx_type {
                    TransactionType::Withdrawal => "Insufficient balance for withdrawal",
                    _ => "Insufficient balance for purchase",
                };
                return Err(BankError::insufficient_funds(reason));
            }
            account.balance - amount
        }
    };

    account.balance = new_balance;
    Ok(())
}

/// Amount charged to a credit line for a draw: `amount * (100 + rate) / 100`
pub fn credit_debit(amount: Decimal, interest_rate: Decimal) -> Option<Decimal> {
    let hundred = Decimal::ONE_HUNDRED;
    amount
        .checked_mul(hundred.checked_add(interest_rate)?)?
        .checked_div(hundred)
}

/// Draw on a credit line in place, returning the amount charged
///
/// Interest is added regardless of the transaction type. On error the credit
/// line is left unchanged.
pub fn apply_to_credit(credit: &mut CreditLine, amount: Decimal) -> Result<Decimal, BankError> {
    let debit = credit_debit(amount, credit.interest_rate)
        .ok_or_else(|| BankError::arithmetic_overflow("credit draw", &credit.id))?;

    if credit.balance < debit {
        return Err(BankError::insufficient_funds(
            "The balance is insufficient to complete the operation",
        ));
    }

    credit.balance -= debit;
    Ok(debit)
}

/// Transaction processor
///
/// Coordinates the router, the product store, and the transaction log.
/// Shareable across threads behind `Arc`; concurrent submissions against the
/// same account are serialized, others run in parallel.
pub struct TransactionProcessor {
    router: TransactionRouter,
    products: Arc<dyn ProductStore>,
    transactions: Arc<dyn TransactionStore>,
    clock: Arc<dyn Clock>,
    locks: Arc<KeyedLocks>,
}

impl TransactionProcessor {
    pub fn new(
        products: Arc<dyn ProductStore>,
        transactions: Arc<dyn TransactionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            router: TransactionRouter::new(Arc::clone(&products)),
            products,
            transactions,
            clock,
            locks: Arc::new(KeyedLocks::new()),
        }
    }

    /// Per-account locks held by `submit`
    ///
    /// Anything else that removes or replaces a product must take the same
    /// lock so it cannot interleave with a submission in flight.
    pub fn account_locks(&self) -> Arc<KeyedLocks> {
        Arc::clone(&self.locks)
    }

    /// Validate, route, and apply a transaction
    ///
    /// The lookup, balance computation, transaction write, and product write
    /// run under the account's lock. The transaction record is written before
    /// the product.
    ///
    /// # Returns
    ///
    /// * `Ok(SubmitOutcome::Processed(kind))` if the transaction committed
    /// * `Ok(SubmitOutcome::NoContent)` if no product has that identifier
    ///
    /// # Errors
    ///
    /// - `Validation` for malformed fields (no store access happens)
    /// - `InsufficientFunds` when the balance cannot cover the debit
    /// - `ArithmeticOverflow` when the new balance is not representable
    /// - `Storage` when a store call fails; if it fails on a write, the
    ///   transaction may or may not have been recorded
    pub fn submit(&self, request: TransactionRequest) -> Result<SubmitOutcome, BankError> {
        let tx_type = validate(&request)?;
        let account_id = request.account_id.clone();

        self.locks.with_lock(&account_id, || match self.router.route(&account_id)? {
            Route::Deposit(account) => self.process_deposit(request, tx_type, account),
            Route::Credit(credit) => self.process_credit(request, tx_type, credit),
            Route::NotFound => {
                error!(%account_id, "error getting account");
                Ok(SubmitOutcome::NoContent)
            }
        })
    }

    fn process_deposit(
        &self,
        request: TransactionRequest,
        tx_type: TransactionType,
        mut account: DepositAccount,
    ) -> Result<SubmitOutcome, BankError> {
        apply_to_deposit(&mut account, tx_type, request.amount)?;
        info!(
            account_id = %account.id,
            %tx_type,
            amount = %request.amount,
            balance = %account.balance,
            "deposit account updated"
        );

        self.transactions.save(self.commit(request, tx_type))?;
        self.products.save_deposit(account)?;

        Ok(SubmitOutcome::Processed(ProductKind::Deposit))
    }

    fn process_credit(
        &self,
        request: TransactionRequest,
        tx_type: TransactionType,
        mut credit: CreditLine,
    ) -> Result<SubmitOutcome, BankError> {
        let debit = apply_to_credit(&mut credit, request.amount)?;
        info!(
            account_id = %credit.id,
            amount = %request.amount,
            %debit,
            balance = %credit.balance,
            "credit line drawn"
        );

        self.transactions.save(self.commit(request, tx_type))?;
        self.products.save_credit(credit)?;

        Ok(SubmitOutcome::Processed(ProductKind::Credit))
    }

    fn commit(&self, request: TransactionRequest, tx_type: TransactionType) -> Transaction {
        Transaction {
            id: Uuid::new_v4().to_string(),
            account_id: request.account_id,
            amount: request.amount,
            tx_type,
            description: request.description,
            date: self.clock.today(),
        }
    }

    /// All transactions recorded for a product, oldest date first
    ///
    /// Transactions sharing a date keep their insertion order. An unknown
    /// account yields an empty list.
    pub fn history(&self, account_id: &str) -> Result<Vec<Transaction>, BankError> {
        let mut transactions = self.transactions.find_by_account_id(account_id)?;
        transactions.sort_by_key(|tx| tx.date);

        info!(account_id, count = transactions.len(), "fetched transaction history");
        Ok(transactions)
    }
}
